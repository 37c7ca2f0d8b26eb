//! JSON output for machine processing
//!
//! Events are buffered and written as a single document when the run ends.

use crate::classify::ReportSection;
use crate::domain::{DependencyGroup, VersionChange};
use crate::output::{StatusEvent, StatusSink};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct JsonUpdate {
    group: DependencyGroup,
    #[serde(flatten)]
    change: VersionChange,
}

/// Full JSON document for a run
#[derive(Debug, Default, Serialize)]
struct JsonOutput {
    updates: Vec<JsonUpdate>,
    written: bool,
    dry_run: bool,
    reference: Option<String>,
    report: Vec<ReportSection>,
    warnings: Vec<String>,
}

/// JSON sink buffering the whole run
pub struct JsonSink<W: Write> {
    writer: W,
    output: JsonOutput,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            output: JsonOutput::default(),
        }
    }

    /// Consume the sink, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> StatusSink for JsonSink<W> {
    fn emit(&mut self, event: &StatusEvent) -> std::io::Result<()> {
        match event {
            StatusEvent::Updated { group, change } => self.output.updates.push(JsonUpdate {
                group: *group,
                change: change.clone(),
            }),
            StatusEvent::Written { dry_run, .. } => {
                self.output.written = !dry_run;
                self.output.dry_run = *dry_run;
            }
            StatusEvent::Comparing { reference } => {
                self.output.reference = Some(reference.clone());
            }
            StatusEvent::Section(section) => self.output.report.push(section.clone()),
            StatusEvent::Warning { message } => self.output.warnings.push(message.clone()),
        }
        Ok(())
    }

    fn finish(&mut self) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.output)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}
