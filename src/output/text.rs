//! Text output for human-readable display
//!
//! Layout of a full run:
//!
//! ```text
//! Updated foo: ^1.2.0 -> ^1.3.0
//! ✅ Successfully updated package.json with latest installed versions
//!
//! 📜 Comparing with previous git version (main)...
//!
//! Dependencies:
//!   Major changes (1):
//!     - bar: ^1.0.0 → ^2.0.0
//! ```

use crate::classify::{Bucket, ReportSection};
use crate::domain::VersionChange;
use crate::output::{StatusEvent, StatusSink, Verbosity};
use colored::Colorize;
use std::io::Write;
use std::path::Path;

/// Text sink writing one line per event
pub struct TextSink<W: Write> {
    writer: W,
    verbosity: Verbosity,
    color: bool,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W, verbosity: Verbosity, color: bool) -> Self {
        Self {
            writer,
            verbosity,
            color,
        }
    }

    /// Consume the sink, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_update(&mut self, change: &VersionChange) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }

        if self.color {
            writeln!(
                self.writer,
                "Updated {}: {} -> {}",
                change.name.bold(),
                change.from.raw().dimmed(),
                change.to.raw().green()
            )
        } else {
            writeln!(
                self.writer,
                "Updated {}: {} -> {}",
                change.name, change.from, change.to
            )
        }
    }

    fn write_written(&mut self, path: &Path, dry_run: bool) -> std::io::Result<()> {
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let message = if dry_run {
            format!("(dry-run) {} left unchanged", file)
        } else {
            format!("Successfully updated {} with latest installed versions", file)
        };

        if self.color {
            writeln!(self.writer, "✅ {}", message.green())
        } else {
            writeln!(self.writer, "✅ {}", message)
        }
    }

    fn write_comparing(&mut self, reference: &str) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }

        writeln!(self.writer)?;
        if self.color {
            writeln!(
                self.writer,
                "📜 Comparing with previous git version ({})...",
                reference.cyan()
            )
        } else {
            writeln!(
                self.writer,
                "📜 Comparing with previous git version ({})...",
                reference
            )
        }
    }

    fn bucket_heading(&self, bucket: Bucket, count: usize) -> String {
        let heading = format!("{} ({}):", bucket.heading(), count);
        if !self.color {
            return heading;
        }
        match bucket {
            Bucket::Major => heading.red().bold().to_string(),
            Bucket::Minor => heading.yellow().to_string(),
            Bucket::Patch => heading.green().to_string(),
        }
    }

    fn write_section(&mut self, section: &ReportSection) -> std::io::Result<()> {
        writeln!(self.writer)?;
        if self.color {
            writeln!(self.writer, "{}:", section.group.title().bold())?;
        } else {
            writeln!(self.writer, "{}:", section.group.title())?;
        }

        for (bucket, changes) in section.changes.buckets() {
            let heading = self.bucket_heading(bucket, changes.len());
            writeln!(self.writer, "  {}", heading)?;
            for change in changes {
                if self.color {
                    writeln!(
                        self.writer,
                        "    - {}: {} {} {}",
                        change.name,
                        change.from.raw().dimmed(),
                        "→".dimmed(),
                        change.to.raw().bright_white().bold()
                    )?;
                } else {
                    writeln!(self.writer, "    - {}", change)?;
                }
            }
        }
        Ok(())
    }

    fn write_warning(&mut self, message: &str) -> std::io::Result<()> {
        writeln!(self.writer)?;
        if self.color {
            writeln!(self.writer, "⚠️ {}", message.yellow())
        } else {
            writeln!(self.writer, "⚠️ {}", message)
        }
    }
}

impl<W: Write> StatusSink for TextSink<W> {
    fn emit(&mut self, event: &StatusEvent) -> std::io::Result<()> {
        match event {
            StatusEvent::Updated { change, .. } => self.write_update(change),
            StatusEvent::Written { path, dry_run } => self.write_written(path, *dry_run),
            StatusEvent::Comparing { reference } => self.write_comparing(reference),
            StatusEvent::Section(section) => self.write_section(section),
            StatusEvent::Warning { message } => self.write_warning(message),
        }
    }

    fn finish(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::GroupReport;
    use crate::domain::DependencyGroup;
    use std::path::PathBuf;

    fn render(verbosity: Verbosity, events: &[StatusEvent]) -> String {
        let mut sink = TextSink::new(Vec::new(), verbosity, false);
        for event in events {
            sink.emit(event).unwrap();
        }
        sink.finish().unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    fn change(name: &str, from: &str, to: &str) -> VersionChange {
        VersionChange::new(name, from.into(), to.into())
    }

    fn sample_events() -> Vec<StatusEvent> {
        let mut changes = GroupReport::default();
        changes.push(Bucket::Major, change("bar", "^1.0.0", "^2.0.0"));
        changes.push(Bucket::Patch, change("baz", "^3.1.0", "^3.1.4"));

        vec![
            StatusEvent::Updated {
                group: DependencyGroup::Dependencies,
                change: change("foo", "^1.2.0", "^1.3.0"),
            },
            StatusEvent::Written {
                path: PathBuf::from("/project/package.json"),
                dry_run: false,
            },
            StatusEvent::Comparing {
                reference: "main".to_string(),
            },
            StatusEvent::Section(ReportSection {
                group: DependencyGroup::Dependencies,
                changes,
            }),
        ]
    }

    #[test]
    fn test_render_full_run() {
        let output = render(Verbosity::Normal, &sample_events());
        let expected = "\
Updated foo: ^1.2.0 -> ^1.3.0
✅ Successfully updated package.json with latest installed versions

📜 Comparing with previous git version (main)...

Dependencies:
  Major changes (1):
    - bar: ^1.0.0 → ^2.0.0
  Patch changes (1):
    - baz: ^3.1.0 → ^3.1.4
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_quiet_hides_progress_lines() {
        let output = render(Verbosity::Quiet, &sample_events());
        assert!(!output.contains("Updated foo"));
        assert!(!output.contains("Comparing"));
        assert!(output.contains("✅"));
        assert!(output.contains("Major changes (1):"));
    }

    #[test]
    fn test_dry_run_line() {
        let output = render(
            Verbosity::Normal,
            &[StatusEvent::Written {
                path: PathBuf::from("package.json"),
                dry_run: true,
            }],
        );
        assert_eq!(output, "✅ (dry-run) package.json left unchanged\n");
    }

    #[test]
    fn test_warning_line() {
        let output = render(
            Verbosity::Normal,
            &[StatusEvent::Warning {
                message: "Not a git repository, can't compare with previous version".to_string(),
            }],
        );
        assert_eq!(
            output,
            "\n⚠️ Not a git repository, can't compare with previous version\n"
        );
    }
}
