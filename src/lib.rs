//! lockbump - keep package.json caret ranges in step with package-lock.json
//!
//! This library provides:
//! - Reconciliation of declared caret ranges against installed versions
//! - Classification of version changes into major/minor/patch buckets
//! - package.json / package-lock.json reading and writing
//! - Retrieval of the previous package.json from git

pub mod classify;
pub mod cli;
pub mod domain;
pub mod error;
pub mod history;
pub mod manifest;
pub mod output;
pub mod reconcile;
pub mod workflow;
