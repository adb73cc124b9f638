use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{BuildingRecord, WorklistEntry};

/// A work item that did not make it, with the reason that was logged for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub name: String,
    pub reason: String,
}

/// Tally of one image acquisition run.
#[derive(Clone, Debug, Serialize)]
pub struct DownloadReport {
    pub total: usize,
    pub successful: usize, // includes images that were already on disk
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<ItemFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl DownloadReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            successful: 0,
            skipped: 0,
            failed: 0,
            failures: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
        self.successful += 1;
    }

    pub fn record_success(&mut self) {
        self.successful += 1;
    }

    pub fn record_failure(&mut self, name: &str, reason: impl Into<String>) {
        self.failed += 1;
        self.failures.push(ItemFailure {
            name: name.to_string(),
            reason: reason.into(),
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }
}

/// A worklist entry that produced no record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FailedEntry {
    pub entry: WorklistEntry,
    pub reason: String,
}

/// Outcome of one content generation run.
#[derive(Clone, Debug, Serialize)]
pub struct GenerationReport {
    pub existing_count: usize,
    pub generated: Vec<BuildingRecord>,
    pub failed: Vec<FailedEntry>,
    /// Size of the dataset after the rewrite; `None` when nothing was written.
    pub total_written: Option<usize>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl GenerationReport {
    pub fn new(existing_count: usize) -> Self {
        Self {
            existing_count,
            generated: Vec::new(),
            failed: Vec::new(),
            total_written: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn record_failure(&mut self, entry: &WorklistEntry, reason: impl Into<String>) {
        self.failed.push(FailedEntry {
            entry: entry.clone(),
            reason: reason.into(),
        });
    }

    pub fn failed_names(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.entry.name.as_str()).collect()
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }
}
