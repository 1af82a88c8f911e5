//! Append-only result log

use crate::types::LogRecord;
use serde::{Deserialize, Serialize};

/// Ordered history of classification records for one run.
///
/// Records are kept in arrival order and never edited once appended; a
/// correction is a new record. `clear` exists only for re-initializing a
/// harness session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultLog {
    records: Vec<LogRecord>,
}

impl ResultLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty log with room for `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Append a record
    pub fn append(&mut self, record: LogRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LogRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogRecord> {
        self.records.iter()
    }

    /// All records in arrival order
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// The first `len` records (or all of them, if fewer)
    pub fn prefix(&self, len: usize) -> &[LogRecord] {
        &self.records[..len.min(self.records.len())]
    }

    /// Number of records predicted as scam
    pub fn scam_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_scam()).count()
    }

    /// Records that carry a ground-truth label
    pub fn labeled(&self) -> impl Iterator<Item = &LogRecord> {
        self.records.iter().filter(|r| r.actual_label.is_some())
    }

    /// Merge logs of independent runs, given in run-start order
    pub fn concat<I>(logs: I) -> Self
    where
        I: IntoIterator<Item = ResultLog>,
    {
        let mut merged = Self::new();
        for log in logs {
            merged.records.extend(log.records);
        }
        merged
    }

    /// Drop every record (session re-initialization)
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn into_records(self) -> Vec<LogRecord> {
        self.records
    }
}

impl From<Vec<LogRecord>> for ResultLog {
    fn from(records: Vec<LogRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<LogRecord> for ResultLog {
    fn from_iter<T: IntoIterator<Item = LogRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl Extend<LogRecord> for ResultLog {
    fn extend<T: IntoIterator<Item = LogRecord>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ResultLog {
    type Item = &'a LogRecord;
    type IntoIter = std::slice::Iter<'a, LogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for ResultLog {
    type Item = LogRecord;
    type IntoIter = std::vec::IntoIter<LogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
