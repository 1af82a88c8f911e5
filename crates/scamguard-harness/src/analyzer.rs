//! Accuracy and confidence analysis over a labeled result log

use scamguard_core::{Error, Label, LogRecord, Result, ResultLog};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts of (actual, predicted) pairs, scam first on both axes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    /// `cells[actual][predicted]`
    pub cells: [[u64; 2]; 2],
}

impl ConfusionMatrix {
    fn index(label: Label) -> usize {
        match label {
            Label::Scam => 0,
            Label::Legitimate => 1,
        }
    }

    pub fn add(&mut self, actual: Label, predicted: Label) {
        self.cells[Self::index(actual)][Self::index(predicted)] += 1;
    }

    pub fn get(&self, actual: Label, predicted: Label) -> u64 {
        self.cells[Self::index(actual)][Self::index(predicted)]
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }

    pub fn true_positives(&self) -> u64 {
        self.get(Label::Scam, Label::Scam)
    }

    pub fn false_positives(&self) -> u64 {
        self.get(Label::Legitimate, Label::Scam)
    }

    pub fn false_negatives(&self) -> u64 {
        self.get(Label::Scam, Label::Legitimate)
    }

    pub fn true_negatives(&self) -> u64 {
        self.get(Label::Legitimate, Label::Legitimate)
    }

    /// Share of scam predictions that were scams; `None` without any
    pub fn precision(&self) -> Option<f64> {
        let predicted = self.true_positives() + self.false_positives();
        (predicted > 0).then(|| self.true_positives() as f64 / predicted as f64)
    }

    /// Share of scams that were caught; `None` without any
    pub fn recall(&self) -> Option<f64> {
        let actual = self.true_positives() + self.false_negatives();
        (actual > 0).then(|| self.true_positives() as f64 / actual as f64)
    }
}

/// Summary statistics for a set of confidence values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

/// Running accumulator; the median needs the full sample
#[derive(Default)]
struct ConfidenceAccumulator {
    values: Vec<f64>,
    sum: f64,
    sum_sq: f64,
    min: f64,
    max: f64,
}

impl ConfidenceAccumulator {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            ..Default::default()
        }
    }

    fn push(&mut self, value: f64) {
        if self.values.is_empty() {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.sum += value;
        self.sum_sq += value * value;
        self.values.push(value);
    }

    fn finish(mut self) -> Option<ConfidenceStats> {
        let count = self.values.len();
        if count == 0 {
            return None;
        }

        let n = count as f64;
        let mean = self.sum / n;
        let variance = (self.sum_sq / n - mean * mean).max(0.0);

        self.values.sort_by(f64::total_cmp);
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (self.values[mid - 1] + self.values[mid]) / 2.0
        } else {
            self.values[mid]
        };

        Some(ConfidenceStats {
            count,
            mean,
            median,
            min: self.min,
            max: self.max,
            std_dev: variance.sqrt(),
        })
    }
}

/// Metrics derived from a fully labeled log
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total: usize,
    pub correct: usize,

    /// `correct / total`
    pub accuracy: f64,

    /// Accuracy over the first `i + 1` records, for each `i`
    pub cumulative_accuracy: Vec<f64>,

    pub confusion: ConfusionMatrix,

    /// Confidence over every record
    pub confidence: ConfidenceStats,

    /// Confidence split by predicted label
    pub confidence_by_prediction: BTreeMap<Label, ConfidenceStats>,
}

impl MetricsSnapshot {
    pub fn incorrect(&self) -> usize {
        self.total - self.correct
    }

    /// Count of records predicted as `label`
    pub fn predicted(&self, label: Label) -> u64 {
        Label::ALL
            .iter()
            .map(|actual| self.confusion.get(*actual, label))
            .sum()
    }
}

/// Computes a fresh `MetricsSnapshot` on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsAnalyzer;

impl MetricsAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, log: &ResultLog) -> Result<MetricsSnapshot> {
        self.analyze_records(log.records())
    }

    /// Analyze a slice of records, e.g. a prefix of a live log.
    ///
    /// Every record must carry ground truth; the first one that does not is
    /// reported by position.
    pub fn analyze_records(&self, records: &[LogRecord]) -> Result<MetricsSnapshot> {
        if records.is_empty() {
            return Err(Error::invalid_argument("cannot analyze an empty log"));
        }

        let total = records.len();
        let mut correct = 0usize;
        let mut cumulative_accuracy = Vec::with_capacity(total);
        let mut confusion = ConfusionMatrix::default();
        let mut overall = ConfidenceAccumulator::with_capacity(total);
        let mut by_prediction: BTreeMap<Label, ConfidenceAccumulator> = BTreeMap::new();

        for (index, record) in records.iter().enumerate() {
            let actual = record
                .actual_label
                .ok_or(Error::MissingGroundTruth { index })?;

            confusion.add(actual, record.predicted_label);
            if actual == record.predicted_label {
                correct += 1;
            }
            cumulative_accuracy.push(correct as f64 / (index + 1) as f64);

            overall.push(record.confidence);
            by_prediction
                .entry(record.predicted_label)
                .or_insert_with(|| ConfidenceAccumulator::with_capacity(0))
                .push(record.confidence);
        }

        let confidence = overall
            .finish()
            .ok_or_else(|| Error::internal("no confidence values collected"))?;
        let confidence_by_prediction = by_prediction
            .into_iter()
            .filter_map(|(label, acc)| acc.finish().map(|stats| (label, stats)))
            .collect();

        Ok(MetricsSnapshot {
            total,
            correct,
            accuracy: correct as f64 / total as f64,
            cumulative_accuracy,
            confusion,
            confidence,
            confidence_by_prediction,
        })
    }
}
