//! Edge-case runner: fixed categories of boundary messages

use crate::control::{StopSignal, Termination};
use crate::error::{RunAborted, RunResult};
use crate::runner::{classify_checked, preview};
use scamguard_classifiers::ClassifierPort;
use scamguard_core::{Error, Label, LogRecord, ResultLog};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const RUNNER: &str = "edge_cases";

/// A named group of messages, optionally with the label every message in
/// it is expected to receive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeCaseCategory {
    pub name: String,

    #[serde(default)]
    pub expected: Option<Label>,

    pub messages: Vec<String>,
}

impl EdgeCaseCategory {
    pub fn new(name: impl Into<String>, messages: Vec<String>) -> Self {
        Self {
            name: name.into(),
            expected: None,
            messages,
        }
    }

    /// Declare the ground truth for every message in this category
    pub fn expecting(mut self, label: Label) -> Self {
        self.expected = Some(label);
        self
    }
}

/// Per-category tally of an edge-case run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub total: usize,
    pub scam_count: usize,
    pub mean_confidence: f64,
}

impl CategorySummary {
    /// Whether any message in the category was flagged
    pub fn is_scam_attempt(&self) -> bool {
        self.scam_count > 0
    }
}

/// Output of an edge-case run
#[derive(Debug, Clone, Default, Serialize)]
pub struct EdgeCaseRun {
    pub log: ResultLog,
    pub termination: Termination,
}

impl EdgeCaseRun {
    /// Summaries in the order categories were run
    pub fn by_category(&self) -> Vec<CategorySummary> {
        let mut summaries: Vec<(CategorySummary, f64)> = Vec::new();

        for record in &self.log {
            let name = record.category.as_deref().unwrap_or_default();
            let position = match summaries.iter().position(|(s, _)| s.name == name) {
                Some(position) => position,
                None => {
                    summaries.push((
                        CategorySummary {
                            name: name.to_string(),
                            total: 0,
                            scam_count: 0,
                            mean_confidence: 0.0,
                        },
                        0.0,
                    ));
                    summaries.len() - 1
                }
            };

            let (summary, confidence_sum) = &mut summaries[position];
            summary.total += 1;
            if record.is_scam() {
                summary.scam_count += 1;
            }
            *confidence_sum += record.confidence;
        }

        summaries
            .into_iter()
            .map(|(mut summary, confidence_sum)| {
                summary.mean_confidence = confidence_sum / summary.total as f64;
                summary
            })
            .collect()
    }
}

/// Classifies every message of every category exactly once, in order
#[derive(Debug, Clone, Default)]
pub struct EdgeCaseRunner {
    model_id: Option<String>,
}

impl EdgeCaseRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route every call to a specific model
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    /// Run the suite. Records carry their category name; only categories
    /// that declare an expected label contribute ground truth.
    pub async fn run(
        &self,
        port: &dyn ClassifierPort,
        suite: &[EdgeCaseCategory],
        stop: &StopSignal,
    ) -> RunResult<EdgeCaseRun> {
        let mut run = EdgeCaseRun::default();

        let total: usize = suite.iter().map(|c| c.messages.len()).sum();
        if total == 0 {
            return Err(RunAborted::new(
                Error::invalid_argument("edge-case suite has no messages"),
                run,
            ));
        }

        info!(
            categories = suite.len(),
            messages = total,
            "Starting edge case run"
        );

        let model_id = self.model_id.as_deref();

        'suite: for category in suite {
            debug!(category = %category.name, "Running category");

            for message in &category.messages {
                if stop.is_stopped() {
                    run.termination = Termination::Cancelled;
                    info!("Edge case run stopped after {} messages", run.log.len());
                    break 'suite;
                }

                let result = match classify_checked(port, message, model_id, RUNNER).await {
                    Ok(result) => result,
                    Err(e) => return Err(RunAborted::new(e, run)),
                };

                debug!(
                    category = %category.name,
                    label = %result.label,
                    confidence = result.confidence,
                    "{}",
                    preview(message)
                );

                let mut record =
                    LogRecord::from_result(message.as_str(), &result).with_category(&category.name);
                if let Some(expected) = category.expected {
                    record = record.with_actual(expected);
                }
                run.log.append(record);
            }
        }

        info!(
            classified = run.log.len(),
            flagged = run.log.scam_count(),
            "Edge case run finished"
        );

        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scamguard_core::ClassificationResult;

    fn record(category: &str, label: Label, confidence: f64) -> LogRecord {
        LogRecord::from_result("msg", &ClassificationResult::new(label, confidence, "m"))
            .with_category(category)
    }

    #[test]
    fn test_by_category_keeps_run_order() {
        let run = EdgeCaseRun {
            log: vec![
                record("short", Label::Scam, 80.0),
                record("short", Label::Legitimate, 60.0),
                record("long", Label::Legitimate, 90.0),
            ]
            .into(),
            termination: Termination::Completed,
        };

        let summaries = run.by_category();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "short");
        assert_eq!(summaries[0].total, 2);
        assert_eq!(summaries[0].scam_count, 1);
        assert!((summaries[0].mean_confidence - 70.0).abs() < 1e-9);
        assert!(summaries[0].is_scam_attempt());
        assert_eq!(summaries[1].name, "long");
        assert!(!summaries[1].is_scam_attempt());
    }

    #[test]
    fn test_expecting_sets_ground_truth() {
        let category = EdgeCaseCategory::new("lottery", vec!["WIN".into()]).expecting(Label::Scam);
        assert_eq!(category.expected, Some(Label::Scam));
    }
}
