//! Comparative runner: the same messages through several models

use crate::control::{StopSignal, Termination};
use crate::error::{RunAborted, RunResult};
use crate::runner::{classify_checked, preview};
use crate::telemetry;
use chrono::{DateTime, Utc};
use scamguard_classifiers::ClassifierPort;
use scamguard_core::{ClassificationResult, Error, LogRecord, ResultLog};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

const RUNNER: &str = "comparative";

/// Output of a comparative run.
///
/// Every `per_model` and `completed_at` vector and `agreements` have the
/// same length: a message is only recorded once all models have classified it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComparativeRun {
    pub messages: Vec<String>,
    pub per_model: BTreeMap<String, Vec<ClassificationResult>>,

    /// When each model's call returned, parallel to `per_model`
    pub completed_at: BTreeMap<String, Vec<DateTime<Utc>>>,

    pub agreements: Vec<bool>,
    pub termination: Termination,
}

impl ComparativeRun {
    /// Number of messages every model classified
    pub fn len(&self) -> usize {
        self.agreements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agreements.is_empty()
    }

    /// Fraction of messages on which all models agree.
    ///
    /// A single model always agrees with itself; a run with no completed
    /// messages reports 0.0.
    pub fn agreement_rate(&self) -> f64 {
        if self.per_model.len() == 1 {
            return 1.0;
        }
        if self.agreements.is_empty() {
            return 0.0;
        }
        let agreeing = self.agreements.iter().filter(|a| **a).count();
        agreeing as f64 / self.agreements.len() as f64
    }

    /// Indices of messages where the models split
    pub fn disagreements(&self) -> Vec<usize> {
        self.agreements
            .iter()
            .enumerate()
            .filter(|(_, agreed)| !**agreed)
            .map(|(i, _)| i)
            .collect()
    }

    /// Mean reported confidence per model
    pub fn mean_confidence_by_model(&self) -> BTreeMap<String, f64> {
        self.per_model
            .iter()
            .filter(|(_, results)| !results.is_empty())
            .map(|(model_id, results)| {
                let sum: f64 = results.iter().map(|r| r.confidence).sum();
                (model_id.clone(), sum / results.len() as f64)
            })
            .collect()
    }

    /// Flatten into a log, messages outer and models inner.
    ///
    /// Records carry the time each call completed, not the export time.
    pub fn to_log(&self) -> ResultLog {
        let mut log = ResultLog::with_capacity(self.len() * self.per_model.len());
        for (i, message) in self.messages.iter().enumerate().take(self.len()) {
            for (model_id, results) in &self.per_model {
                let record = LogRecord::from_result(message.as_str(), &results[i]);
                let at = self
                    .completed_at
                    .get(model_id)
                    .and_then(|stamps| stamps.get(i));
                log.append(match at {
                    Some(at) => record.with_timestamp(*at),
                    None => record,
                });
            }
        }
        log
    }
}

/// Sends each message to every requested model
#[derive(Debug, Clone, Default)]
pub struct ComparativeRunner;

impl ComparativeRunner {
    pub fn new() -> Self {
        Self
    }

    pub async fn run<S>(
        &self,
        port: &dyn ClassifierPort,
        messages: &[S],
        model_ids: &BTreeSet<String>,
        stop: &StopSignal,
    ) -> RunResult<ComparativeRun>
    where
        S: AsRef<str> + Sync,
    {
        let mut run = ComparativeRun::default();

        if messages.is_empty() {
            return Err(RunAborted::new(
                Error::invalid_argument("no messages to compare"),
                run,
            ));
        }
        if model_ids.is_empty() {
            return Err(RunAborted::new(
                Error::invalid_argument("no models to compare"),
                run,
            ));
        }

        info!(
            messages = messages.len(),
            models = model_ids.len(),
            "Starting comparative run"
        );

        run.per_model = model_ids
            .iter()
            .map(|id| (id.clone(), Vec::with_capacity(messages.len())))
            .collect();
        run.completed_at = model_ids
            .iter()
            .map(|id| (id.clone(), Vec::with_capacity(messages.len())))
            .collect();

        for message in messages {
            if stop.is_stopped() {
                run.termination = Termination::Cancelled;
                info!("Comparative run stopped after {} messages", run.len());
                break;
            }

            let message = message.as_ref();
            let mut row = Vec::with_capacity(model_ids.len());

            for model_id in model_ids {
                match classify_checked(port, message, Some(model_id.as_str()), RUNNER).await {
                    Ok(result) => {
                        debug!(
                            model = %model_id,
                            label = %result.label,
                            confidence = result.confidence,
                            "{}",
                            preview(message)
                        );
                        row.push((result, Utc::now()));
                    }
                    Err(e) => return Err(RunAborted::new(e, run)),
                }
            }

            let agreed = row.windows(2).all(|pair| pair[0].0.label == pair[1].0.label);
            let slots = run.per_model.values_mut().zip(run.completed_at.values_mut());
            for ((results, stamps), (result, at)) in slots.zip(row) {
                results.push(result);
                stamps.push(at);
            }
            run.agreements.push(agreed);
            run.messages.push(message.to_string());
        }

        metrics::gauge!(telemetry::COMPARATIVE_AGREEMENT_RATE).set(run.agreement_rate());

        info!(
            compared = run.len(),
            agreeing = run.len() - run.disagreements().len(),
            "Comparative run finished, agreement {:.1}%",
            run.agreement_rate() * 100.0
        );

        Ok(run)
    }
}
