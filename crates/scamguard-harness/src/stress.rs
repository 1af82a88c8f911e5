//! Stress runner: a sequential batch of generated messages under one clock

use crate::control::{StopSignal, Termination};
use crate::error::{RunAborted, RunResult};
use crate::runner::classify_checked;
use crate::telemetry;
use chrono::{DateTime, Utc};
use scamguard_classifiers::ClassifierPort;
use scamguard_core::{ClassificationResult, Error, LogRecord, ResultLog};
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

const RUNNER: &str = "stress";

/// Output of a stress run
#[derive(Debug, Clone, Default, Serialize)]
pub struct StressRun {
    /// Results in message-index order
    pub results: Vec<ClassificationResult>,

    /// When each result came back, parallel to `results`
    pub completed_at: Vec<DateTime<Utc>>,

    /// Wall-clock time around the whole batch
    pub total_elapsed: Duration,

    /// Messages the batch was asked to classify
    pub requested: usize,

    pub termination: Termination,
}

impl StressRun {
    pub fn completed(&self) -> usize {
        self.results.len()
    }

    /// Mean time per completed message
    pub fn per_message_elapsed(&self) -> Duration {
        match u32::try_from(self.results.len()) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.total_elapsed / n,
            Err(_) => Duration::from_secs_f64(
                self.total_elapsed.as_secs_f64() / self.results.len() as f64,
            ),
        }
    }

    /// Completed messages per second.
    ///
    /// 0.0 when nothing completed. A batch that finished inside a single
    /// clock tick reports `f64::INFINITY`.
    pub fn throughput_per_second(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        let secs = self.total_elapsed.as_secs_f64();
        if secs == 0.0 {
            f64::INFINITY
        } else {
            self.results.len() as f64 / secs
        }
    }

    /// Rebuild the log using the same message factory the batch ran with.
    ///
    /// Records carry the time each call completed, not the export time.
    pub fn to_log<F>(&self, factory: F) -> ResultLog
    where
        F: Fn(usize) -> String,
    {
        self.results
            .iter()
            .enumerate()
            .map(|(i, result)| {
                let record = LogRecord::from_result(factory(i), result);
                match self.completed_at.get(i) {
                    Some(at) => record.with_timestamp(*at),
                    None => record,
                }
            })
            .collect()
    }
}

/// Classifies `message_count` generated messages back to back
#[derive(Debug, Clone)]
pub struct StressRunner {
    progress_every: usize,
    model_id: Option<String>,
}

impl Default for StressRunner {
    fn default() -> Self {
        Self {
            progress_every: 20,
            model_id: None,
        }
    }
}

impl StressRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log progress every `every` messages (0 disables progress lines)
    pub fn with_progress_every(mut self, every: usize) -> Self {
        self.progress_every = every;
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub async fn run<F>(
        &self,
        port: &dyn ClassifierPort,
        message_count: usize,
        factory: F,
        stop: &StopSignal,
    ) -> RunResult<StressRun>
    where
        F: Fn(usize) -> String + Send + Sync,
    {
        if message_count == 0 {
            return Err(RunAborted::new(
                Error::invalid_argument("stress message count must be positive"),
                StressRun::default(),
            ));
        }

        let mut run = StressRun {
            results: Vec::with_capacity(message_count),
            completed_at: Vec::with_capacity(message_count),
            requested: message_count,
            ..Default::default()
        };
        let model_id = self.model_id.as_deref();

        info!(message_count, "Starting stress run");

        let start = Instant::now();

        for i in 0..message_count {
            if stop.is_stopped() {
                run.termination = Termination::Cancelled;
                info!("Stress run stopped after {}/{} messages", i, message_count);
                break;
            }

            let message = factory(i);
            match classify_checked(port, &message, model_id, RUNNER).await {
                Ok(result) => {
                    run.results.push(result);
                    run.completed_at.push(Utc::now());
                }
                Err(e) => {
                    run.total_elapsed = start.elapsed();
                    return Err(RunAborted::new(e, run));
                }
            }

            if self.progress_every > 0 && (i + 1) % self.progress_every == 0 {
                debug!("Processed: {}/{}", i + 1, message_count);
            }
        }

        run.total_elapsed = start.elapsed();
        metrics::histogram!(telemetry::STRESS_BATCH_DURATION_MS)
            .record(run.total_elapsed.as_secs_f64() * 1000.0);

        info!(
            completed = run.completed(),
            total_ms = run.total_elapsed.as_millis() as u64,
            avg_ms = run.per_message_elapsed().as_secs_f64() * 1000.0,
            "Stress run finished, {:.2} messages/second",
            run.throughput_per_second()
        );

        Ok(run)
    }
}
