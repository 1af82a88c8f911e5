//! Stream simulator: timed traffic drawn from labeled sample pools

use crate::control::{StopSignal, Termination};
use crate::error::{RunAborted, RunResult};
use crate::runner::{classify_checked, preview};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scamguard_classifiers::ClassifierPort;
use scamguard_core::{ClassificationResult, Error, Label, LogRecord, Result, ResultLog};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

const RUNNER: &str = "stream";

/// Stream simulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// How long to keep drawing messages
    pub duration: Duration,

    /// Probability of forcing the scam pool after the uniform pick
    pub scam_bias: f64,

    /// Delay between messages; `None` sends back to back
    pub pacing: Option<PacingRange>,

    /// Seed for reproducible draws
    pub seed: Option<u64>,

    /// Model to classify with; `None` uses the classifier's default
    pub model_id: Option<String>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(30),
            scam_bias: 0.3,
            pacing: Some(PacingRange::default()),
            seed: None,
            model_id: None,
        }
    }
}

/// Uniform range for the inter-message delay
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PacingRange {
    pub min: Duration,
    pub max: Duration,
}

impl PacingRange {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    fn sample(&self, rng: &mut impl Rng) -> Duration {
        if self.min >= self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

impl Default for PacingRange {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(500),
            max: Duration::from_millis(2000),
        }
    }
}

/// Output of a stream run
#[derive(Debug, Clone, Default, Serialize)]
pub struct StreamRun {
    /// Every classified message, with its sampled category as ground truth
    pub log: ResultLog,

    /// Messages classified
    pub messages_seen: usize,

    /// Messages the classifier flagged as scam
    pub scam_blocked: usize,

    /// Time spent in the run
    pub elapsed: Duration,

    pub termination: Termination,
}

impl StreamRun {
    fn record(&mut self, message: &str, result: &ClassificationResult, category: Label) {
        self.messages_seen += 1;
        if result.is_scam() {
            self.scam_blocked += 1;
        }
        self.log
            .append(LogRecord::from_result(message, result).with_actual(category));
    }

    /// Messages the classifier let through
    pub fn safe_allowed(&self) -> usize {
        self.messages_seen - self.scam_blocked
    }

    /// Fraction of messages blocked (0.0 for an empty run)
    pub fn block_rate(&self) -> f64 {
        if self.messages_seen == 0 {
            0.0
        } else {
            self.scam_blocked as f64 / self.messages_seen as f64
        }
    }
}

/// Draws messages from labeled pools at a randomized pace and classifies
/// each one as it "arrives"
pub struct StreamSimulator {
    config: StreamConfig,
}

impl StreamSimulator {
    pub fn new(config: StreamConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Run until the configured duration elapses or `stop` fires.
    ///
    /// A classifier failure aborts the run; the records collected so far
    /// travel with the error.
    pub async fn run<S>(
        &self,
        port: &dyn ClassifierPort,
        scam_pool: &[S],
        legit_pool: &[S],
        stop: &StopSignal,
    ) -> RunResult<StreamRun>
    where
        S: AsRef<str> + Sync,
    {
        let mut run = StreamRun::default();

        if let Err(e) = self.validate(scam_pool.len(), legit_pool.len()) {
            return Err(RunAborted::new(e, run));
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let model_id = self.config.model_id.as_deref();

        info!(
            duration_secs = self.config.duration.as_secs_f64(),
            scam_bias = self.config.scam_bias,
            "Starting message stream simulation"
        );

        let start = Instant::now();

        loop {
            if stop.is_stopped() {
                run.termination = Termination::Cancelled;
                info!("Stream stopped after {} messages", run.messages_seen);
                break;
            }

            if start.elapsed() >= self.config.duration {
                break;
            }

            let category = draw_category(&mut rng, self.config.scam_bias);
            let pool = match category {
                Label::Scam => scam_pool,
                Label::Legitimate => legit_pool,
            };
            let message = pool[rng.gen_range(0..pool.len())].as_ref();

            let result = match classify_checked(port, message, model_id, RUNNER).await {
                Ok(result) => result,
                Err(e) => {
                    run.elapsed = start.elapsed();
                    return Err(RunAborted::new(e, run));
                }
            };

            debug!(
                confidence = result.confidence,
                "{}: {}",
                if result.is_scam() { "BLOCKED" } else { "ALLOWED" },
                preview(message)
            );
            run.record(message, &result, category);

            if let Some(pacing) = &self.config.pacing {
                let delay = pacing.sample(&mut rng);
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = stop.stopped() => {}
                }
            }
        }

        run.elapsed = start.elapsed();

        info!(
            total = run.messages_seen,
            blocked = run.scam_blocked,
            allowed = run.safe_allowed(),
            "Stream finished, block rate {:.1}%",
            run.block_rate() * 100.0
        );

        Ok(run)
    }

    fn validate(&self, scam_len: usize, legit_len: usize) -> Result<()> {
        if self.config.duration.is_zero() {
            return Err(Error::invalid_argument("stream duration must be positive"));
        }
        if !(0.0..=1.0).contains(&self.config.scam_bias) {
            return Err(Error::invalid_argument(format!(
                "scam bias must be within [0, 1], got {}",
                self.config.scam_bias
            )));
        }
        if scam_len == 0 || legit_len == 0 {
            return Err(Error::invalid_argument("both sample pools must be non-empty"));
        }
        if let Some(pacing) = &self.config.pacing {
            if pacing.min > pacing.max {
                return Err(Error::invalid_argument(format!(
                    "pacing minimum {:?} exceeds maximum {:?}",
                    pacing.min, pacing.max
                )));
            }
        }
        Ok(())
    }
}

/// Pick a message category: a uniform coin flip, then a biased override
/// towards scam. The net scam rate is `0.5 + 0.5 * scam_bias`.
pub fn draw_category(rng: &mut impl Rng, scam_bias: f64) -> Label {
    let mut category = if rng.gen_bool(0.5) {
        Label::Scam
    } else {
        Label::Legitimate
    };

    if rng.gen::<f64>() < scam_bias {
        category = Label::Scam;
    }

    category
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_category_two_step_rate() {
        let mut rng = StdRng::seed_from_u64(7);
        let draws = 20_000;

        let scams = (0..draws)
            .filter(|_| draw_category(&mut rng, 0.3) == Label::Scam)
            .count();
        let rate = scams as f64 / draws as f64;

        assert!((rate - 0.65).abs() < 0.02, "scam rate {}", rate);
    }

    #[test]
    fn test_draw_category_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!((0..1000).all(|_| draw_category(&mut rng, 1.0) == Label::Scam));

        let scams = (0..10_000)
            .filter(|_| draw_category(&mut rng, 0.0) == Label::Scam)
            .count();
        assert!((scams as f64 / 10_000.0 - 0.5).abs() < 0.03);
    }

    #[test]
    fn test_pacing_sample_within_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let pacing = PacingRange::new(Duration::from_millis(10), Duration::from_millis(20));
        for _ in 0..100 {
            let d = pacing.sample(&mut rng);
            assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(20));
        }

        let fixed = PacingRange::new(Duration::from_millis(5), Duration::from_millis(5));
        assert_eq!(fixed.sample(&mut rng), Duration::from_millis(5));
    }

    #[test]
    fn test_block_rate_of_empty_run() {
        let run = StreamRun::default();
        assert_eq!(run.block_rate(), 0.0);
        assert_eq!(run.safe_allowed(), 0);
    }
}
