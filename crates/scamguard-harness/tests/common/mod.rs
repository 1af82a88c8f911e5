//! Mock classifier ports for harness tests
//!
//! Configurable `ClassifierPort` implementations for driving the runners:
//! keyword-triggered verdicts, failures after a number of calls, fixed
//! latency on the tokio clock, and call counters.

#![allow(dead_code)]

use async_trait::async_trait;
use scamguard_classifiers::ClassifierPort;
use scamguard_core::{ClassificationResult, Error, Label, Result};
use scamguard_harness::StopSignal;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Verdict rule for one mock model
#[derive(Clone)]
struct MockModel {
    trigger: String,
    scam_confidence: f64,
    legit_confidence: f64,
    flag_everything: bool,
}

/// A configurable mock port.
///
/// The default model flags any text containing `"WIN"` as scam with 90%
/// confidence and lets everything else through with 85%.
pub struct MockPort {
    default_model: String,
    models: BTreeMap<String, MockModel>,
    latency: Option<Duration>,
    fail_after: Option<usize>,
    stop_after: Option<(usize, StopSignal)>,
    invalid_confidence: bool,
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, Option<String>)>>,
}

impl MockPort {
    pub fn new() -> Self {
        let mut models = BTreeMap::new();
        models.insert(
            "stub".to_string(),
            MockModel {
                trigger: "WIN".to_string(),
                scam_confidence: 90.0,
                legit_confidence: 85.0,
                flag_everything: false,
            },
        );
        Self {
            default_model: "stub".to_string(),
            models,
            latency: None,
            fail_after: None,
            stop_after: None,
            invalid_confidence: false,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Add a model flagging texts that contain `trigger`
    pub fn with_model(mut self, id: &str, trigger: &str, scam_confidence: f64) -> Self {
        self.models.insert(
            id.to_string(),
            MockModel {
                trigger: trigger.to_string(),
                scam_confidence,
                legit_confidence: 70.0,
                flag_everything: false,
            },
        );
        self
    }

    /// Add a model that flags every message
    pub fn with_paranoid_model(mut self, id: &str) -> Self {
        self.models.insert(
            id.to_string(),
            MockModel {
                trigger: String::new(),
                scam_confidence: 99.0,
                legit_confidence: 0.0,
                flag_everything: true,
            },
        );
        self
    }

    /// Sleep on the tokio clock before answering
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Succeed `n` times, then fail every call
    pub fn failing_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    /// Fire `signal` once `n` calls have completed
    pub fn stopping_after(mut self, n: usize, signal: StopSignal) -> Self {
        self.stop_after = Some((n, signal));
        self
    }

    /// Report confidences outside [0, 100]
    pub fn with_invalid_confidence(mut self) -> Self {
        self.invalid_confidence = true;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every `(text, model_id)` pair passed to `classify`, in call order
    pub fn seen(&self) -> Vec<(String, Option<String>)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClassifierPort for MockPort {
    async fn classify(&self, text: &str, model_id: Option<&str>) -> Result<ClassificationResult> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((text.to_string(), model_id.map(str::to_string)));

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(n) = self.fail_after {
            if call >= n {
                return Err(Error::internal("simulated classifier crash"));
            }
        }

        let id = model_id.unwrap_or(self.default_model.as_str());
        let model = self
            .models
            .get(id)
            .ok_or_else(|| Error::unknown_model(id))?;

        let result = if model.flag_everything || text.contains(&model.trigger) {
            ClassificationResult::new(Label::Scam, model.scam_confidence, id)
        } else {
            ClassificationResult::new(Label::Legitimate, model.legit_confidence, id)
        };

        if let Some((n, signal)) = &self.stop_after {
            if call + 1 >= *n {
                signal.stop();
            }
        }

        if self.invalid_confidence {
            return Ok(ClassificationResult::new(result.label, 140.0, id));
        }

        Ok(result)
    }

    fn list_model_ids(&self) -> BTreeSet<String> {
        self.models.keys().cloned().collect()
    }
}

/// A port with nothing loaded
pub struct EmptyPort;

#[async_trait]
impl ClassifierPort for EmptyPort {
    async fn classify(&self, _text: &str, _model_id: Option<&str>) -> Result<ClassificationResult> {
        Err(Error::ModelNotLoaded)
    }

    fn list_model_ids(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }
}
