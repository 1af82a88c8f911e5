//! Classifier port and model traits

use async_trait::async_trait;
use scamguard_core::{ClassificationResult, Label, Result};
use std::collections::BTreeSet;
use std::sync::Arc;

/// The contract the evaluation harness consumes.
///
/// `model_id` selects one registered model variant; `None` means the
/// classifier's default model.
#[async_trait]
pub trait ClassifierPort: Send + Sync {
    /// Classify `text`, optionally with a specific model
    async fn classify(&self, text: &str, model_id: Option<&str>) -> Result<ClassificationResult>;

    /// Ids of every model that can be passed to `classify`
    fn list_model_ids(&self) -> BTreeSet<String>;
}

#[async_trait]
impl<T: ClassifierPort + ?Sized> ClassifierPort for Arc<T> {
    async fn classify(&self, text: &str, model_id: Option<&str>) -> Result<ClassificationResult> {
        (**self).classify(text, model_id).await
    }

    fn list_model_ids(&self) -> BTreeSet<String> {
        (**self).list_model_ids()
    }
}

/// A single model variant behind the port
#[async_trait]
pub trait ScamModel: Send + Sync {
    /// Score the given text
    async fn classify(&self, text: &str) -> Result<ModelVerdict>;

    /// Get the model name
    fn name(&self) -> &str;
}

/// Raw output of one model
#[derive(Debug, Clone)]
pub struct ModelVerdict {
    /// Probability that the text is a scam (0.0-1.0)
    pub scam_probability: f64,

    /// Decision threshold the model applied
    pub threshold: f64,

    /// Matched spans (for pattern-based models)
    pub spans: Vec<(usize, usize)>,

    /// Latency in microseconds
    pub latency_us: u64,
}

impl ModelVerdict {
    /// Create a verdict from a scam probability and threshold
    pub fn new(scam_probability: f64, threshold: f64) -> Self {
        Self {
            scam_probability,
            threshold,
            spans: Vec::new(),
            latency_us: 0,
        }
    }

    pub fn is_scam(&self) -> bool {
        self.scam_probability >= self.threshold
    }

    pub fn label(&self) -> Label {
        Label::from_is_scam(self.is_scam())
    }

    /// Probability of the predicted class, as a percentage
    pub fn confidence(&self) -> f64 {
        let p = if self.is_scam() {
            self.scam_probability
        } else {
            1.0 - self.scam_probability
        };
        (p * 100.0).clamp(0.0, 100.0)
    }

    /// Attach the id of the model that produced this verdict
    pub fn into_result(self, model_id: impl Into<String>) -> ClassificationResult {
        ClassificationResult::new(self.label(), self.confidence(), model_id)
    }
}

/// Logistic squashing used by the built-in models
pub(crate) fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_confidence_tracks_predicted_class() {
        let scam = ModelVerdict::new(0.8, 0.5);
        assert!(scam.is_scam());
        assert!((scam.confidence() - 80.0).abs() < 1e-9);

        let legit = ModelVerdict::new(0.1, 0.5);
        assert_eq!(legit.label(), Label::Legitimate);
        assert!((legit.confidence() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_verdict_at_threshold_is_scam() {
        let verdict = ModelVerdict::new(0.5, 0.5);
        assert!(verdict.is_scam());

        let result = verdict.into_result("keyword");
        assert_eq!(result.label, Label::Scam);
        assert_eq!(result.model_id, "keyword");
    }

    #[test]
    fn test_sigmoid_midpoint() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(10.0) > 0.99);
    }
}
