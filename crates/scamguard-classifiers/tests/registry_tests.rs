//! Registry integration tests
//!
//! Exercises the registry as the harness sees it: through `ClassifierPort`,
//! with externally supplied model variants mixed in with built-in ones.

use async_trait::async_trait;
use scamguard_classifiers::{ClassifierPort, ModelRegistry, ModelVerdict, ModelsConfig, RuleModel, ScamModel};
use scamguard_core::{Error, Label, Result};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// A model that returns a fixed probability and counts its calls
struct FixedModel {
    name: String,
    probability: f64,
    calls: AtomicU32,
}

impl FixedModel {
    fn new(name: &str, probability: f64) -> Self {
        Self {
            name: name.to_string(),
            probability,
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl ScamModel for FixedModel {
    async fn classify(&self, _text: &str) -> Result<ModelVerdict> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(ModelVerdict::new(self.probability, 0.5))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A model that always fails
struct BrokenModel;

#[async_trait]
impl ScamModel for BrokenModel {
    async fn classify(&self, _text: &str) -> Result<ModelVerdict> {
        Err(Error::classification("feature extraction failed"))
    }

    fn name(&self) -> &str {
        "broken"
    }
}

#[tokio::test]
async fn test_external_models_dispatch_by_id() {
    let always = Arc::new(FixedModel::new("always", 0.97));
    let never = Arc::new(FixedModel::new("never", 0.02));

    let mut registry = ModelRegistry::new();
    registry.register("always", always.clone()).unwrap();
    registry.register("never", never.clone()).unwrap();

    let result = registry.classify("anything", None).await.unwrap();
    assert_eq!(result.model_id, "always");
    assert_eq!(result.label, Label::Scam);
    assert!((result.confidence - 97.0).abs() < 1e-9);

    let result = registry.classify("anything", Some("never")).await.unwrap();
    assert_eq!(result.label, Label::Legitimate);
    assert!((result.confidence - 98.0).abs() < 1e-9);

    assert_eq!(always.calls.load(Ordering::Relaxed), 1);
    assert_eq!(never.calls.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn test_model_errors_pass_through() {
    let mut registry = ModelRegistry::new();
    registry.register("broken", Arc::new(BrokenModel)).unwrap();
    registry.register("rules", Arc::new(RuleModel::default())).unwrap();

    let err = registry.classify("hello", None).await.unwrap_err();
    assert!(matches!(err, Error::ClassificationFailure(_)));

    let ok = registry.classify("hello", Some("rules")).await;
    assert!(ok.is_ok());
}

#[tokio::test]
async fn test_shared_registry_through_arc() {
    let registry = Arc::new(ModelRegistry::from_config(&ModelsConfig::default()).unwrap());
    let port: Arc<dyn ClassifierPort> = registry.clone();

    assert_eq!(port.list_model_ids().len(), 3);

    let result = port
        .classify("Congratulations! You won $1,000,000! Send processing fee $100 now!", None)
        .await
        .unwrap();
    assert_eq!(result.label, Label::Scam);
}

#[test]
fn test_registry_from_yaml_file() {
    let yaml = r#"
models:
  - type: rules
    id: signals
    threshold: 0.7
  - type: keyword
    id: lottery
default_model: lottery
"#;

    let path = std::env::temp_dir().join("scamguard_registry_test.yaml");
    std::fs::write(&path, yaml).unwrap();

    let registry = ModelRegistry::from_file(&path).unwrap();
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.default_model(), Some("lottery"));

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_registry_rejects_unknown_default() {
    let yaml = r#"
models:
  - type: rules
    id: signals
default_model: missing
"#;

    let config = ModelsConfig::from_yaml(yaml).unwrap();
    let err = ModelRegistry::from_config(&config).unwrap_err();
    assert!(matches!(err, Error::UnknownModelId(_)));
}
