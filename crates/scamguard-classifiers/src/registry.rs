//! Model registry: named model variants behind one classify interface

use crate::classifier::{ClassifierPort, ScamModel};
use crate::config::{ModelSpec, ModelsConfig};
use crate::patterns::KeywordModel;
use crate::rules::RuleModel;
use async_trait::async_trait;
use scamguard_core::{ClassificationResult, Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Registry of model variants, addressed by id
#[derive(Clone, Default)]
pub struct ModelRegistry {
    /// Loaded models by id
    models: BTreeMap<String, Arc<dyn ScamModel>>,

    /// Id used when the caller does not select a model
    default_model: Option<String>,
}

impl ModelRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configuration
    pub fn from_config(config: &ModelsConfig) -> Result<Self> {
        let mut registry = Self::new();

        info!("Initializing model registry with {} models", config.models.len());

        for spec in &config.models {
            let model: Arc<dyn ScamModel> = match spec {
                ModelSpec::Keyword {
                    id,
                    keywords,
                    bias,
                    threshold,
                } => {
                    if keywords.is_empty() {
                        let mut model = KeywordModel::with_default_keywords(id.clone())?;
                        model.set_decision(*bias, *threshold)?;
                        Arc::new(model)
                    } else {
                        let pairs = keywords
                            .iter()
                            .map(|k| (k.pattern.clone(), k.weight))
                            .collect();
                        Arc::new(KeywordModel::new(id.clone(), pairs, *bias, *threshold)?)
                    }
                }
                ModelSpec::Rules { id, threshold } => Arc::new(RuleModel::new(id.clone(), *threshold)?),
            };

            registry.register(spec.id(), model)?;
            info!("✓ Loaded model: {}", spec.id());
        }

        if let Some(default) = &config.default_model {
            registry.set_default(default)?;
        }

        info!(
            "Model registry initialized with {} models (default: {})",
            registry.len(),
            registry.default_model().unwrap_or("none")
        );

        Ok(registry)
    }

    /// Load registry from a YAML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = ModelsConfig::from_file(path)?;
        Self::from_config(&config)
    }

    /// Register a model; the first registered model becomes the default
    pub fn register(&mut self, id: impl Into<String>, model: Arc<dyn ScamModel>) -> Result<()> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::config("Model id must not be empty"));
        }
        if self.models.contains_key(&id) {
            return Err(Error::config(format!("Model '{}' is already registered", id)));
        }

        if self.default_model.is_none() {
            self.default_model = Some(id.clone());
        }
        self.models.insert(id, model);
        Ok(())
    }

    /// Select the model used when callers pass no id
    pub fn set_default(&mut self, id: &str) -> Result<()> {
        if !self.models.contains_key(id) {
            return Err(Error::unknown_model(id));
        }
        self.default_model = Some(id.to_string());
        Ok(())
    }

    pub fn default_model(&self) -> Option<&str> {
        self.default_model.as_deref()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn ScamModel>> {
        self.models.get(id)
    }

    /// Get the number of loaded models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    fn resolve<'a>(&'a self, model_id: Option<&'a str>) -> Result<(&'a str, &'a Arc<dyn ScamModel>)> {
        if self.models.is_empty() {
            return Err(Error::ModelNotLoaded);
        }

        let id = match model_id {
            Some(id) => id,
            None => self.default_model.as_deref().ok_or(Error::ModelNotLoaded)?,
        };

        self.models
            .get(id)
            .map(|model| (id, model))
            .ok_or_else(|| Error::unknown_model(id))
    }
}

#[async_trait]
impl ClassifierPort for ModelRegistry {
    async fn classify(&self, text: &str, model_id: Option<&str>) -> Result<ClassificationResult> {
        let (id, model) = self.resolve(model_id)?;

        let verdict = model.classify(text).await?;
        debug!(
            model = id,
            latency_us = verdict.latency_us,
            "Classified message as {}",
            verdict.label()
        );

        Ok(verdict.into_result(id))
    }

    fn list_model_ids(&self) -> BTreeSet<String> {
        self.models.keys().cloned().collect()
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.models.keys().collect::<Vec<_>>())
            .field("default_model", &self.default_model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scamguard_core::Label;

    #[tokio::test]
    async fn test_empty_registry_reports_not_loaded() {
        let registry = ModelRegistry::new();

        let err = registry.classify("hello", None).await.unwrap_err();
        assert!(matches!(err, Error::ModelNotLoaded));

        let err = registry.classify("hello", Some("keyword")).await.unwrap_err();
        assert!(matches!(err, Error::ModelNotLoaded));
    }

    #[tokio::test]
    async fn test_unknown_model_id() {
        let registry = ModelRegistry::from_config(&ModelsConfig::default()).unwrap();

        let err = registry.classify("hello", Some("svm")).await.unwrap_err();
        assert!(matches!(err, Error::UnknownModelId(ref id) if id == "svm"));
    }

    #[tokio::test]
    async fn test_default_and_named_dispatch() {
        let registry = ModelRegistry::from_config(&ModelsConfig::default()).unwrap();

        let result = registry
            .classify("SELAMAT! Anda menang undian! Transfer admin 500rb", None)
            .await
            .unwrap();
        assert_eq!(result.model_id, "keyword");
        assert_eq!(result.label, Label::Scam);

        let result = registry
            .classify("Meeting reminder: Tomorrow at 2 PM", Some("rules"))
            .await
            .unwrap();
        assert_eq!(result.model_id, "rules");
        assert_eq!(result.label, Label::Legitimate);
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_first_registered_is_default() {
        let mut registry = ModelRegistry::new();
        registry.register("a", Arc::new(RuleModel::default())).unwrap();
        registry.register("b", Arc::new(RuleModel::default())).unwrap();
        assert_eq!(registry.default_model(), Some("a"));

        registry.set_default("b").unwrap();
        assert_eq!(registry.default_model(), Some("b"));
        assert!(registry.set_default("c").is_err());
        assert!(registry.register("a", Arc::new(RuleModel::default())).is_err());
    }

    #[test]
    fn test_list_model_ids() {
        let registry = ModelRegistry::from_config(&ModelsConfig::default()).unwrap();
        let ids: Vec<_> = registry.list_model_ids().into_iter().collect();
        assert_eq!(ids, vec!["keyword", "keyword-strict", "rules"]);
    }

    #[test]
    fn test_rules_threshold_out_of_range_fails_to_load() {
        let yaml = r#"
models:
  - type: rules
    id: rules
    threshold: 1.5
"#;
        let config = ModelsConfig::from_yaml(yaml).unwrap();
        let err = ModelRegistry::from_config(&config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
