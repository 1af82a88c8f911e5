//! Configuration for built-in model variants

use crate::patterns::DEFAULT_KEYWORDS;
use serde::{Deserialize, Serialize};

/// Configuration for every model the registry should load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Model definitions, registered in order
    #[serde(default)]
    pub models: Vec<ModelSpec>,

    /// Model used when a caller does not name one
    #[serde(default)]
    pub default_model: Option<String>,
}

/// One model variant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSpec {
    /// Weighted keyword matching
    Keyword {
        id: String,
        #[serde(default)]
        keywords: Vec<KeywordSpec>,
        #[serde(default = "default_keyword_bias")]
        bias: f64,
        #[serde(default = "default_threshold")]
        threshold: f64,
    },

    /// Structural regex signals
    Rules {
        id: String,
        #[serde(default = "default_threshold")]
        threshold: f64,
    },
}

/// A keyword and the weight it contributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordSpec {
    pub pattern: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl ModelSpec {
    pub fn id(&self) -> &str {
        match self {
            Self::Keyword { id, .. } | Self::Rules { id, .. } => id,
        }
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        let default_keywords: Vec<KeywordSpec> = DEFAULT_KEYWORDS
            .iter()
            .map(|(pattern, weight)| KeywordSpec {
                pattern: pattern.to_string(),
                weight: *weight,
            })
            .collect();

        Self {
            models: vec![
                ModelSpec::Keyword {
                    id: "keyword".to_string(),
                    keywords: default_keywords.clone(),
                    bias: default_keyword_bias(),
                    threshold: default_threshold(),
                },
                ModelSpec::Keyword {
                    id: "keyword-strict".to_string(),
                    keywords: default_keywords,
                    bias: 2.5,
                    threshold: 0.6,
                },
                ModelSpec::Rules {
                    id: "rules".to_string(),
                    threshold: default_threshold(),
                },
            ],
            default_model: Some("keyword".to_string()),
        }
    }
}

impl ModelsConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> scamguard_core::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| {
            scamguard_core::Error::config(format!("Failed to parse models config: {}", e))
        })
    }

    /// Get all model ids in registration order
    pub fn model_ids(&self) -> Vec<String> {
        self.models.iter().map(|m| m.id().to_string()).collect()
    }
}

fn default_keyword_bias() -> f64 {
    1.5
}

fn default_threshold() -> f64 {
    0.5
}

fn default_weight() -> f64 {
    1.0
}
