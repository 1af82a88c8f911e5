//! Core types for ScamGuard

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binary verdict for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Scam,
    Legitimate,
}

impl Label {
    /// Both labels, scam first
    pub const ALL: [Label; 2] = [Label::Scam, Label::Legitimate];

    /// Map a boolean scam flag onto a label
    pub fn from_is_scam(is_scam: bool) -> Self {
        if is_scam {
            Self::Scam
        } else {
            Self::Legitimate
        }
    }

    pub fn is_scam(self) -> bool {
        self == Self::Scam
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scam => "scam",
            Self::Legitimate => "legitimate",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scam" | "spam" | "fraud" => Ok(Self::Scam),
            "legitimate" | "legit" | "ham" | "safe" => Ok(Self::Legitimate),
            other => Err(format!("Unknown label: {}", other)),
        }
    }
}

/// Result of one classifier call.
///
/// Serialized output also carries the derived `is_scam` flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ResultRepr")]
pub struct ClassificationResult {
    /// Predicted label
    pub label: Label,

    /// Confidence score (0.0-100.0)
    pub confidence: f64,

    /// Model that produced the prediction
    pub model_id: String,
}

impl ClassificationResult {
    /// Create a new classification result
    pub fn new(label: Label, confidence: f64, model_id: impl Into<String>) -> Self {
        Self {
            label,
            confidence,
            model_id: model_id.into(),
        }
    }

    pub fn is_scam(&self) -> bool {
        self.label.is_scam()
    }

    /// Reject results a well-behaved classifier can never produce
    pub fn validate(&self) -> Result<()> {
        if !self.confidence.is_finite() || !(0.0..=100.0).contains(&self.confidence) {
            return Err(Error::classification(format!(
                "confidence {} from model '{}' is outside [0, 100]",
                self.confidence, self.model_id
            )));
        }
        if self.model_id.is_empty() {
            return Err(Error::classification("result carries no model id"));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct ResultRepr {
    label: Label,
    is_scam: bool,
    confidence: f64,
    model_id: String,
}

impl From<ClassificationResult> for ResultRepr {
    fn from(result: ClassificationResult) -> Self {
        Self {
            is_scam: result.is_scam(),
            label: result.label,
            confidence: result.confidence,
            model_id: result.model_id,
        }
    }
}

/// One entry in a result log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// When the classification completed
    pub timestamp: DateTime<Utc>,

    /// Classified text
    pub message: String,

    /// Label the classifier produced
    pub predicted_label: Label,

    /// Confidence score (0.0-100.0)
    pub confidence: f64,

    /// Model that produced the prediction
    pub model_id: String,

    /// Known correct label, when the harness has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_label: Option<Label>,

    /// Suite category the message came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl LogRecord {
    /// Build a record from a classification of `message`
    pub fn from_result(message: impl Into<String>, result: &ClassificationResult) -> Self {
        Self {
            timestamp: Utc::now(),
            message: message.into(),
            predicted_label: result.label,
            confidence: result.confidence,
            model_id: result.model_id.clone(),
            actual_label: None,
            category: None,
        }
    }

    /// Override the completion time, for records rebuilt after the fact
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Attach a ground-truth label
    pub fn with_actual(mut self, label: Label) -> Self {
        self.actual_label = Some(label);
        self
    }

    /// Attach a suite category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_scam(&self) -> bool {
        self.predicted_label.is_scam()
    }

    /// Whether the prediction matched ground truth, if ground truth is known
    pub fn is_correct(&self) -> Option<bool> {
        self.actual_label.map(|actual| actual == self.predicted_label)
    }
}
