//! Structural signal model

use crate::classifier::{sigmoid, ModelVerdict, ScamModel};
use regex::Regex;
use scamguard_core::Result;
use std::time::Instant;

/// Scam detector built from structural regex signals: links, phone numbers,
/// money amounts, urgency words and shouting.
pub struct RuleModel {
    name: String,
    url_regex: Regex,
    phone_regex: Regex,
    money_regex: Regex,
    urgency_regex: Regex,
    bias: f64,
    threshold: f64,
}

impl RuleModel {
    /// Create a new rule model
    pub fn new(name: impl Into<String>, threshold: f64) -> Result<Self> {
        let name = name.into();
        if !(0.0..=1.0).contains(&threshold) {
            return Err(scamguard_core::Error::config(format!(
                "Threshold for model '{}' must be within [0, 1], got {}",
                name, threshold
            )));
        }

        Ok(Self {
            name,
            url_regex: Regex::new(r"(?i)\b(?:https?://|www\.|bit\.ly/)\S+")
                .map_err(|e| scamguard_core::Error::config(format!("Failed to compile url regex: {}", e)))?,
            phone_regex: Regex::new(r"\b(?:\+?62|0)8\d{8,11}\b")
                .map_err(|e| scamguard_core::Error::config(format!("Failed to compile phone regex: {}", e)))?,
            money_regex: Regex::new(r"(?i)(?:rp\.?\s?\d[\d.,]*|\$\s?\d[\d.,]*|\d+\s?(?:juta|jt|rb|ribu)\b)")
                .map_err(|e| scamguard_core::Error::config(format!("Failed to compile money regex: {}", e)))?,
            urgency_regex: Regex::new(r"(?i)\b(?:urgent|segera|sekarang|now|immediately|asap|limited|terbatas)\b")
                .map_err(|e| scamguard_core::Error::config(format!("Failed to compile urgency regex: {}", e)))?,
            bias: 2.0,
            threshold,
        })
    }

    fn signals(&self, text: &str) -> (f64, Vec<(usize, usize)>) {
        let mut spans = Vec::new();
        let mut score = 0.0;

        if let Some(mat) = self.url_regex.find(text) {
            score += 1.2;
            spans.push((mat.start(), mat.end()));
        }

        if let Some(mat) = self.phone_regex.find(text) {
            score += 1.0;
            spans.push((mat.start(), mat.end()));
        }

        let money: Vec<_> = self.money_regex.find_iter(text).collect();
        if !money.is_empty() {
            score += 0.8 + 0.4 * (money.len().min(3) - 1) as f64;
            spans.extend(money.iter().map(|m| (m.start(), m.end())));
        }

        if let Some(mat) = self.urgency_regex.find(text) {
            score += 0.7;
            spans.push((mat.start(), mat.end()));
        }

        let exclamations = text.matches('!').count();
        if exclamations >= 2 {
            score += 0.5;
        }

        if shouting_ratio(text) > 0.6 {
            score += 0.6;
        }

        (score, spans)
    }
}

impl Default for RuleModel {
    fn default() -> Self {
        Self::new("rules", 0.5).expect("Failed to create rule model")
    }
}

/// Share of alphabetic characters that are uppercase
fn shouting_ratio(text: &str) -> f64 {
    let letters = text.chars().filter(|c| c.is_alphabetic()).count();
    if letters < 6 {
        return 0.0;
    }
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    upper as f64 / letters as f64
}

#[async_trait::async_trait]
impl ScamModel for RuleModel {
    async fn classify(&self, text: &str) -> Result<ModelVerdict> {
        let start = Instant::now();

        let (score, spans) = self.signals(text);
        let mut verdict = ModelVerdict::new(sigmoid(score - self.bias), self.threshold);
        verdict.spans = spans;
        verdict.latency_us = start.elapsed().as_micros() as u64;

        Ok(verdict)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
