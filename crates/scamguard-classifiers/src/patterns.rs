//! Weighted keyword model

use crate::classifier::{sigmoid, ModelVerdict, ScamModel};
use aho_corasick::AhoCorasick;
use scamguard_core::Result;
use std::time::Instant;

/// Keyword scorer using the Aho-Corasick algorithm.
///
/// Every distinct keyword found adds its weight to a running score; the
/// score is shifted by `bias` and squashed into a probability.
pub struct KeywordModel {
    name: String,
    patterns: AhoCorasick,
    weights: Vec<f64>,
    bias: f64,
    threshold: f64,
}

impl KeywordModel {
    /// Create a new keyword model from `(keyword, weight)` pairs
    pub fn new(
        name: impl Into<String>,
        keywords: Vec<(String, f64)>,
        bias: f64,
        threshold: f64,
    ) -> Result<Self> {
        let name = name.into();
        if !(0.0..=1.0).contains(&threshold) {
            return Err(scamguard_core::Error::config(format!(
                "Threshold for model '{}' must be within [0, 1], got {}",
                name, threshold
            )));
        }

        let (pattern_strs, weights): (Vec<_>, Vec<_>) = keywords.into_iter().unzip();

        let ac = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&pattern_strs)
            .map_err(|e| {
                scamguard_core::Error::config(format!("Failed to build keyword matcher: {}", e))
            })?;

        Ok(Self {
            name,
            patterns: ac,
            weights,
            bias,
            threshold,
        })
    }

    /// Keyword model seeded with common lottery, phishing, loan and
    /// investment scam vocabulary (English and Indonesian)
    pub fn with_default_keywords(name: impl Into<String>) -> Result<Self> {
        let keywords = DEFAULT_KEYWORDS
            .iter()
            .map(|(kw, w)| (kw.to_string(), *w))
            .collect();
        Self::new(name, keywords, 1.5, 0.5)
    }

    /// Replace the bias and decision threshold
    pub fn set_decision(&mut self, bias: f64, threshold: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(scamguard_core::Error::config(format!(
                "Threshold for model '{}' must be within [0, 1], got {}",
                self.name, threshold
            )));
        }
        self.bias = bias;
        self.threshold = threshold;
        Ok(())
    }

    fn score(&self, text: &str) -> (f64, Vec<(usize, usize)>) {
        let mut seen = vec![false; self.weights.len()];
        let mut spans = Vec::new();
        let mut total = 0.0;

        for m in self.patterns.find_iter(text) {
            let idx = m.pattern().as_usize();
            spans.push((m.start(), m.end()));
            if !seen[idx] {
                seen[idx] = true;
                total += self.weights[idx];
            }
        }

        (total, spans)
    }
}

#[async_trait::async_trait]
impl ScamModel for KeywordModel {
    async fn classify(&self, text: &str) -> Result<ModelVerdict> {
        let start = Instant::now();

        let (score, spans) = self.score(text);
        let mut verdict = ModelVerdict::new(sigmoid(score - self.bias), self.threshold);
        verdict.spans = spans;
        verdict.latency_us = start.elapsed().as_micros() as u64;

        Ok(verdict)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub(crate) const DEFAULT_KEYWORDS: &[(&str, f64)] = &[
    ("selamat", 0.8),
    ("menang", 1.2),
    ("hadiah", 1.0),
    ("undian", 1.2),
    ("transfer", 0.9),
    ("admin", 0.7),
    ("investasi", 0.8),
    ("dijamin", 1.2),
    ("pinjaman", 0.9),
    ("cair", 0.8),
    ("tanpa jaminan", 1.0),
    ("bunga 0%", 1.2),
    ("diblokir", 1.0),
    ("verifikasi", 0.8),
    ("congratulations", 0.9),
    ("you won", 1.4),
    ("winner", 1.0),
    ("lottery", 1.2),
    ("jackpot", 1.2),
    ("prize", 1.0),
    ("free", 0.6),
    ("guaranteed", 1.2),
    ("urgent", 0.7),
    ("click here", 1.0),
    ("processing fee", 1.3),
    ("account will be blocked", 1.5),
    ("profit", 0.6),
    ("return guaranteed", 1.0),
];
