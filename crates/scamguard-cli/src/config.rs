//! Harness configuration

use scamguard_classifiers::ModelsConfig;
use scamguard_harness::{PacingRange, StreamConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Harness configuration, loaded from YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Stream simulation settings
    #[serde(default)]
    pub stream: StreamSettings,

    /// Stress test settings
    #[serde(default)]
    pub stress: StressSettings,

    /// Model variants the registry loads
    #[serde(default)]
    pub models: ModelsConfig,

    /// Where relative export paths land
    #[serde(default)]
    pub export: ExportSettings,
}

impl HarnessConfig {
    /// Load configuration from file, or use defaults when it doesn't exist
    pub fn load(config_path: &Path) -> anyhow::Result<Self> {
        let config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.stream.pacing_min_ms > self.stream.pacing_max_ms {
            anyhow::bail!(
                "stream.pacing_min_ms ({}) exceeds stream.pacing_max_ms ({})",
                self.stream.pacing_min_ms,
                self.stream.pacing_max_ms
            );
        }
        if !(0.0..=1.0).contains(&self.stream.scam_bias) {
            anyhow::bail!("stream.scam_bias must be within [0, 1]");
        }
        Ok(())
    }

    /// Resolve an export path against the configured export directory
    pub fn export_path(&self, path: &Path) -> PathBuf {
        match &self.export.directory {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Stream simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSettings {
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,

    #[serde(default = "default_scam_bias")]
    pub scam_bias: f64,

    #[serde(default = "default_pacing_min_ms")]
    pub pacing_min_ms: u64,

    #[serde(default = "default_pacing_max_ms")]
    pub pacing_max_ms: u64,

    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            duration_secs: default_duration_secs(),
            scam_bias: default_scam_bias(),
            pacing_min_ms: default_pacing_min_ms(),
            pacing_max_ms: default_pacing_max_ms(),
            seed: None,
        }
    }
}

impl StreamSettings {
    /// Simulator configuration for these settings
    pub fn to_stream_config(&self) -> StreamConfig {
        StreamConfig {
            duration: Duration::from_secs(self.duration_secs),
            scam_bias: self.scam_bias,
            pacing: Some(PacingRange::new(
                Duration::from_millis(self.pacing_min_ms),
                Duration::from_millis(self.pacing_max_ms),
            )),
            seed: self.seed,
            model_id: None,
        }
    }
}

/// Stress test settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressSettings {
    #[serde(default = "default_message_count")]
    pub message_count: usize,

    #[serde(default = "default_progress_every")]
    pub progress_every: usize,
}

impl Default for StressSettings {
    fn default() -> Self {
        Self {
            message_count: default_message_count(),
            progress_every: default_progress_every(),
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Directory for relative `--export` paths
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

fn default_duration_secs() -> u64 {
    30
}

fn default_scam_bias() -> f64 {
    0.3
}

fn default_pacing_min_ms() -> u64 {
    500
}

fn default_pacing_max_ms() -> u64 {
    2000
}

fn default_message_count() -> usize {
    100
}

fn default_progress_every() -> usize {
    20
}
