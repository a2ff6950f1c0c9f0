use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::resolve::MetricKind;

/// Application configuration constants
pub struct AppConfig;

impl AppConfig {
    // Polling
    pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 3;
    pub const MIN_POLL_INTERVAL_SECS: u64 = 1;

    // Frequency unit inference (exclusive thresholds)
    pub const HZ_MAGNITUDE_THRESHOLD: f64 = 100_000.0;
    pub const KHZ_MAGNITUDE_THRESHOLD: f64 = 10_000.0;

    // Reading listing
    pub const DEFAULT_LIST_LIMIT: usize = 200;
    pub const LIST_LABEL_WIDTH: usize = 48;
}

/// Environment-specific configuration
pub struct EnvConfig;

impl EnvConfig {
    /// Clamp a user supplied poll interval to something the sources can keep up with.
    pub fn poll_interval_secs(requested: Option<u64>) -> u64 {
        requested
            .unwrap_or(AppConfig::DEFAULT_POLL_INTERVAL_SECS)
            .max(AppConfig::MIN_POLL_INTERVAL_SECS)
    }

    /// Default log filter, overridable through `RUST_LOG`.
    pub fn default_log_filter(verbose: bool) -> &'static str {
        if verbose {
            "sensor_smi=debug"
        } else {
            "sensor_smi=info"
        }
    }
}

fn default_power_keywords() -> Vec<String> {
    to_owned(&[
        "package power",
        "cpu package power",
        "cpu package",
        "cpu package watt",
        "power [w]",
        "power",
    ])
}

fn default_temperature_keywords() -> Vec<String> {
    to_owned(&[
        "package temp",
        "cpu package temp",
        "cpu package temperature",
        "package temperature",
        "temp",
        "temperature",
    ])
}

fn default_frequency_keywords() -> Vec<String> {
    to_owned(&[
        "package clock",
        "cpu package clock",
        "cpu frequency",
        "cpu clock",
        "clock",
        "freq",
        "mhz",
    ])
}

fn to_owned(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| k.to_string()).collect()
}

/// Priority-ordered keyword sets, most specific phrase first.
///
/// Can be overridden from a JSON file; lists missing from the file keep
/// their defaults.
///
/// ```json
/// { "power": ["cpu package power", "package power", "power"] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    pub power: Vec<String>,
    pub temperature: Vec<String>,
    pub frequency: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            power: default_power_keywords(),
            temperature: default_temperature_keywords(),
            frequency: default_frequency_keywords(),
        }
    }
}

impl KeywordConfig {
    pub fn for_metric(&self, kind: MetricKind) -> &[String] {
        match kind {
            MetricKind::Power => &self.power,
            MetricKind::Temperature => &self.temperature,
            MetricKind::Frequency => &self.frequency,
        }
    }

    /// Parse and validate a JSON keyword file's contents.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: KeywordConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load keyword overrides from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read keyword file {}: {e}", path.display()))
        })?;
        Self::from_json_str(&contents)
    }

    /// Every metric needs at least one non-blank keyword.
    pub fn validate(&self) -> Result<()> {
        for kind in MetricKind::ALL {
            if self
                .for_metric(kind)
                .iter()
                .all(|keyword| keyword.trim().is_empty())
            {
                return Err(Error::Config(format!("keyword set '{kind}' is empty")));
            }
        }
        Ok(())
    }
}
