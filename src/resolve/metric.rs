// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};

use crate::common::config::KeywordConfig;
use crate::reading::FieldAccess;
use crate::resolve::index::ReadingIndex;
use crate::resolve::keywords::resolve;
use crate::resolve::numeric::{parse_leading_number, rescale_frequency_mhz};

/// The logical metrics sensor-smi knows how to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Power,
    Temperature,
    Frequency,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [
        MetricKind::Power,
        MetricKind::Temperature,
        MetricKind::Frequency,
    ];

    /// Canonical unit of the normalized value.
    pub fn unit(self) -> &'static str {
        match self {
            MetricKind::Power => "W",
            MetricKind::Temperature => "°C",
            MetricKind::Frequency => "MHz",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            MetricKind::Power => "Package power",
            MetricKind::Temperature => "Package temperature",
            MetricKind::Frequency => "Frequency",
        }
    }

    /// Parse a raw value and bring it into [`MetricKind::unit`].
    pub fn normalize(self, raw: &str) -> Option<f64> {
        let value = parse_leading_number(raw)?;
        match self {
            MetricKind::Frequency => Some(rescale_frequency_mhz(value)),
            MetricKind::Power | MetricKind::Temperature => Some(value),
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricKind::Power => write!(f, "power"),
            MetricKind::Temperature => write!(f, "temperature"),
            MetricKind::Frequency => write!(f, "frequency"),
        }
    }
}

/// Outcome of resolving one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetricValue {
    /// Found and parsed into the canonical unit.
    Normalized { value: f64, unit: &'static str },
    /// Found, but the value has no leading number.
    Raw { raw: String },
    /// No reading matched the keyword set.
    NotFound,
}

impl MetricValue {
    /// Turn an optional raw value into a metric value for `kind`.
    pub fn from_raw(kind: MetricKind, raw: Option<&str>) -> Self {
        match raw {
            None => MetricValue::NotFound,
            Some(raw) => match kind.normalize(raw) {
                Some(value) => MetricValue::Normalized {
                    value,
                    unit: kind.unit(),
                },
                None => MetricValue::Raw {
                    raw: raw.to_string(),
                },
            },
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Normalized { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, MetricValue::NotFound)
    }
}

/// The three metrics resolved from one batch of readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedMetrics {
    pub power: MetricValue,
    pub temperature: MetricValue,
    pub frequency: MetricValue,
}

impl ResolvedMetrics {
    pub fn not_found() -> Self {
        Self {
            power: MetricValue::NotFound,
            temperature: MetricValue::NotFound,
            frequency: MetricValue::NotFound,
        }
    }

    pub fn get(&self, kind: MetricKind) -> &MetricValue {
        match kind {
            MetricKind::Power => &self.power,
            MetricKind::Temperature => &self.temperature,
            MetricKind::Frequency => &self.frequency,
        }
    }

    fn slot_mut(&mut self, kind: MetricKind) -> &mut MetricValue {
        match kind {
            MetricKind::Power => &mut self.power,
            MetricKind::Temperature => &mut self.temperature,
            MetricKind::Frequency => &mut self.frequency,
        }
    }
}

/// Resolves power, temperature and frequency from a batch of readings.
///
/// The resolver holds no state between calls; every call builds a fresh
/// [`ReadingIndex`].
#[derive(Debug, Clone, Default)]
pub struct MetricResolver {
    keywords: KeywordConfig,
}

impl MetricResolver {
    pub fn new(keywords: KeywordConfig) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &KeywordConfig {
        &self.keywords
    }

    /// Build the index for `readings` and resolve every metric.
    pub fn resolve<R: FieldAccess>(&self, readings: &[R]) -> ResolvedMetrics {
        let index = ReadingIndex::build(readings);
        tracing::debug!("Indexed {} of {} readings", index.len(), readings.len());
        self.resolve_index(&index)
    }

    /// Resolve every metric against an existing index.
    pub fn resolve_index(&self, index: &ReadingIndex) -> ResolvedMetrics {
        let mut metrics = ResolvedMetrics::not_found();
        for kind in MetricKind::ALL {
            *metrics.slot_mut(kind) = self.resolve_metric(index, kind);
        }
        metrics
    }

    /// Resolve a single metric.
    pub fn resolve_metric(&self, index: &ReadingIndex, kind: MetricKind) -> MetricValue {
        let resolution = resolve(index, self.keywords.for_metric(kind));
        match &resolution {
            Some(found) => tracing::debug!(
                "{kind}: '{}' = '{}' ({} match on '{}')",
                found.label,
                found.value,
                found.tier,
                found.pattern
            ),
            None => tracing::debug!("{kind}: no matching reading"),
        }
        MetricValue::from_raw(kind, resolution.map(|found| found.value))
    }
}
