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

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::reading::Reading;
use crate::resolve::{MetricResolver, ReadingIndex, ResolvedMetrics};
use crate::source::ReadingProvider;

/// Everything produced by one poll.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    /// Readings returned by the provider.
    pub readings: usize,
    /// Readings that made it into the index.
    pub indexed: usize,
    pub metrics: ResolvedMetrics,
}

/// Pairs a provider with the resolver and turns each acquisition into a
/// [`MetricsSnapshot`].
pub struct DataCollector {
    provider: Arc<dyn ReadingProvider>,
    resolver: MetricResolver,
}

impl DataCollector {
    pub fn new(provider: Box<dyn ReadingProvider>, resolver: MetricResolver) -> Self {
        Self {
            provider: Arc::from(provider),
            resolver,
        }
    }

    pub fn source_name(&self) -> &str {
        self.provider.name()
    }

    /// Fetch one batch on a blocking worker; providers may wait on files or WMI.
    pub async fn acquire(&self) -> Result<Vec<Reading>> {
        let provider = Arc::clone(&self.provider);
        tokio::task::spawn_blocking(move || provider.read_readings())
            .await
            .map_err(|e| Error::SourceUnavailable(format!("reading task failed: {e}")))?
    }

    /// Resolve a batch that is already in memory.
    pub fn snapshot(&self, readings: &[Reading]) -> MetricsSnapshot {
        let index = ReadingIndex::build(readings);
        MetricsSnapshot {
            timestamp: Utc::now(),
            source: self.source_name().to_string(),
            readings: readings.len(),
            indexed: index.len(),
            metrics: self.resolver.resolve_index(&index),
        }
    }

    /// Acquire and resolve. A failed acquisition never reaches the resolver.
    pub async fn collect(&self) -> Result<MetricsSnapshot> {
        let readings = self.acquire().await?;
        tracing::debug!("{} returned {} readings", self.source_name(), readings.len());
        Ok(self.snapshot(&readings))
    }

    /// Acquire and index without resolving, for listing.
    pub async fn collect_index(&self) -> Result<ReadingIndex> {
        let readings = self.acquire().await?;
        Ok(ReadingIndex::build(&readings))
    }
}
