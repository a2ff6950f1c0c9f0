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

use std::io::Write;
use std::time::Duration;

use regex::RegexBuilder;
use tokio::time::MissedTickBehavior;

use crate::cli::{ListArgs, OutputFormat, WatchArgs};
use crate::common::config::EnvConfig;
use crate::error::{Error, Result};
use crate::view::data_collector::DataCollector;
use crate::view::sink::{write_index, MetricSink};

/// Poll the source every interval until Ctrl+C or `--count` polls.
///
/// A failed acquisition is reported to the sink and the loop carries on with
/// the next tick.
pub async fn run_watch_mode(
    collector: &DataCollector,
    args: &WatchArgs,
    sink: &mut dyn MetricSink,
) -> Result<()> {
    let interval_secs = EnvConfig::poll_interval_secs(args.interval);
    tracing::info!(
        "Polling {} every {interval_secs}s",
        collector.source_name()
    );

    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut polls: u64 = 0;
    loop {
        if args.count.is_some_and(|count| polls >= count) {
            return Ok(());
        }

        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping");
                return Ok(());
            }
        }

        poll_once(collector, sink).await?;
        polls += 1;
    }
}

/// One acquisition. Only sink I/O errors are returned; acquisition errors
/// are reported to the sink.
async fn poll_once(collector: &DataCollector, sink: &mut dyn MetricSink) -> Result<()> {
    match collector.collect().await {
        Ok(snapshot) => sink.publish(&snapshot)?,
        Err(e) => {
            tracing::warn!("Failed to read {}: {e}", collector.source_name());
            sink.report_failure(collector.source_name(), &e)?;
        }
    }
    Ok(())
}

/// Resolve once. Unlike watch mode an acquisition failure is returned.
pub async fn run_once_mode(collector: &DataCollector, sink: &mut dyn MetricSink) -> Result<()> {
    match collector.collect().await {
        Ok(snapshot) => {
            sink.publish(&snapshot)?;
            Ok(())
        }
        Err(e) => {
            sink.report_failure(collector.source_name(), &e)?;
            Err(e)
        }
    }
}

/// Print the reading index so users can see which labels a source uses.
pub async fn run_list_mode<W: Write>(
    collector: &DataCollector,
    args: &ListArgs,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let filter = args
        .filter
        .as_deref()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| Error::Config(format!("invalid --filter pattern: {e}")))
        })
        .transpose()?;

    let index = collector.collect_index().await?;
    let shown = write_index(out, &index, format, args.limit, filter.as_ref())?;
    tracing::debug!("Listed {shown} of {} readings", index.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::Reading;
    use crate::resolve::MetricResolver;
    use crate::source::ReadingProvider;
    use crate::view::data_collector::MetricsSnapshot;

    struct CountingSink {
        published: Vec<MetricsSnapshot>,
        failures: usize,
    }

    impl MetricSink for CountingSink {
        fn publish(&mut self, snapshot: &MetricsSnapshot) -> std::io::Result<()> {
            self.published.push(snapshot.clone());
            Ok(())
        }

        fn report_failure(&mut self, _source: &str, _error: &Error) -> std::io::Result<()> {
            self.failures += 1;
            Ok(())
        }
    }

    struct FlakyProvider;

    impl ReadingProvider for FlakyProvider {
        fn name(&self) -> &str {
            "flaky"
        }

        fn read_readings(&self) -> Result<Vec<Reading>> {
            Err(Error::SourceUnavailable("not running".to_string()))
        }
    }

    struct FixedProvider;

    impl ReadingProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn read_readings(&self) -> Result<Vec<Reading>> {
            Ok(vec![Reading::new()
                .with_field("Sensor", "CPU Clock")
                .with_field("DisplayValue", "3500")])
        }
    }

    fn sink() -> CountingSink {
        CountingSink {
            published: Vec::new(),
            failures: 0,
        }
    }

    #[tokio::test]
    async fn test_watch_stops_after_count() {
        let collector = DataCollector::new(Box::new(FixedProvider), MetricResolver::default());
        let args = WatchArgs {
            interval: Some(1),
            count: Some(1),
        };
        let mut sink = sink();
        run_watch_mode(&collector, &args, &mut sink).await.unwrap();

        assert_eq!(sink.published.len(), 1);
        assert_eq!(sink.published[0].metrics.frequency.as_f64(), Some(3500.0));
    }

    #[tokio::test]
    async fn test_watch_zero_count_never_polls() {
        let collector = DataCollector::new(Box::new(FixedProvider), MetricResolver::default());
        let args = WatchArgs {
            interval: Some(1),
            count: Some(0),
        };
        let mut sink = sink();
        run_watch_mode(&collector, &args, &mut sink).await.unwrap();

        assert!(sink.published.is_empty());
        assert_eq!(sink.failures, 0);
    }

    #[tokio::test]
    async fn test_watch_survives_acquisition_failure() {
        let collector = DataCollector::new(Box::new(FlakyProvider), MetricResolver::default());
        let args = WatchArgs {
            interval: Some(1),
            count: Some(1),
        };
        let mut sink = sink();
        run_watch_mode(&collector, &args, &mut sink).await.unwrap();

        assert_eq!(sink.failures, 1);
        assert!(sink.published.is_empty());
    }

    #[tokio::test]
    async fn test_once_returns_acquisition_error() {
        let collector = DataCollector::new(Box::new(FlakyProvider), MetricResolver::default());
        let mut sink = sink();
        let err = run_once_mode(&collector, &mut sink).await.unwrap_err();

        assert!(matches!(err, Error::SourceUnavailable(_)));
        assert_eq!(sink.failures, 1);
    }

    #[tokio::test]
    async fn test_list_rejects_bad_filter() {
        let collector = DataCollector::new(Box::new(FixedProvider), MetricResolver::default());
        let args = ListArgs {
            limit: 10,
            filter: Some("(".to_string()),
        };
        let mut out = Vec::new();
        let err = run_list_mode(&collector, &args, OutputFormat::Text, &mut out)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_list_json() {
        let collector = DataCollector::new(Box::new(FixedProvider), MetricResolver::default());
        let args = ListArgs {
            limit: 10,
            filter: Some("clock".to_string()),
        };
        let mut out = Vec::new();
        run_list_mode(&collector, &args, OutputFormat::Json, &mut out)
            .await
            .unwrap();

        let listed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(listed[0]["label"], "CPU Clock");
        assert_eq!(listed[0]["value"], "3500");
    }
}
