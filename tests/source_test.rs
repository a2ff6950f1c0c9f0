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

//! File-based sources wired through the collector.

use std::io::Write;

use sensor_smi::prelude::*;
use sensor_smi::view::DataCollector;

fn temp_file(contents: &[u8], suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_json_snapshot_end_to_end() {
    let file = temp_file(
        br#"[
            {"Label": "CPU Package Power [W]", "Value": "22.17"},
            {"Name": "Package Temperature", "CurValue": 61},
            {"Sensor": "CPU Clock", "DisplayValue": 3500}
        ]"#,
        ".json",
    );

    let provider = create_provider(SourceKind::Json, Some(file.path())).unwrap();
    let collector = DataCollector::new(provider, MetricResolver::default());
    let snapshot = collector.collect().await.unwrap();

    assert_eq!(snapshot.source, "json");
    assert_eq!(snapshot.readings, 3);
    assert_eq!(snapshot.metrics.power.as_f64(), Some(22.17));
    assert_eq!(snapshot.metrics.temperature.as_f64(), Some(61.0));
    assert_eq!(snapshot.metrics.frequency.as_f64(), Some(3500.0));
}

#[tokio::test]
async fn test_csv_log_end_to_end() {
    let file = temp_file(
        "Date,Time,Core Clocks (avg) [MHz],CPU Package [°C],CPU Package Power [W]\n\
         18.10.2026,10:00:00,4012.3,58,19.80\n\
         18.10.2026,10:00:02,4100.0,61,22.17\n"
            .as_bytes(),
        ".csv",
    );

    let provider = create_provider(SourceKind::Csv, Some(file.path())).unwrap();
    let collector = DataCollector::new(provider, MetricResolver::default());
    let snapshot = collector.collect().await.unwrap();

    assert_eq!(snapshot.metrics.power.as_f64(), Some(22.17));
    // "CPU Package [°C]" only matches through the token tier ("package")
    assert_eq!(snapshot.metrics.temperature.as_f64(), Some(61.0));
    // "Core Clocks (avg) [MHz]" contains "clock"
    assert_eq!(snapshot.metrics.frequency.as_f64(), Some(4100.0));
}

#[tokio::test]
async fn test_missing_snapshot_is_an_acquisition_error() {
    let provider = create_provider(
        SourceKind::Json,
        Some(std::path::Path::new("/nonexistent/snapshot.json")),
    )
    .unwrap();
    let collector = DataCollector::new(provider, MetricResolver::default());

    let err = collector.collect().await.unwrap_err();
    assert!(matches!(err, Error::SourceUnavailable(_)));
}

#[test]
fn test_keyword_file_loading() {
    let file = temp_file(br#"{"frequency": ["effective clock"]}"#, ".json");
    let config = KeywordConfig::load(file.path()).unwrap();
    assert_eq!(config.frequency, vec!["effective clock".to_string()]);
    assert_eq!(config.power, KeywordConfig::default().power);
}
