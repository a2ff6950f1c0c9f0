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

//! JSON snapshot source.
//!
//! Reads a file holding either a JSON array of flat objects or an object
//! with a `readings` array. This is the easiest way to feed sensor-smi from
//! any tool that can dump its sensors, and to replay captured batches.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::reading::Reading;
use crate::source::ReadingProvider;

#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    List(Vec<Reading>),
    Wrapped { readings: Vec<Reading> },
}

/// Parse the contents of a JSON snapshot.
pub fn parse_snapshot(json: &str) -> Result<Vec<Reading>> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    Ok(match snapshot {
        Snapshot::List(readings) => readings,
        Snapshot::Wrapped { readings } => readings,
    })
}

pub struct JsonSnapshotProvider {
    path: PathBuf,
}

impl JsonSnapshotProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReadingProvider for JsonSnapshotProvider {
    fn name(&self) -> &str {
        "json"
    }

    fn read_readings(&self) -> Result<Vec<Reading>> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::SourceUnavailable(format!("cannot read {}: {e}", self.path.display()))
        })?;
        parse_snapshot(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::{FieldAccess, FieldValue};
    use crate::resolve::{extract_role, FieldRole, MetricResolver};

    #[test]
    fn test_parse_array() {
        let readings = parse_snapshot(
            r#"[
                {"Label": "CPU Package Power [W]", "Value": "22.17"},
                {"Name": "Package Temperature", "CurValue": 61}
            ]"#,
        )
        .unwrap();

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[1].field("curvalue"), Some(&FieldValue::Integer(61)));
    }

    #[test]
    fn test_parse_wrapped() {
        let readings =
            parse_snapshot(r#"{"readings": [{"Sensor": "CPU Clock", "DisplayValue": "3500"}]}"#)
                .unwrap();
        assert_eq!(readings.len(), 1);
    }

    #[test]
    fn test_repeated_value_field_keeps_reading() {
        let readings =
            parse_snapshot(r#"[{"Label": "CPU Package Power", "Value": "22.17", "value": null}]"#)
                .unwrap();

        assert_eq!(
            extract_role(&readings[0], FieldRole::Value).as_deref(),
            Some("22.17")
        );
        let metrics = MetricResolver::default().resolve(&readings);
        assert_eq!(metrics.power.as_f64(), Some(22.17));
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(matches!(parse_snapshot("[1, 2]"), Err(Error::Json(_))));
        assert!(matches!(parse_snapshot("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let provider = JsonSnapshotProvider::new("/nonexistent/sensors.json");
        assert!(matches!(
            provider.read_readings(),
            Err(Error::SourceUnavailable(_))
        ));
    }
}
