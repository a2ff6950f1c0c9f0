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

//! LibreHardwareMonitor WMI source.
//!
//! LibreHardwareMonitor (and its predecessor OpenHardwareMonitor) publishes
//! every sensor it knows through WMI. Sensor names repeat across types
//! ("CPU Package" exists as Temperature, Power and Clock), so each reading
//! gets a `Label` of `"<Name> <SensorType>"`.
//!
//! Reference: https://github.com/LibreHardwareMonitor/LibreHardwareMonitor
//!
//! Note: LibreHardwareMonitor must be running for this source to work.

use once_cell::sync::OnceCell;
use serde::Deserialize;
use wmi::WMIConnection;

use crate::error::{Error, Result};
use crate::reading::Reading;
use crate::source::ReadingProvider;

/// WMI structure for a LibreHardwareMonitor sensor.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct LhmSensor {
    /// Sensor name (e.g., "CPU Package", "CPU Core #1")
    name: Option<String>,
    /// Sensor type (e.g., "Temperature", "Power", "Clock")
    sensor_type: Option<String>,
    /// Unique path such as "/amdcpu/0/power/0"
    #[serde(default)]
    identifier: Option<String>,
    /// Parent hardware identifier
    #[serde(default)]
    parent: Option<String>,
    /// Current sensor value
    value: Option<f32>,
}

impl LhmSensor {
    fn into_reading(self) -> Reading {
        let label = match (&self.name, &self.sensor_type) {
            (Some(name), Some(kind)) => Some(format!("{name} {kind}")),
            (Some(name), None) => Some(name.clone()),
            _ => None,
        };
        Reading::new()
            .with_field("Label", label)
            .with_field("Name", self.name)
            .with_field("SensorType", self.sensor_type)
            .with_field("Identifier", self.identifier)
            .with_field("Parent", self.parent)
            .with_field("Value", self.value)
    }
}

/// Which namespace is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LhmNamespace {
    /// LibreHardwareMonitor namespace (newer versions)
    Libre,
    /// OpenHardwareMonitor namespace (older versions)
    Open,
}

impl LhmNamespace {
    fn path(self) -> &'static str {
        match self {
            LhmNamespace::Libre => "root\\LibreHardwareMonitor",
            LhmNamespace::Open => "root\\OpenHardwareMonitor",
        }
    }
}

/// LibreHardwareMonitor WMI reading provider.
///
/// WMIConnection is not Send + Sync, so only the detected namespace is
/// cached and a new connection is created for every batch.
pub struct LibreHardwareMonitorProvider {
    available_namespace: OnceCell<Option<LhmNamespace>>,
}

impl Default for LibreHardwareMonitorProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LibreHardwareMonitorProvider {
    pub fn new() -> Self {
        Self {
            available_namespace: OnceCell::new(),
        }
    }

    fn get_available_namespace(&self) -> Option<LhmNamespace> {
        *self.available_namespace.get_or_init(|| {
            [LhmNamespace::Libre, LhmNamespace::Open]
                .into_iter()
                .find(|ns| WMIConnection::with_namespace_path(ns.path()).is_ok())
        })
    }
}

impl ReadingProvider for LibreHardwareMonitorProvider {
    fn name(&self) -> &str {
        "lhm"
    }

    fn read_readings(&self) -> Result<Vec<Reading>> {
        let namespace = self.get_available_namespace().ok_or_else(|| {
            Error::SourceUnavailable(
                "LibreHardwareMonitor WMI namespace not found; is LibreHardwareMonitor running?"
                    .to_string(),
            )
        })?;

        let connection = WMIConnection::with_namespace_path(namespace.path())
            .map_err(|e| Error::SourceUnavailable(format!("WMI connection failed: {e}")))?;

        let sensors: Vec<LhmSensor> = connection
            .raw_query("SELECT Name, SensorType, Identifier, Parent, Value FROM Sensor")
            .map_err(|e| Error::SourceUnavailable(format!("WMI sensor query failed: {e}")))?;

        tracing::debug!("{} sensors from {}", sensors.len(), namespace.path());
        Ok(sensors.into_iter().map(LhmSensor::into_reading).collect())
    }
}
