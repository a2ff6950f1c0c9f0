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

//! Reading sources.
//!
//! A [`ReadingProvider`] returns the current batch of [`Reading`]s from some
//! hardware-monitoring source. Providers may block on file or WMI I/O; the
//! resolution engine only ever sees the materialized batch.

pub mod csv_log;
#[cfg(target_os = "linux")]
pub mod hwmon;
pub mod json;
#[cfg(target_os = "windows")]
pub mod libre_hwmon;
pub mod system_sensors;

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::reading::Reading;

pub use csv_log::CsvLogProvider;
#[cfg(target_os = "linux")]
pub use hwmon::HwmonProvider;
pub use json::JsonSnapshotProvider;
#[cfg(target_os = "windows")]
pub use libre_hwmon::LibreHardwareMonitorProvider;
pub use system_sensors::SysinfoProvider;

/// Trait for acquiring sensor readings.
///
/// Implementations must be thread-safe (`Send + Sync`) so the polling loop
/// can run them on a blocking worker thread.
///
/// # Example
///
/// ```rust,no_run
/// use sensor_smi::source::{JsonSnapshotProvider, ReadingProvider};
///
/// let provider = JsonSnapshotProvider::new("readings.json");
/// match provider.read_readings() {
///     Ok(readings) => println!("{}: {} readings", provider.name(), readings.len()),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
pub trait ReadingProvider: Send + Sync {
    /// Short identifier used in logs and output.
    fn name(&self) -> &str;

    /// Return the current collection of readings.
    fn read_readings(&self) -> Result<Vec<Reading>>;
}

/// Which reading source to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceKind {
    /// Best local source for this platform.
    Auto,
    /// Temperature components and CPU clocks through sysinfo.
    Sysinfo,
    /// Linux hwmon sysfs tree.
    Hwmon,
    /// JSON snapshot file (array of flat objects).
    Json,
    /// HWiNFO-style CSV sensor log; the last row is used.
    Csv,
    /// LibreHardwareMonitor / OpenHardwareMonitor WMI (Windows).
    Lhm,
}

impl SourceKind {
    /// Resolve [`SourceKind::Auto`] for the current platform.
    pub fn detect(self) -> SourceKind {
        if self != SourceKind::Auto {
            return self;
        }
        if cfg!(target_os = "windows") {
            SourceKind::Lhm
        } else if cfg!(target_os = "linux") {
            SourceKind::Hwmon
        } else {
            SourceKind::Sysinfo
        }
    }
}

fn required_path(kind: SourceKind, path: Option<&Path>) -> Result<PathBuf> {
    path.map(Path::to_path_buf)
        .ok_or_else(|| Error::Config(format!("source '{kind:?}' requires --path")))
}

/// Create the provider for `kind`.
///
/// File based sources need `path`; for hwmon it optionally overrides the
/// sysfs root.
pub fn create_provider(kind: SourceKind, path: Option<&Path>) -> Result<Box<dyn ReadingProvider>> {
    match kind.detect() {
        SourceKind::Json => Ok(Box::new(JsonSnapshotProvider::new(required_path(
            SourceKind::Json,
            path,
        )?))),
        SourceKind::Csv => Ok(Box::new(CsvLogProvider::new(required_path(
            SourceKind::Csv,
            path,
        )?))),
        // detect() never returns Auto
        SourceKind::Sysinfo | SourceKind::Auto => Ok(Box::new(SysinfoProvider::new())),
        SourceKind::Hwmon => {
            #[cfg(target_os = "linux")]
            {
                Ok(Box::new(match path {
                    Some(root) => HwmonProvider::with_root(root),
                    None => HwmonProvider::new(),
                }))
            }
            #[cfg(not(target_os = "linux"))]
            {
                Err(Error::NotSupported("hwmon sysfs sensors".to_string()))
            }
        }
        SourceKind::Lhm => {
            #[cfg(target_os = "windows")]
            {
                Ok(Box::new(LibreHardwareMonitorProvider::new()))
            }
            #[cfg(not(target_os = "windows"))]
            {
                Err(Error::NotSupported("LibreHardwareMonitor WMI sensors".to_string()))
            }
        }
    }
}
