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

//! Error types for the sensor-smi library.
//!
//! Only acquisition and configuration can fail. Metric resolution itself is
//! total: a metric that cannot be found or parsed is reported as a value
//! (see [`crate::resolve::MetricValue`]), never as an [`Error`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The reading source could not be reached.
    ///
    /// Typical causes are a monitoring application that is not running
    /// (LibreHardwareMonitor, HWiNFO logging) or a missing snapshot file.
    #[error("Reading source unavailable: {0}")]
    SourceUnavailable(String),

    /// A snapshot file did not contain valid JSON readings.
    #[error("Invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// A sensor log could not be read as CSV.
    #[error("Invalid CSV sensor log: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid configuration, e.g. an empty keyword set.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The requested source does not exist on this platform.
    #[error("Feature not supported on this platform: {0}")]
    NotSupported(String),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
