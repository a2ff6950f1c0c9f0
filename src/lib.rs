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

//! # sensor-smi
//!
//! Resolve CPU package power, package temperature and clock frequency from
//! whatever labeled sensor readings a monitoring source exposes.
//!
//! Sources label the same quantity in many ways ("CPU Package Power [W]",
//! "Package Power", "PPT", ...). sensor-smi indexes a batch of readings by
//! label, finds each metric through a prioritized keyword search, and
//! normalizes the raw value into W, °C or MHz.
//!
//! ```rust
//! use sensor_smi::prelude::*;
//!
//! let readings = vec![
//!     Reading::new()
//!         .with_field("Label", "Socket Power [W]")
//!         .with_field("Value", "22.17"),
//!     Reading::new()
//!         .with_field("Name", "Core Temp")
//!         .with_field("CurValue", "61"),
//! ];
//!
//! let metrics = MetricResolver::default().resolve(&readings);
//! assert_eq!(metrics.power.as_f64(), Some(22.17));
//! assert_eq!(metrics.temperature.as_f64(), Some(61.0));
//! assert_eq!(metrics.frequency, MetricValue::NotFound);
//! ```

pub mod cli;
pub mod error;
pub mod prelude;
pub mod reading;
pub mod resolve;
pub mod source;
pub mod view;

pub mod common {
    pub mod config;
}
