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

//! Polling driver and presentation.
//!
//! The driver owns the schedule, the resolution engine owns the matching and
//! the sinks own the output format.

pub mod data_collector;
pub mod runner;
pub mod sink;

pub use data_collector::{DataCollector, MetricsSnapshot};
pub use runner::{run_list_mode, run_once_mode, run_watch_mode};
pub use sink::{create_stdout_sink, JsonSink, MetricSink, TextSink};
