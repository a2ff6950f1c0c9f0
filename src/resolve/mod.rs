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

//! Metric resolution engine.
//!
//! Turns a batch of heterogeneous readings into normalized metrics:
//!
//! 1. [`extractor`] picks the label and value field of each record.
//! 2. [`index`] builds a case-insensitive label -> value map.
//! 3. [`keywords`] finds the best entry for a keyword set in three tiers.
//! 4. [`numeric`] parses the raw value and rescales frequencies.
//!
//! [`MetricResolver`] runs the whole pipeline for power, temperature and
//! frequency.

pub mod extractor;
pub mod index;
pub mod keywords;
pub mod metric;
pub mod numeric;

pub use extractor::{extract, extract_role, FieldRole};
pub use index::{IndexEntry, ReadingIndex};
pub use keywords::{keyword_tokens, resolve, resolve_value, MatchTier, Resolution};
pub use metric::{MetricKind, MetricResolver, MetricValue, ResolvedMetrics};
pub use numeric::{parse_leading_number, rescale_frequency_mhz};
