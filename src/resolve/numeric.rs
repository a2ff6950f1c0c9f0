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

// Tolerant numeric parsing for sensor values with embedded units

use crate::common::config::AppConfig;

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | ',' | '+' | '-' | 'e' | 'E')
}

/// Parse the leading number of a sensor value (e.g., "45.3 W", "45,3" or "3.5e2C").
///
/// The longest prefix made of digits, `.`, `,`, `+`, `-`, `e` and `E` is
/// kept, commas become decimal points and the result is parsed with the
/// locale-independent `f64` grammar.
/// Returns None for an empty prefix, an invalid literal or a non-finite value.
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !is_number_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());

    let prefix = &trimmed[..end];
    if prefix.is_empty() {
        return None;
    }

    prefix
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Bring a frequency of unknown unit into MHz by its magnitude.
///
/// Anything above 100,000 is taken as Hz and anything above 10,000 as kHz.
/// This is a heuristic: a genuine 50,000 Hz reading would come out as 50 MHz.
pub fn rescale_frequency_mhz(value: f64) -> f64 {
    if value > AppConfig::HZ_MAGNITUDE_THRESHOLD {
        value / 1_000_000.0
    } else if value > AppConfig::KHZ_MAGNITUDE_THRESHOLD {
        value / 1_000.0
    } else {
        value
    }
}
