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

//! Pick the label-like and value-like field out of an unknown record.
//!
//! Lookup happens in two phases:
//! 1. Exact candidate names in priority order (case-insensitive).
//! 2. The first field, in natural order, whose name contains one of the
//!    role's hint substrings.

use crate::reading::{FieldAccess, FieldValue};

/// Exact field names that carry a sensor label, highest priority first.
pub const LABEL_FIELDS: &[&str] = &["Label", "Name", "Sensor", "Caption"];

/// Exact field names that carry a current value, highest priority first.
pub const VALUE_FIELDS: &[&str] = &["Value", "CurValue", "Current", "DisplayValue"];

const LABEL_HINTS: &[&str] = &["label", "name", "sensor"];
const VALUE_HINTS: &[&str] = &["value", "cur", "display"];

/// The part a field plays in a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Label,
    Value,
}

impl FieldRole {
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            FieldRole::Label => LABEL_FIELDS,
            FieldRole::Value => VALUE_FIELDS,
        }
    }

    pub fn hints(self) -> &'static [&'static str] {
        match self {
            FieldRole::Label => LABEL_HINTS,
            FieldRole::Value => VALUE_HINTS,
        }
    }
}

/// Extract the string for `role` using the built-in candidate tables.
pub fn extract_role<R: FieldAccess + ?Sized>(reading: &R, role: FieldRole) -> Option<String> {
    extract(reading, role.candidates(), role.hints())
}

/// Extract the best-available string from `reading`.
///
/// Null fields never match, in either phase. A non-null empty string does
/// match; callers decide whether empty is usable.
pub fn extract<R: FieldAccess + ?Sized>(
    reading: &R,
    candidates: &[&str],
    hints: &[&str],
) -> Option<String> {
    for name in candidates {
        if let Some(text) = reading.field(name).and_then(FieldValue::to_text) {
            return Some(text);
        }
    }

    let hints: Vec<String> = hints.iter().map(|h| h.to_lowercase()).collect();
    reading
        .fields()
        .filter(|(_, value)| !value.is_null())
        .find(|(name, _)| {
            let name = name.to_lowercase();
            hints.iter().any(|hint| name.contains(hint.as_str()))
        })
        .and_then(|(_, value)| value.to_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::Reading;

    #[test]
    fn test_exact_candidate_priority() {
        // Both "Name" and "Label" exist; "Label" is listed first
        let reading = Reading::new()
            .with_field("Name", "second")
            .with_field("Label", "first");
        assert_eq!(
            extract_role(&reading, FieldRole::Label).as_deref(),
            Some("first")
        );
    }

    #[test]
    fn test_exact_candidate_ignores_case() {
        let reading = Reading::new().with_field("CURVALUE", 61i64);
        assert_eq!(extract_role(&reading, FieldRole::Value).as_deref(), Some("61"));
    }

    #[test]
    fn test_null_candidate_falls_through() {
        let reading = Reading::new()
            .with_field("Value", FieldValue::Null)
            .with_field("Current", "1.2 V");
        assert_eq!(
            extract_role(&reading, FieldRole::Value).as_deref(),
            Some("1.2 V")
        );
    }

    #[test]
    fn test_substring_fallback_uses_natural_order() {
        let reading = Reading::new()
            .with_field("SensorType", "Power")
            .with_field("ReadingLabel", "CPU Package Power");
        // "SensorType" contains "sensor" and comes first
        assert_eq!(
            extract_role(&reading, FieldRole::Label).as_deref(),
            Some("Power")
        );
    }

    #[test]
    fn test_substring_fallback_skips_null() {
        let reading = Reading::new()
            .with_field("RawValue", FieldValue::Null)
            .with_field("ValueNow", 12.5);
        assert_eq!(
            extract_role(&reading, FieldRole::Value).as_deref(),
            Some("12.5")
        );
    }

    #[test]
    fn test_value_role_does_not_pick_label_fields() {
        let reading = Reading::new().with_field("SensorName", "CPU Clock");
        assert_eq!(extract_role(&reading, FieldRole::Value), None);
    }

    #[test]
    fn test_nothing_matches() {
        let reading = Reading::new().with_field("id", 7i64).with_field("unit", "W");
        assert_eq!(extract_role(&reading, FieldRole::Label), None);
        assert_eq!(extract_role(&reading, FieldRole::Value), None);
    }

    #[test]
    fn test_custom_candidates() {
        let reading = Reading::new()
            .with_field("szLabelUser", "CPU Package Power")
            .with_field("Value", 22.17);
        assert_eq!(
            extract(&reading, &["szLabelUser"], &[]).as_deref(),
            Some("CPU Package Power")
        );
    }
}
