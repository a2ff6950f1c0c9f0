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

//! Schema-less sensor reading records.
//!
//! Every monitoring tool names its fields differently (`Label`, `Name`,
//! `Sensor`, `CurValue`, `DisplayValue`, ...). Providers therefore convert
//! whatever they receive into a [`Reading`]: an ordered list of named scalar
//! fields. Code that only needs to look fields up goes through the
//! [`FieldAccess`] trait so it never depends on a concrete record shape.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single scalar field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// String form of the value, `None` for null.
    ///
    /// Numbers use Rust's shortest round-trip formatting, so `22.17` stays
    /// `"22.17"` and `3500.0` becomes `"3500"`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Float(f) => Some(f.to_string()),
            FieldValue::Text(s) => Some(s.clone()),
        }
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    FieldValue::Float(f)
                } else {
                    FieldValue::Text(n.to_string())
                }
            }
            Value::String(s) => FieldValue::Text(s),
            // Nested structures are kept as their JSON text
            other => FieldValue::Text(other.to_string()),
        }
    }
}

impl From<&FieldValue> for serde_json::Value {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Integer(i) => serde_json::Value::from(*i),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        // Go through the decimal form so 61.3f32 does not become 61.29999923706055
        value
            .to_string()
            .parse::<f64>()
            .map(FieldValue::Float)
            .unwrap_or(FieldValue::Null)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(FieldValue::Integer)
            .unwrap_or_else(|_| FieldValue::Text(value.to_string()))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Named-field access over a reading record.
///
/// Field names are matched case-insensitively and enumerated in the record's
/// natural order.
pub trait FieldAccess {
    /// All fields in natural order.
    fn fields(&self) -> Box<dyn Iterator<Item = (&str, &FieldValue)> + '_>;

    /// Look a field up by name, ignoring case.
    ///
    /// When several fields share the name, the first non-null one wins;
    /// a null is only returned if every match is null.
    fn field(&self, name: &str) -> Option<&FieldValue> {
        let wanted = name.to_lowercase();
        let mut first_null = None;
        for (field_name, value) in self.fields() {
            if field_name.to_lowercase() != wanted {
                continue;
            }
            if !value.is_null() {
                return Some(value);
            }
            first_null.get_or_insert(value);
        }
        first_null
    }
}

/// One labeled measurement record from a monitoring source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reading {
    fields: Vec<(String, FieldValue)>,
}

impl Reading {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, see [`Reading::insert`].
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Append a field. Names that repeat (ignoring case) are all kept in
    /// natural order; see [`FieldAccess::field`] for lookup.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.push((name.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldAccess for Reading {
    fn fields(&self) -> Box<dyn Iterator<Item = (&str, &FieldValue)> + '_> {
        Box::new(self.fields.iter().map(|(name, value)| (name.as_str(), value)))
    }
}

impl<K, V> FromIterator<(K, V)> for Reading
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut reading = Reading::new();
        for (name, value) in iter {
            reading.insert(name, value);
        }
        reading
    }
}

impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, &serde_json::Value::from(value))?;
        }
        map.end()
    }
}

// serde_json::Map would sort the keys; a hand-written visitor keeps the
// order the source emitted them in.
impl<'de> Deserialize<'de> for Reading {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ReadingVisitor;

        impl<'de> Visitor<'de> for ReadingVisitor {
            type Value = Reading;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a flat object of named sensor fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Reading, A::Error> {
                let mut reading = Reading::new();
                while let Some((name, value)) =
                    access.next_entry::<String, serde_json::Value>()?
                {
                    reading.insert(name, FieldValue::from(value));
                }
                Ok(reading)
            }
        }

        deserializer.deserialize_map(ReadingVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup_ignores_case() {
        let reading = Reading::new()
            .with_field("Label", "CPU Package")
            .with_field("CurValue", 61.5);

        assert_eq!(
            reading.field("label"),
            Some(&FieldValue::Text("CPU Package".to_string()))
        );
        assert_eq!(reading.field("CURVALUE"), Some(&FieldValue::Float(61.5)));
        assert!(reading.field("Value").is_none());
    }

    #[test]
    fn test_repeated_names_are_kept() {
        let mut reading = Reading::new().with_field("Name", "a").with_field("Value", 1i64);
        reading.insert("name", "b");

        let names: Vec<&str> = reading.fields().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Name", "Value", "name"]);
        assert_eq!(reading.len(), 3);
        assert_eq!(reading.field("Name"), Some(&FieldValue::Text("a".to_string())));
    }

    #[test]
    fn test_later_null_does_not_hide_value() {
        let json = r#"{"Label": "CPU Package Power", "Value": "22.17", "value": null}"#;
        let reading: Reading = serde_json::from_str(json).unwrap();

        assert_eq!(
            reading.field("Value"),
            Some(&FieldValue::Text("22.17".to_string()))
        );
    }

    #[test]
    fn test_first_non_null_match_wins() {
        let reading = Reading::new()
            .with_field("value", FieldValue::Null)
            .with_field("Value", "61");
        assert_eq!(reading.field("VALUE"), Some(&FieldValue::Text("61".to_string())));

        let reading = Reading::new()
            .with_field("Value", FieldValue::Null)
            .with_field("value", FieldValue::Null);
        assert!(reading.field("value").unwrap().is_null());
    }

    #[test]
    fn test_to_text() {
        assert_eq!(FieldValue::Float(22.17).to_text().as_deref(), Some("22.17"));
        assert_eq!(FieldValue::Float(3500.0).to_text().as_deref(), Some("3500"));
        assert_eq!(FieldValue::Integer(-4).to_text().as_deref(), Some("-4"));
        assert_eq!(FieldValue::Bool(true).to_text().as_deref(), Some("true"));
        assert_eq!(FieldValue::Null.to_text(), None);
    }

    #[test]
    fn test_from_f32_keeps_decimal_form() {
        assert_eq!(FieldValue::from(61.3f32), FieldValue::Float(61.3));
    }

    #[test]
    fn test_deserialize_preserves_field_order() {
        let json = r#"{"Zeta": 1, "Alpha": "x", "Mid": null}"#;
        let reading: Reading = serde_json::from_str(json).unwrap();

        let names: Vec<&str> = reading.fields().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert!(reading.field("mid").unwrap().is_null());
    }

    #[test]
    fn test_serialize_round_trip_order() {
        let reading = Reading::new()
            .with_field("Sensor", "CPU Clock")
            .with_field("DisplayValue", "3500");
        let json = serde_json::to_string(&reading).unwrap();
        assert_eq!(json, r#"{"Sensor":"CPU Clock","DisplayValue":"3500"}"#);
    }
}
