// src/schema/row.rs

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

use super::field::{CanonicalField, Field, FIELD_COUNT};
use super::value::Value;

/// A loosely-shaped row between header resolution and finalization:
/// canonical, auxiliary and unmatched raw columns side by side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns.get(name)
    }

    pub fn field(&self, field: Field) -> Option<&Value> {
        self.get(field.as_str())
    }

    /// Whether the field is present with a non-null value.
    pub fn has(&self, field: Field) -> bool {
        self.field(field).is_some_and(|v| !v.is_null())
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.columns.insert(name.into(), value);
    }

    pub fn set_field(&mut self, field: Field, value: Value) {
        self.set(field.as_str(), value);
    }

    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.columns.remove(name)
    }

    pub fn take_field(&mut self, field: Field) -> Option<Value> {
        self.take(field.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// A finalized row: exactly the canonical columns, in canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRow {
    values: [Value; FIELD_COUNT],
}

impl CanonicalRow {
    pub(crate) fn from_values(values: [Value; FIELD_COUNT]) -> Self {
        Self { values }
    }

    pub fn get(&self, field: CanonicalField) -> &Value {
        &self.values[field.index()]
    }

    pub fn issuer(&self) -> Option<&str> {
        self.get(CanonicalField::Issuer).as_text()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &Value)> {
        CanonicalField::ALL.into_iter().zip(self.values.iter())
    }

    /// Back to the loose shape, e.g. to finalize again.
    pub fn to_record(&self) -> Record {
        self.iter()
            .map(|(f, v)| (f.as_str(), v.clone()))
            .collect()
    }
}

impl Serialize for CanonicalRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELD_COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_field_access() {
        let mut rec = Record::new();
        rec.set_field(Field::Coupon, Value::Number(5.0));
        rec.set("Comments", Value::text("indicative"));
        rec.set_field(Field::Strike, Value::Null);
        assert!(rec.has(Field::Coupon));
        assert!(!rec.has(Field::Strike));
        assert!(!rec.has(Field::Barrier));
        assert_eq!(rec.len(), 3);
        assert_eq!(rec.take_field(Field::Coupon), Some(Value::Number(5.0)));
        assert!(!rec.has(Field::Coupon));
    }

    #[test]
    fn canonical_row_serializes_in_column_order() {
        let mut values: [Value; FIELD_COUNT] = Default::default();
        values[CanonicalField::Issuer.index()] = Value::text("citi");
        values[CanonicalField::NoCallPeriod.index()] = Value::Integer(1);
        let row = CanonicalRow::from_values(values);

        let json = serde_json::to_string(&row).unwrap();
        assert!(json.starts_with(r#"{"issuer":"citi","product":null,"coupon":null"#));
        assert!(json.ends_with(r#""autocall_frequency":null,"no_call_period":1}"#));
        assert_eq!(row.issuer(), Some("citi"));
        assert_eq!(row.to_record().len(), FIELD_COUNT);
    }
}
