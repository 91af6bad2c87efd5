// src/schema/enforce.rs

use super::field::{CanonicalField, FIELD_COUNT};
use super::row::{CanonicalRow, Record};
use super::value::Value;
use crate::process::parse::{parse_count, parse_percent, parse_tenor_months, AMERICAN, EUROPEAN};

/// Applied when the no-call period is missing or zero.
pub const DEFAULT_NO_CALL_PERIOD: i64 = 1;

fn coerce_number(value: Value, tenor: bool) -> Value {
    match value {
        Value::Integer(i) => Value::number(i as f64),
        Value::Text(s) if tenor => parse_tenor_months(&s).into(),
        Value::Text(s) => parse_percent(&s).into(),
        other => other,
    }
}

/// Rounded to a whole count; `None` outside the i64 range.
fn whole_count(n: f64) -> Option<i64> {
    let n = n.round();
    (n.is_finite() && n.abs() < i64::MAX as f64).then_some(n as i64)
}

fn coerce_integer(value: Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(i),
        Value::Number(n) => whole_count(n),
        Value::Text(s) => parse_count(&s).and_then(whole_count),
        _ => None,
    }
}

fn coerce_text(value: Value) -> Value {
    match value {
        Value::Integer(_) | Value::Number(_) => Value::text(value.to_string()),
        other => other,
    }
}

fn enforce_field(field: CanonicalField, value: Value) -> Value {
    let value = value.homogenized();
    match field {
        f if f.is_numeric() => coerce_number(value, false),
        CanonicalField::Tenor => coerce_number(value, true),
        CanonicalField::NoCallPeriod => match coerce_integer(value) {
            None | Some(0) => Value::Integer(DEFAULT_NO_CALL_PERIOD),
            Some(n) => Value::Integer(n),
        },
        CanonicalField::BarrierType => match value {
            Value::Text(s) if s == AMERICAN || s == EUROPEAN => Value::Text(s),
            _ => Value::Null,
        },
        _ => coerce_text(value),
    }
}

/// Project a record onto exactly the canonical columns, in canonical order.
///
/// Missing fields become null, non-canonical columns are dropped, and a null
/// issuer is filled with `source_key`. Finalizing an already finalized row
/// changes nothing.
pub fn finalize(record: &Record, source_key: Option<&str>) -> CanonicalRow {
    let mut values: [Value; FIELD_COUNT] = Default::default();
    for field in CanonicalField::ALL {
        let raw = record.get(field.as_str()).cloned().unwrap_or_default();
        values[field.index()] = enforce_field(field, raw);
    }
    let issuer = &mut values[CanonicalField::Issuer.index()];
    if issuer.is_null() {
        if let Some(key) = source_key {
            *issuer = Value::text(key);
        }
    }
    CanonicalRow::from_values(values)
}

/// `finalize` over an already canonical row.
pub fn refinalize(row: &CanonicalRow, source_key: Option<&str>) -> CanonicalRow {
    finalize(&row.to_record(), source_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::field::Field;

    fn get(row: &CanonicalRow, f: CanonicalField) -> &Value {
        row.get(f)
    }

    #[test]
    fn missing_fields_are_null_and_extras_dropped() {
        let record: Record = [
            ("product", Value::text("Phoenix")),
            ("Memory Coupon", Value::text("Yes")),
            ("call_strike", Value::Number(100.0)),
        ]
        .into_iter()
        .collect();
        let row = finalize(&record, Some("gs"));
        assert_eq!(row.iter().count(), FIELD_COUNT);
        assert_eq!(get(&row, CanonicalField::Product), &Value::text("Phoenix"));
        assert_eq!(get(&row, CanonicalField::Coupon), &Value::Null);
        assert_eq!(row.issuer(), Some("gs"));
        let json = serde_json::to_value(&row).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), FIELD_COUNT);
        assert!(json.get("Memory Coupon").is_none());
    }

    #[test]
    fn null_like_text_is_homogenized() {
        let record: Record = [
            ("currency", Value::text("EUR")),
            ("product", Value::Text("  ".into())),
            ("underlying_1", Value::Text("<NA>".into())),
            ("autocall_frequency", Value::Text("None".into())),
        ]
        .into_iter()
        .collect();
        let row = finalize(&record, None);
        assert_eq!(get(&row, CanonicalField::Product), &Value::Null);
        assert_eq!(get(&row, CanonicalField::Underlying1), &Value::Null);
        assert_eq!(get(&row, CanonicalField::AutocallFrequency), &Value::Null);
        assert_eq!(row.issuer(), None);
    }

    #[test]
    fn no_call_period_defaults_to_one() {
        for raw in [Value::Null, Value::Integer(0), Value::Number(0.0), Value::text("0")] {
            let record: Record = [("no_call_period", raw)].into_iter().collect();
            let row = finalize(&record, None);
            assert_eq!(get(&row, CanonicalField::NoCallPeriod), &Value::Integer(1));
        }
        let row = finalize(&Record::new(), None);
        assert_eq!(get(&row, CanonicalField::NoCallPeriod), &Value::Integer(1));

        let record: Record = [("no_call_period", Value::Integer(3))].into_iter().collect();
        assert_eq!(get(&finalize(&record, None), CanonicalField::NoCallPeriod), &Value::Integer(3));
    }

    #[test]
    fn numeric_fields_are_recoerced() {
        let record: Record = [
            ("coupon", Value::text("5,25")),
            ("strike", Value::Integer(100)),
            ("barrier", Value::text("abc")),
            ("tenor", Value::text("2Y")),
        ]
        .into_iter()
        .collect();
        let row = finalize(&record, None);
        assert_eq!(get(&row, CanonicalField::Coupon), &Value::Number(5.25));
        assert_eq!(get(&row, CanonicalField::Strike), &Value::Number(100.0));
        assert_eq!(get(&row, CanonicalField::Barrier), &Value::Null);
        assert_eq!(get(&row, CanonicalField::Tenor), &Value::Number(24.0));
    }

    #[test]
    fn barrier_type_outside_the_domain_is_nulled() {
        for (raw, expected) in [
            ("American", Value::text("American")),
            ("European", Value::text("European")),
            ("Daily Close", Value::Null),
            ("american", Value::Null),
        ] {
            let record: Record = [("barrier_type", Value::text(raw))].into_iter().collect();
            assert_eq!(get(&finalize(&record, None), CanonicalField::BarrierType), &expected);
        }
    }

    #[test]
    fn resolved_issuer_wins_over_source_key() {
        let mut record = Record::new();
        record.set_field(Field::Issuer, Value::text("Leonteq Securities AG"));
        let row = finalize(&record, Some("leonteq"));
        assert_eq!(row.issuer(), Some("Leonteq Securities AG"));
    }

    #[test]
    fn finalization_is_idempotent() {
        let record: Record = [
            ("issuer", Value::Null),
            ("product", Value::text("Autocall")),
            ("coupon", Value::text("7.5%")),
            ("tenor", Value::Integer(18)),
            ("barrier", Value::Number(f64::NAN)),
            ("underlying_1", Value::Integer(700)),
            ("barrier_type", Value::text("Continuous")),
            ("no_call_period", Value::Number(0.0)),
            ("extra", Value::text("dropped")),
        ]
        .into_iter()
        .collect();
        let once = finalize(&record, Some("hsbc"));
        let twice = refinalize(&once, Some("hsbc"));
        let thrice = refinalize(&twice, None);
        assert_eq!(once, twice);
        assert_eq!(twice, thrice);
        assert_eq!(get(&once, CanonicalField::Underlying1), &Value::text("700"));
        assert_eq!(get(&once, CanonicalField::Tenor), &Value::Number(18.0));
    }
}
