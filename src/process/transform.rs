//! Per-field value normalization driven by a source's [`UnitConventionPolicy`].
//!
//! Every step is total: a cell that cannot be interpreted becomes `Null` for
//! that field only, and the rest of the row is unaffected.

use tracing::trace;

use crate::config::policy::{CouponQuote, NoCallRule, UnitConventionPolicy};
use crate::process::parse::{
    clean_underlying, months_per_period, normalize_barrier_type, normalize_frequency,
    parse_percent, parse_tenor_months, split_underlyings, Frequency,
};
use crate::process::utils::clean_str;
use crate::schema::field::{CanonicalField as C, Field};
use crate::schema::row::Record;
use crate::schema::value::Value;

/// Numeric view of a cell; text goes through the percent parser.
fn number(value: Option<&Value>, field: &str) -> Option<f64> {
    match value? {
        Value::Null => None,
        Value::Integer(i) => Some(*i as f64),
        Value::Number(n) => Some(*n).filter(|n| n.is_finite()),
        Value::Text(s) => {
            let parsed = parse_percent(s);
            if parsed.is_none() {
                trace!(field, raw = %s, "unparseable number, field nulled");
            }
            parsed
        }
    }
}

/// Text view of a cell, whitespace-normalized.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::Text(s) => Some(clean_str(s)).filter(|s| !s.is_empty()),
        other => Some(other.to_string()),
    }
}

fn tenor(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Text(s) => {
            let parsed = parse_tenor_months(s);
            if parsed.is_none() {
                trace!(raw = %s, "unparseable tenor, field nulled");
            }
            parsed
        }
        other => number(Some(other), "tenor"),
    }
}

/// Strike implied by separate call and put strike columns, if either is present.
///
/// Both present: whichever is not 100, call first. Both 100: 100.
pub fn consolidate_strike(call: Option<f64>, put: Option<f64>) -> Option<f64> {
    const AT_THE_MONEY: f64 = 100.0;
    match (call, put) {
        (Some(c), Some(p)) => {
            if c != AT_THE_MONEY {
                Some(c)
            } else if p != AT_THE_MONEY {
                Some(p)
            } else {
                Some(AT_THE_MONEY)
            }
        }
        (Some(c), None) => Some(c),
        (None, Some(p)) => Some(p),
        (None, None) => None,
    }
}

fn fill_underlyings(record: &mut Record, policy: &UnitConventionPolicy) {
    if let Some(list) = record
        .take_field(Field::Underlyings)
        .and_then(|v| text(Some(&v)))
    {
        let parts = split_underlyings(&list, &policy.underlying_delimiters);
        for (slot, part) in C::UNDERLYINGS.iter().zip(parts) {
            if !record.has((*slot).into()) {
                record.set_field((*slot).into(), Value::text(part));
            }
        }
    }

    for slot in C::UNDERLYINGS {
        let field = Field::from(slot);
        let cleaned = text(record.field(field)).and_then(|raw| {
            let raw = policy
                .underlying_aliases
                .get(&raw)
                .cloned()
                .unwrap_or(raw);
            clean_underlying(&raw)
        });
        record.set_field(field, cleaned.into());
    }
}

fn no_call_periods(
    raw: Option<&Value>,
    rule: NoCallRule,
    frequency: Option<&str>,
    fallback_months: Option<u32>,
) -> Option<i64> {
    let value = match raw? {
        Value::Null => return None,
        Value::Integer(i) => *i as f64,
        Value::Number(n) => *n,
        Value::Text(s) => {
            let parsed = rule.parse_raw(s);
            if parsed.is_none() {
                trace!(raw = %s, "unparseable no-call period, field nulled");
            }
            parsed?
        }
    };
    let months = match rule {
        NoCallRule::FirstCallMonth => frequency.and_then(months_per_period).or(fallback_months),
        _ => None,
    };
    rule.periods_skipped(value, months)
}

/// Normalize a resolved record in place of its raw text. Auxiliary inputs are
/// consumed; unmatched raw columns pass through untouched.
pub fn apply(mut record: Record, policy: &UnitConventionPolicy) -> Record {
    fill_underlyings(&mut record, policy);

    for field in [C::Issuer, C::Product, C::Currency] {
        let v = text(record.field(field.into()));
        record.set_field(field.into(), v.into());
    }

    let frequency = text(record.field(C::AutocallFrequency.into())).and_then(|f| normalize_frequency(&f));
    record.set_field(C::AutocallFrequency.into(), frequency.clone().into());

    let barrier_type = text(record.field(C::BarrierType.into())).and_then(|b| normalize_barrier_type(&b));
    record.set_field(C::BarrierType.into(), barrier_type.into());

    let months = tenor(record.field(C::Tenor.into()));
    record.set_field(C::Tenor.into(), months.into());

    for field in C::NUMERIC {
        let v = number(record.field(field.into()), field.as_str());
        record.set_field(field.into(), v.into());
    }

    let call = record
        .take_field(Field::CallStrike)
        .and_then(|v| number(Some(&v), Field::CallStrike.as_str()));
    let put = record
        .take_field(Field::PutStrike)
        .and_then(|v| number(Some(&v), Field::PutStrike.as_str()));
    if let Some(strike) = consolidate_strike(call, put) {
        record.set_field(C::Strike.into(), Value::number(strike));
    }

    let barrier = record.field(C::Barrier.into()).and_then(Value::as_f64);
    if barrier.is_some_and(|b| policy.barrier_sentinels.contains(&b)) {
        record.set_field(C::Barrier.into(), Value::Null);
    }

    if let Some(raw) = record.field(C::Reoffer.into()).and_then(Value::as_f64) {
        record.set_field(C::Reoffer.into(), Value::number(policy.reoffer.to_price(raw)));
    }

    let autocall_frequency = frequency.as_deref().and_then(Frequency::parse);
    let periodic = record
        .take_field(Field::PeriodicCoupon)
        .and_then(|v| number(Some(&v), Field::PeriodicCoupon.as_str()));
    let coupon_frequency = record
        .take_field(Field::CouponFrequency)
        .and_then(|v| text(Some(&v)))
        .and_then(|f| Frequency::parse(&f))
        .or(autocall_frequency);
    let coupon = record.field(C::Coupon.into()).and_then(Value::as_f64);
    let coupon = match (coupon, periodic) {
        (None, Some(p)) => coupon_frequency.map(|f| p * f.per_year() as f64),
        (Some(c), _) if policy.coupon == CouponQuote::PerObservation => {
            Some(c * autocall_frequency.map_or(1, |f| f.per_year()) as f64)
        }
        (c, _) => c,
    };
    record.set_field(C::Coupon.into(), coupon.into());

    let no_call = no_call_periods(
        record.field(C::NoCallPeriod.into()),
        policy.no_call,
        frequency.as_deref(),
        policy.fallback_frequency_months,
    );
    record.set_field(C::NoCallPeriod.into(), no_call.into());

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::policy::ReofferQuote;

    fn record(pairs: &[(Field, &str)]) -> Record {
        pairs
            .iter()
            .map(|(f, v)| (f.as_str(), Value::text(v)))
            .collect()
    }

    fn num(r: &Record, f: C) -> Option<f64> {
        r.field(f.into()).and_then(Value::as_f64)
    }

    #[test]
    fn generic_numeric_and_text_parsing() {
        let out = apply(
            record(&[
                (Field::Coupon, "5,25%"),
                (Field::Currency, " EUR "),
                (Field::Tenor, "1Y6M"),
                (Field::Strike, "100%"),
                (Field::Barrier, "60"),
                (Field::AutocallBarrier, "n/a"),
                (Field::AutocallFrequency, "3m"),
                (Field::BarrierType, "at expiry"),
            ]),
            &UnitConventionPolicy::new(NoCallRule::DirectPeriods),
        );
        assert_eq!(num(&out, C::Coupon), Some(5.25));
        assert_eq!(out.field(Field::Currency), Some(&Value::text("EUR")));
        assert_eq!(num(&out, C::Tenor), Some(18.0));
        assert_eq!(num(&out, C::Strike), Some(100.0));
        assert_eq!(num(&out, C::Barrier), Some(60.0));
        assert_eq!(out.field(Field::AutocallBarrier), Some(&Value::Null));
        assert_eq!(out.field(Field::AutocallFrequency), Some(&Value::text("Quarterly")));
        assert_eq!(out.field(Field::BarrierType), Some(&Value::text("European")));
        assert_eq!(out.field(Field::NoCallPeriod), Some(&Value::Null));
    }

    #[test]
    fn no_call_rules_use_the_observation_frequency() {
        let policy = UnitConventionPolicy::new(NoCallRule::FirstCallMonth);
        let monthly = apply(
            record(&[(Field::NoCallPeriod, "3"), (Field::AutocallFrequency, "Monthly")]),
            &policy,
        );
        assert_eq!(monthly.field(Field::NoCallPeriod), Some(&Value::Integer(2)));

        let semi = apply(
            record(&[(Field::NoCallPeriod, "6M"), (Field::AutocallFrequency, "semi annual")]),
            &policy,
        );
        assert_eq!(semi.field(Field::NoCallPeriod), Some(&Value::Integer(0)));

        let unknown = apply(
            record(&[(Field::NoCallPeriod, "12"), (Field::AutocallFrequency, "weekly")]),
            &policy,
        );
        assert_eq!(unknown.field(Field::NoCallPeriod), Some(&Value::Null));
        assert_eq!(unknown.field(Field::AutocallFrequency), Some(&Value::text("weekly")));

        let fallback = apply(
            record(&[(Field::NoCallPeriod, "12")]),
            &policy.clone().fallback_frequency_months(6),
        );
        assert_eq!(fallback.field(Field::NoCallPeriod), Some(&Value::Integer(1)));

        let direct = apply(
            record(&[(Field::NoCallPeriod, "2")]),
            &UnitConventionPolicy::new(NoCallRule::DirectPeriods),
        );
        assert_eq!(direct.field(Field::NoCallPeriod), Some(&Value::Integer(2)));

        let one_based = apply(
            record(&[(Field::NoCallPeriod, "2")]),
            &UnitConventionPolicy::new(NoCallRule::OneBasedPeriod),
        );
        assert_eq!(one_based.field(Field::NoCallPeriod), Some(&Value::Integer(1)));
    }

    #[test]
    fn reoffer_quoting_and_barrier_sentinels() {
        let price = UnitConventionPolicy::new(NoCallRule::DirectPeriods);
        let out = apply(record(&[(Field::Reoffer, "97")]), &price);
        assert_eq!(num(&out, C::Reoffer), Some(97.0));

        let fee = UnitConventionPolicy::new(NoCallRule::DirectPeriods).reoffer(ReofferQuote::UpfrontFee);
        let out = apply(record(&[(Field::Reoffer, "3")]), &fee);
        assert_eq!(num(&out, C::Reoffer), Some(97.0));

        let gs = UnitConventionPolicy::new(NoCallRule::DirectPeriods).barrier_sentinels(&[100.0]);
        let out = apply(record(&[(Field::Barrier, "100%")]), &gs);
        assert_eq!(out.field(Field::Barrier), Some(&Value::Null));
        let out = apply(record(&[(Field::Barrier, "65")]), &gs);
        assert_eq!(num(&out, C::Barrier), Some(65.0));
    }

    #[test]
    fn underlying_lists_aliases_and_cleanup() {
        let policy = UnitConventionPolicy::new(NoCallRule::DirectPeriods)
            .underlying_delimiters(";,")
            .underlying_alias("1321 JT", "NKY");
        let out = apply(
            record(&[
                (Field::Underlyings, "SX5E Index; SPX Index,1321 JT"),
                (Field::Underlying1, "AAPL UW Equity"),
            ]),
            &policy,
        );
        // an explicit column wins over the list
        assert_eq!(out.field(Field::Underlying1), Some(&Value::text("AAPL")));
        assert_eq!(out.field(Field::Underlying2), Some(&Value::text("SPX")));
        assert_eq!(out.field(Field::Underlying3), Some(&Value::text("NKY")));
        assert_eq!(out.field(Field::Underlying4), Some(&Value::Null));
        assert!(out.field(Field::Underlyings).is_none());
    }

    #[test]
    fn call_put_strike_consolidation() {
        assert_eq!(consolidate_strike(Some(100.0), Some(80.0)), Some(80.0));
        assert_eq!(consolidate_strike(Some(90.0), Some(80.0)), Some(90.0));
        assert_eq!(consolidate_strike(Some(100.0), Some(100.0)), Some(100.0));
        assert_eq!(consolidate_strike(None, Some(75.0)), Some(75.0));
        assert_eq!(consolidate_strike(None, None), None);

        let policy = UnitConventionPolicy::new(NoCallRule::OneBasedPeriod);
        let out = apply(
            record(&[(Field::Strike, "100"), (Field::CallStrike, "100"), (Field::PutStrike, "85%")]),
            &policy,
        );
        assert_eq!(num(&out, C::Strike), Some(85.0));
        assert!(out.field(Field::CallStrike).is_none());
        assert!(out.field(Field::PutStrike).is_none());
    }

    #[test]
    fn periodic_and_per_observation_coupons_are_annualized() {
        let policy = UnitConventionPolicy::new(NoCallRule::OneBasedPeriod);
        let out = apply(
            record(&[(Field::PeriodicCoupon, "1.5"), (Field::AutocallFrequency, "Quarterly")]),
            &policy,
        );
        assert_eq!(num(&out, C::Coupon), Some(6.0));

        let out = apply(
            record(&[
                (Field::PeriodicCoupon, "1"),
                (Field::CouponFrequency, "Monthly"),
                (Field::AutocallFrequency, "Quarterly"),
            ]),
            &policy,
        );
        assert_eq!(num(&out, C::Coupon), Some(12.0));

        let out = apply(record(&[(Field::PeriodicCoupon, "1.5")]), &policy);
        assert_eq!(out.field(Field::Coupon), Some(&Value::Null));

        // an explicit annual coupon wins over a periodic one
        let out = apply(
            record(&[(Field::Coupon, "7"), (Field::PeriodicCoupon, "1"), (Field::AutocallFrequency, "Monthly")]),
            &policy,
        );
        assert_eq!(num(&out, C::Coupon), Some(7.0));

        let bbva = UnitConventionPolicy::new(NoCallRule::DirectPeriods).coupon(CouponQuote::PerObservation);
        let out = apply(
            record(&[(Field::Coupon, "0.5"), (Field::AutocallFrequency, "1m")]),
            &bbva,
        );
        assert_eq!(num(&out, C::Coupon), Some(6.0));
        let out = apply(record(&[(Field::Coupon, "0.5")]), &bbva);
        assert_eq!(num(&out, C::Coupon), Some(0.5));
    }

    #[test]
    fn already_typed_values_pass_through() {
        let mut rec = Record::new();
        rec.set_field(Field::Coupon, Value::Number(5.25));
        rec.set_field(Field::Tenor, Value::Number(12.0));
        rec.set_field(Field::NoCallPeriod, Value::Integer(1));
        rec.set_field(Field::AutocallFrequency, Value::text("Quarterly"));
        rec.set("Comment", Value::text("indicative"));
        let out = apply(rec, &UnitConventionPolicy::new(NoCallRule::DirectPeriods));
        assert_eq!(num(&out, C::Coupon), Some(5.25));
        assert_eq!(num(&out, C::Tenor), Some(12.0));
        assert_eq!(out.field(Field::NoCallPeriod), Some(&Value::Integer(1)));
        assert_eq!(out.get("Comment"), Some(&Value::text("indicative")));
    }
}
