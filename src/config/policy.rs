//! Unit conventions: how a source's raw numbers map onto canonical units.
//!
//! The conversion rules are a closed set. A source names exactly one rule per
//! field, and that assignment is business data: two rules can agree on most
//! inputs and still diverge at period 0 or on a period boundary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::process::parse::{parse_count, parse_tenor_months};

/// What a source's no-call column counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoCallRule {
    /// Already the number of skipped observation periods.
    DirectPeriods,
    /// The month (from trade date) of the first callable observation.
    FirstCallMonth,
    /// A period index starting at 1: "callable from period 3" skips 2.
    OneBasedPeriod,
}

impl NoCallRule {
    /// Parse the raw cell into the number the rule works on.
    pub fn parse_raw(&self, raw: &str) -> Option<f64> {
        match self {
            NoCallRule::FirstCallMonth => parse_tenor_months(raw),
            NoCallRule::DirectPeriods | NoCallRule::OneBasedPeriod => parse_count(raw),
        }
    }

    /// Periods skipped before the first possible call. Never negative.
    ///
    /// `months_per_period` is only consulted by `FirstCallMonth`, which yields
    /// `None` without it.
    pub fn periods_skipped(&self, raw: f64, months_per_period: Option<u32>) -> Option<i64> {
        if !raw.is_finite() {
            return None;
        }
        let skipped = match self {
            NoCallRule::DirectPeriods => raw.round(),
            NoCallRule::OneBasedPeriod => raw.round() - 1.0,
            NoCallRule::FirstCallMonth => {
                let mpp = months_per_period.filter(|m| *m > 0)?;
                (raw / mpp as f64).floor() - 1.0
            }
        };
        // Counts past i64 range are not a period count.
        if skipped >= i64::MAX as f64 {
            return None;
        }
        Some(skipped.max(0.0) as i64)
    }
}

/// How a source quotes the reoffer column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReofferQuote {
    /// A price in percent of notional.
    #[default]
    Price,
    /// An upfront fee: price = 100 − fee.
    UpfrontFee,
    /// Ambiguous quoting: values at or below `threshold` are read as fees.
    /// Misreads legitimately low prices; only for sources known to mix both.
    FeeIfAtMost { threshold: f64 },
    /// A price whose fee part carries a withholding-tax uplift of `rate`:
    /// price = 100 − (100 − raw) / rate.
    WithholdingGrossUp { rate: f64 },
}

impl ReofferQuote {
    pub fn to_price(&self, raw: f64) -> f64 {
        match *self {
            ReofferQuote::Price => raw,
            ReofferQuote::UpfrontFee => 100.0 - raw,
            ReofferQuote::FeeIfAtMost { threshold } if raw <= threshold => 100.0 - raw,
            ReofferQuote::FeeIfAtMost { .. } => raw,
            ReofferQuote::WithholdingGrossUp { rate } => 100.0 - (100.0 - raw) / rate,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponQuote {
    #[default]
    PerAnnum,
    /// Paid per autocall observation; annualized by the observation frequency.
    PerObservation,
}

fn default_delimiters() -> String {
    ";".to_string()
}

/// Per-source value conventions consumed by the transform engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitConventionPolicy {
    pub no_call: NoCallRule,
    #[serde(default)]
    pub reoffer: ReofferQuote,
    #[serde(default)]
    pub coupon: CouponQuote,
    /// Months per period assumed when the autocall frequency is unreadable.
    #[serde(default)]
    pub fallback_frequency_months: Option<u32>,
    /// Barrier values meaning "no barrier".
    #[serde(default)]
    pub barrier_sentinels: Vec<f64>,
    /// Raw underlying spellings replaced before ticker cleanup.
    #[serde(default)]
    pub underlying_aliases: BTreeMap<String, String>,
    #[serde(default = "default_delimiters")]
    pub underlying_delimiters: String,
}

impl UnitConventionPolicy {
    pub fn new(no_call: NoCallRule) -> Self {
        Self {
            no_call,
            reoffer: ReofferQuote::Price,
            coupon: CouponQuote::PerAnnum,
            fallback_frequency_months: None,
            barrier_sentinels: Vec::new(),
            underlying_aliases: BTreeMap::new(),
            underlying_delimiters: default_delimiters(),
        }
    }

    pub fn reoffer(mut self, quote: ReofferQuote) -> Self {
        self.reoffer = quote;
        self
    }

    pub fn coupon(mut self, quote: CouponQuote) -> Self {
        self.coupon = quote;
        self
    }

    pub fn fallback_frequency_months(mut self, months: u32) -> Self {
        self.fallback_frequency_months = Some(months);
        self
    }

    pub fn barrier_sentinels(mut self, values: &[f64]) -> Self {
        self.barrier_sentinels = values.to_vec();
        self
    }

    pub fn underlying_alias(mut self, raw: &str, ticker: &str) -> Self {
        self.underlying_aliases
            .insert(raw.to_string(), ticker.to_string());
        self
    }

    pub fn underlying_delimiters(mut self, delimiters: &str) -> Self {
        self.underlying_delimiters = delimiters.to_string();
        self
    }
}
