// src/schema/field.rs

use serde::{Deserialize, Serialize};

/// The fixed, ordered canonical output columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Issuer,
    Product,
    Coupon,
    Currency,
    Tenor,
    Strike,
    Barrier,
    Reoffer,
    #[serde(rename = "underlying_1")]
    Underlying1,
    #[serde(rename = "underlying_2")]
    Underlying2,
    #[serde(rename = "underlying_3")]
    Underlying3,
    #[serde(rename = "underlying_4")]
    Underlying4,
    #[serde(rename = "underlying_5")]
    Underlying5,
    BarrierType,
    AutocallBarrier,
    AutocallFrequency,
    NoCallPeriod,
}

/// Number of canonical columns.
pub const FIELD_COUNT: usize = 17;

impl CanonicalField {
    /// Output column order.
    pub const ALL: [CanonicalField; FIELD_COUNT] = [
        CanonicalField::Issuer,
        CanonicalField::Product,
        CanonicalField::Coupon,
        CanonicalField::Currency,
        CanonicalField::Tenor,
        CanonicalField::Strike,
        CanonicalField::Barrier,
        CanonicalField::Reoffer,
        CanonicalField::Underlying1,
        CanonicalField::Underlying2,
        CanonicalField::Underlying3,
        CanonicalField::Underlying4,
        CanonicalField::Underlying5,
        CanonicalField::BarrierType,
        CanonicalField::AutocallBarrier,
        CanonicalField::AutocallFrequency,
        CanonicalField::NoCallPeriod,
    ];

    /// Percent-quoted fields sharing the generic numeric parse.
    pub const NUMERIC: [CanonicalField; 5] = [
        CanonicalField::Coupon,
        CanonicalField::Strike,
        CanonicalField::Barrier,
        CanonicalField::Reoffer,
        CanonicalField::AutocallBarrier,
    ];

    pub const UNDERLYINGS: [CanonicalField; 5] = [
        CanonicalField::Underlying1,
        CanonicalField::Underlying2,
        CanonicalField::Underlying3,
        CanonicalField::Underlying4,
        CanonicalField::Underlying5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Issuer => "issuer",
            CanonicalField::Product => "product",
            CanonicalField::Coupon => "coupon",
            CanonicalField::Currency => "currency",
            CanonicalField::Tenor => "tenor",
            CanonicalField::Strike => "strike",
            CanonicalField::Barrier => "barrier",
            CanonicalField::Reoffer => "reoffer",
            CanonicalField::Underlying1 => "underlying_1",
            CanonicalField::Underlying2 => "underlying_2",
            CanonicalField::Underlying3 => "underlying_3",
            CanonicalField::Underlying4 => "underlying_4",
            CanonicalField::Underlying5 => "underlying_5",
            CanonicalField::BarrierType => "barrier_type",
            CanonicalField::AutocallBarrier => "autocall_barrier",
            CanonicalField::AutocallFrequency => "autocall_frequency",
            CanonicalField::NoCallPeriod => "no_call_period",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        CanonicalField::ALL.into_iter().find(|f| f.as_str() == s)
    }

    /// Position in the output column order.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn is_numeric(&self) -> bool {
        CanonicalField::NUMERIC.contains(self)
    }
}

/// Anything a header can be resolved onto: a canonical column, or an
/// auxiliary input consumed by the transform engine and never emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Issuer,
    Product,
    Coupon,
    Currency,
    Tenor,
    Strike,
    Barrier,
    Reoffer,
    #[serde(rename = "underlying_1")]
    Underlying1,
    #[serde(rename = "underlying_2")]
    Underlying2,
    #[serde(rename = "underlying_3")]
    Underlying3,
    #[serde(rename = "underlying_4")]
    Underlying4,
    #[serde(rename = "underlying_5")]
    Underlying5,
    BarrierType,
    AutocallBarrier,
    AutocallFrequency,
    NoCallPeriod,
    /// All underlyings in one delimited cell.
    Underlyings,
    CallStrike,
    PutStrike,
    PeriodicCoupon,
    CouponFrequency,
}

impl Field {
    pub fn canonical(&self) -> Option<CanonicalField> {
        let c = match self {
            Field::Issuer => CanonicalField::Issuer,
            Field::Product => CanonicalField::Product,
            Field::Coupon => CanonicalField::Coupon,
            Field::Currency => CanonicalField::Currency,
            Field::Tenor => CanonicalField::Tenor,
            Field::Strike => CanonicalField::Strike,
            Field::Barrier => CanonicalField::Barrier,
            Field::Reoffer => CanonicalField::Reoffer,
            Field::Underlying1 => CanonicalField::Underlying1,
            Field::Underlying2 => CanonicalField::Underlying2,
            Field::Underlying3 => CanonicalField::Underlying3,
            Field::Underlying4 => CanonicalField::Underlying4,
            Field::Underlying5 => CanonicalField::Underlying5,
            Field::BarrierType => CanonicalField::BarrierType,
            Field::AutocallBarrier => CanonicalField::AutocallBarrier,
            Field::AutocallFrequency => CanonicalField::AutocallFrequency,
            Field::NoCallPeriod => CanonicalField::NoCallPeriod,
            Field::Underlyings
            | Field::CallStrike
            | Field::PutStrike
            | Field::PeriodicCoupon
            | Field::CouponFrequency => return None,
        };
        Some(c)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Underlyings => "underlyings",
            Field::CallStrike => "call_strike",
            Field::PutStrike => "put_strike",
            Field::PeriodicCoupon => "periodic_coupon",
            Field::CouponFrequency => "coupon_frequency",
            other => other
                .canonical()
                .map(|c| c.as_str())
                .unwrap_or_default(),
        }
    }
}

impl From<CanonicalField> for Field {
    fn from(c: CanonicalField) -> Self {
        match c {
            CanonicalField::Issuer => Field::Issuer,
            CanonicalField::Product => Field::Product,
            CanonicalField::Coupon => Field::Coupon,
            CanonicalField::Currency => Field::Currency,
            CanonicalField::Tenor => Field::Tenor,
            CanonicalField::Strike => Field::Strike,
            CanonicalField::Barrier => Field::Barrier,
            CanonicalField::Reoffer => Field::Reoffer,
            CanonicalField::Underlying1 => Field::Underlying1,
            CanonicalField::Underlying2 => Field::Underlying2,
            CanonicalField::Underlying3 => Field::Underlying3,
            CanonicalField::Underlying4 => Field::Underlying4,
            CanonicalField::Underlying5 => Field::Underlying5,
            CanonicalField::BarrierType => Field::BarrierType,
            CanonicalField::AutocallBarrier => Field::AutocallBarrier,
            CanonicalField::AutocallFrequency => Field::AutocallFrequency,
            CanonicalField::NoCallPeriod => Field::NoCallPeriod,
        }
    }
}
