//! Cell-level parsers shared by the transform engine and the schema enforcer.
//!
//! Every parser is total: text it cannot interpret yields `None`, which the
//! callers record as a null field.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::utils::{clean_str, title_case};
use crate::schema::value::is_null_like;

static TENOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(\d+(?:\.\d+)?)(?:Y|YR|YRS|YEAR|YEARS))?(?:(\d+(?:\.\d+)?)(?:M|MO|MONTH|MONTHS)?)?$",
    )
    .expect("tenor regex")
});

/// Strip `%`, read a comma as the decimal separator, parse as f64.
pub fn parse_percent(raw: &str) -> Option<f64> {
    let s = raw.trim().replace('%', "");
    let s = s.trim().replace(',', ".");
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// A count such as `"2"` or `"3m"`: any `m`/`M` unit marker is dropped.
pub fn parse_count(raw: &str) -> Option<f64> {
    let s: String = raw.chars().filter(|c| *c != 'm' && *c != 'M').collect();
    parse_percent(&s)
}

/// Tenor text to total months: `"12"`, `"18m"`, `"2Y"`, `"1Y6M"`, `"1.5 years"`.
pub fn parse_tenor_months(raw: &str) -> Option<f64> {
    let s: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
        .replace(',', ".");
    let caps = TENOR_RE.captures(&s)?;
    let years = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok());
    let months = caps.get(2).and_then(|m| m.as_str().parse::<f64>().ok());
    match (years, months) {
        (None, None) => None,
        (y, m) => Some(y.unwrap_or(0.0) * 12.0 + m.unwrap_or(0.0)),
    }
}

/// Autocall observation frequency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl Frequency {
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Annual => "Annual",
        }
    }

    pub fn months(&self) -> u32 {
        match self {
            Frequency::Monthly => 1,
            Frequency::Quarterly => 3,
            Frequency::SemiAnnual => 6,
            Frequency::Annual => 12,
        }
    }

    pub fn per_year(&self) -> u32 {
        12 / self.months()
    }

    pub fn from_months(months: u32) -> Option<Self> {
        match months {
            1 => Some(Frequency::Monthly),
            3 => Some(Frequency::Quarterly),
            6 => Some(Frequency::SemiAnnual),
            12 => Some(Frequency::Annual),
            _ => None,
        }
    }

    /// Labels in any case and spacing, or a month count such as `3`, `3m`, `6.0`.
    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        match key.as_str() {
            "monthly" => return Some(Frequency::Monthly),
            "quarterly" => return Some(Frequency::Quarterly),
            "semiannual" | "semiannually" => return Some(Frequency::SemiAnnual),
            "annual" | "annually" => return Some(Frequency::Annual),
            _ => {}
        }
        let months = parse_tenor_months(raw)?;
        if months.fract() != 0.0 {
            return None;
        }
        Frequency::from_months(months as u32)
    }
}

/// Canonical frequency label, or the cleaned input when it is not recognised.
pub fn normalize_frequency(raw: &str) -> Option<String> {
    let s = clean_str(raw);
    if is_null_like(&s) {
        return None;
    }
    Some(
        Frequency::parse(&s)
            .map(|f| f.label().to_string())
            .unwrap_or(s),
    )
}

/// Months per observation period for an already-normalized frequency label.
pub fn months_per_period(label: &str) -> Option<u32> {
    Frequency::parse(label).map(|f| f.months())
}

pub const AMERICAN: &str = "American";
pub const EUROPEAN: &str = "European";

/// Map barrier-monitoring wording onto `American`/`European`; other wording is
/// title-cased and left for the enforcer to reject.
pub fn normalize_barrier_type(raw: &str) -> Option<String> {
    let s = clean_str(raw);
    if is_null_like(&s) {
        return None;
    }
    let canonical = match s.to_lowercase().as_str() {
        "american" | "continuous" | "american intraday" | "american continuous" | "am"
        | "amer" => AMERICAN.to_string(),
        "european" | "at expiry" | "european intraday" | "eu" | "eur" => EUROPEAN.to_string(),
        _ => title_case(&s),
    };
    Some(canonical)
}

/// Reduce a Bloomberg-style identifier to its root ticker:
/// `"SX5E Index"` → `"SX5E"`, `"AAPL UW Equity"` → `"AAPL"`, `"NESN.SW"` → `"NESN"`.
pub fn clean_underlying(raw: &str) -> Option<String> {
    let mut s = clean_str(raw);
    if is_null_like(&s) || s == "-" {
        return None;
    }
    for suffix in [" equity", " index"] {
        let cut = s.len().saturating_sub(suffix.len());
        if s.len() > suffix.len()
            && s.is_char_boundary(cut)
            && s[cut..].eq_ignore_ascii_case(suffix)
        {
            s.truncate(cut);
        }
    }
    let root = s
        .split(|c: char| c == ' ' || c == '_' || c == '.')
        .next()
        .unwrap_or_default()
        .trim();
    if root.is_empty() || is_null_like(root) {
        None
    } else {
        Some(root.to_string())
    }
}

/// Split a delimited underlying list into at most five positional entries.
pub fn split_underlyings(raw: &str, delimiters: &str) -> Vec<String> {
    raw.split(|c: char| delimiters.contains(c))
        .map(|part| part.trim().to_string())
        .take(5)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_parsing() {
        assert_eq!(parse_percent("5,25%"), Some(5.25));
        assert_eq!(parse_percent(" 100 % "), Some(100.0));
        assert_eq!(parse_percent("60"), Some(60.0));
        assert_eq!(parse_percent("-1.5"), Some(-1.5));
        assert_eq!(parse_percent("n/a"), None);
        assert_eq!(parse_percent("%"), None);
        assert_eq!(parse_percent(""), None);
        assert_eq!(parse_percent("NaN"), None);
    }

    #[test]
    fn count_parsing_drops_month_marker() {
        assert_eq!(parse_count("3m"), Some(3.0));
        assert_eq!(parse_count("12 M"), Some(12.0));
        assert_eq!(parse_count("2"), Some(2.0));
        assert_eq!(parse_count("none"), None);
    }

    #[test]
    fn tenor_parsing() {
        assert_eq!(parse_tenor_months("12"), Some(12.0));
        assert_eq!(parse_tenor_months("18m"), Some(18.0));
        assert_eq!(parse_tenor_months("18 M"), Some(18.0));
        assert_eq!(parse_tenor_months("2y"), Some(24.0));
        assert_eq!(parse_tenor_months("2Y"), Some(24.0));
        assert_eq!(parse_tenor_months("1Y6M"), Some(18.0));
        assert_eq!(parse_tenor_months("2Y 3M"), Some(27.0));
        assert_eq!(parse_tenor_months("1,5Y"), Some(18.0));
        assert_eq!(parse_tenor_months("24 months"), Some(24.0));
        assert_eq!(parse_tenor_months("Y"), None);
        assert_eq!(parse_tenor_months("M"), None);
        assert_eq!(parse_tenor_months("long"), None);
        assert_eq!(parse_tenor_months(""), None);
    }

    #[test]
    fn frequency_labels_and_months() {
        assert_eq!(Frequency::parse("quarterly"), Some(Frequency::Quarterly));
        assert_eq!(Frequency::parse("Semi Annual"), Some(Frequency::SemiAnnual));
        assert_eq!(Frequency::parse("semi-annual"), Some(Frequency::SemiAnnual));
        assert_eq!(Frequency::parse("ANNUALLY"), Some(Frequency::Annual));
        assert_eq!(Frequency::parse("1"), Some(Frequency::Monthly));
        assert_eq!(Frequency::parse("3m"), Some(Frequency::Quarterly));
        assert_eq!(Frequency::parse("6.0"), Some(Frequency::SemiAnnual));
        assert_eq!(Frequency::parse("12M"), Some(Frequency::Annual));
        assert_eq!(Frequency::parse("2"), None);
        assert_eq!(Frequency::parse("weekly"), None);

        assert_eq!(normalize_frequency("3"), Some("Quarterly".into()));
        assert_eq!(normalize_frequency(" weekly "), Some("weekly".into()));
        assert_eq!(normalize_frequency("nan"), None);
        assert_eq!(months_per_period("Semi-Annual"), Some(6));
        assert_eq!(Frequency::Quarterly.per_year(), 4);
    }

    #[test]
    fn barrier_type_aliases() {
        assert_eq!(normalize_barrier_type("Continuous"), Some("American".into()));
        assert_eq!(normalize_barrier_type("American Intraday"), Some("American".into()));
        assert_eq!(normalize_barrier_type("At Expiry"), Some("European".into()));
        assert_eq!(normalize_barrier_type("european intraday"), Some("European".into()));
        assert_eq!(normalize_barrier_type("EUR"), Some("European".into()));
        assert_eq!(normalize_barrier_type("daily close"), Some("Daily Close".into()));
        assert_eq!(normalize_barrier_type(""), None);
    }

    #[test]
    fn underlying_cleanup() {
        assert_eq!(clean_underlying("SX5E Index"), Some("SX5E".into()));
        assert_eq!(clean_underlying("AAPL UW Equity"), Some("AAPL".into()));
        assert_eq!(clean_underlying("NESN.SW"), Some("NESN".into()));
        assert_eq!(clean_underlying("MC_FP"), Some("MC".into()));
        assert_eq!(clean_underlying("NKY"), Some("NKY".into()));
        assert_eq!(clean_underlying("none"), None);
        assert_eq!(clean_underlying("nan"), None);
        assert_eq!(clean_underlying(" "), None);
        assert_eq!(clean_underlying("-"), None);
    }

    #[test]
    fn underlying_list_split() {
        assert_eq!(
            split_underlyings("SX5E Index; SPX Index;NKY Index", ";"),
            vec!["SX5E Index", "SPX Index", "NKY Index"]
        );
        assert_eq!(split_underlyings("A;B,C", ";,"), vec!["A", "B", "C"]);
        assert_eq!(split_underlyings("A;B;C;D;E;F", ";").len(), 5);
    }
}
