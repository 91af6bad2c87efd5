//! Compiled-in source profiles, one per supported issuing bank.
//!
//! Declaration order is sender-detection order.

use once_cell::sync::Lazy;
use regex::Regex;

use super::layout::{
    CellCapture, CellScope, HeaderScope, KeywordMatch, Orientation, TableLayout, TableSelector,
};
use super::policy::{CouponQuote, NoCallRule, ReofferQuote, UnitConventionPolicy};
use super::registry::SourceProfile;
use super::variants::FieldVariantTable;
use crate::schema::field::{CanonicalField as C, Field};

static SWISSQUOTE_COUPON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([\d.,]+)\s*\(coupon p\.a\.\)").expect("swissquote coupon regex")
});

fn profile(
    key: &str,
    senders: &[&str],
    table: TableSelector,
    variants: FieldVariantTable,
    conventions: UnitConventionPolicy,
) -> SourceProfile {
    SourceProfile {
        key: key.to_string(),
        sender_patterns: senders.iter().map(|s| s.to_string()).collect(),
        table,
        layout: TableLayout::default(),
        variants,
        conventions,
    }
}

fn with_layout(mut p: SourceProfile, layout: TableLayout) -> SourceProfile {
    p.layout = layout;
    p
}

fn keywords(words: &[&str], matching: KeywordMatch, scope: HeaderScope) -> TableSelector {
    TableSelector::HeaderKeywords {
        keywords: words.iter().map(|w| w.to_string()).collect(),
        matching,
        scope,
    }
}

const FIRST: TableSelector = TableSelector::Position { index: 0 };
const TWO_ROWS: TableSelector = TableSelector::FirstWithRows { min_rows: 2 };
const FIRST_ROW: HeaderScope = HeaderScope::LeadingRows { rows: 1 };

pub fn profiles() -> Vec<SourceProfile> {
    vec![
        jpm(),
        natixis(),
        citi(),
        bofa(),
        socgen(),
        gs(),
        bnp(),
        lukb(),
        jb(),
        hsbc(),
        ms(),
        ubs(),
        marex(),
        bbva(),
        cibc(),
        barclays(),
        leonteq(),
        swissquote(),
    ]
}

fn jpm() -> SourceProfile {
    profile(
        "jpm",
        &["jpmorgan", "jpm_autopricer", "autopricer"],
        keywords(
            &["product", "tenor (m)", "coupon p.a. (%)"],
            KeywordMatch::AllIgnoreCase,
            FIRST_ROW,
        ),
        FieldVariantTable::new()
            .with(C::Product, &["Product", "Product Name"])
            .with(C::Currency, &["Currency", "Ccy"])
            .with(C::Tenor, &["Tenor (m)", "Tenor", "Tenor (months)", "Maturity", "Tenor (M)"])
            .with_underlyings(5, &["BBG Code {n}", "Underlying {n}"])
            .with(C::Strike, &["Strike (%)", "Strike %", "Strike"])
            .with(C::BarrierType, &["Barrier Type", "KI Type", "KI Barrier Type"])
            .with(C::Barrier, &["KI Barrier (%)", "KI Barrier Level (%)", "Barrier (%)"])
            .with(
                C::AutocallFrequency,
                &["Early Termination Period", "KO Frequency", "Autocall Frequency", "Observation Frequency"],
            )
            .with(
                C::NoCallPeriod,
                &[
                    "Non Autocallable Period",
                    "Non Callable Periods",
                    "No Call Period",
                    "No Call Periods",
                    "Non-Callable Period",
                ],
            )
            .with(
                C::AutocallBarrier,
                &["Early Termination Level (%)", "Autocall Barrier (%)", "KO Barrier (%)", "Trigger Level (%)"],
            )
            .with(C::Coupon, &["Coupon p.a. (%)", "Coupon (%)", "Coupon Rate", "Fixed Coupon p.a. (%)"])
            .with(C::Reoffer, &["Reoffer (%)", "Upfront (%)", "Fees Upfront/PC", "Price Result"]),
        UnitConventionPolicy::new(NoCallRule::DirectPeriods),
    )
}

fn natixis() -> SourceProfile {
    profile(
        "natixis",
        &["natixis.com"],
        FIRST,
        FieldVariantTable::new()
            .with(C::Product, &["Ref", "Product", "Product Name"])
            .with(
                C::Coupon,
                &["Coupon p.a. (%)", "Fixed Coupon p.a. (%)", "Phoenix Coupon p.a. (%)", "Coupon (%)", "Coupon p.a"],
            )
            .with(C::Currency, &["Currency", "Ccy"])
            .with(C::Tenor, &["Tenor (m)", "Tenor", "Maturity (m)", "Tenor in months"])
            .with(C::Strike, &["Strike (%)", "Strike %", "Strike Level"])
            .with(
                C::Barrier,
                &["KI Barrier (%)", "Barrier Level", "Phoenix Barrier Level (%)", "Barrier (%)", "KI Barrier"],
            )
            .with(C::Reoffer, &["Reoffer (%)", "Reoffer", "Issue Price (%)", "Reoffer Price"])
            .with_underlyings(5, &["BBG Code {n}", "Underlying {n}", "Underlying_{n}", "Ticker {n}"])
            .with(C::BarrierType, &["Barrier Type", "KI Type"])
            .with(
                C::AutocallBarrier,
                &["Early Termination Level (%)", "Autocall Level (%)", "Autocall Trigger (%)"],
            )
            .with(C::AutocallFrequency, &["Early Termination Period", "KO Frequency", "Autocall Frequency"])
            .with(C::NoCallPeriod, &["Non Autocallable Period", "Non callable Period", "No Call Period"]),
        UnitConventionPolicy::new(NoCallRule::DirectPeriods),
    )
}

fn citi() -> SourceProfile {
    profile(
        "citi",
        &["citi.com"],
        TWO_ROWS,
        FieldVariantTable::new()
            .with(C::Product, &["Product", "Product Name"])
            .with(C::Currency, &["Currency", "Ccy"])
            .with(C::Tenor, &["Tenor (m)", "Tenor", "Tenor (months)"])
            .with_underlyings(5, &["BBG Code {n}", "Underlying {n}"])
            .with(C::Strike, &["Strike (%)", "Strike %", "Strike"])
            .with(C::BarrierType, &["Barrier Type"])
            .with(C::Barrier, &["KI Barrier (%)", "Barrier (%)", "KI Barrier"])
            .with(
                C::AutocallBarrier,
                &["Autocall Barrier (%)", "KO Barrier (%)", "Early Termination Level (%)"],
            )
            .with(C::AutocallFrequency, &["Autocall Frequency", "Observation Frequency (m)", "KO Frequency"])
            .with(C::NoCallPeriod, &["No Call Period", "Non Callable Periods", "Non Autocallable Period"])
            .with(C::Coupon, &["Coupon p.a. (%)", "Coupon (%)", "Fixed Coupon p.a. (%)"])
            .with(C::Reoffer, &["Reoffer (%)", "Upfront (%)", "Reoffer"]),
        UnitConventionPolicy::new(NoCallRule::DirectPeriods).reoffer(ReofferQuote::UpfrontFee),
    )
}

fn bofa() -> SourceProfile {
    profile(
        "bofa",
        &["bofa.com", "bankofamerica.com"],
        TWO_ROWS,
        FieldVariantTable::new()
            .with(C::Product, &["Product"])
            .with(C::Coupon, &["Coupon p.a. (%)", "SnowBall Coupon"])
            .with(C::Currency, &["Currency"])
            .with(C::Tenor, &["Tenor (M)", "Tenor (m)", "Tenor", "Maturity"])
            .with(C::Strike, &["Strike", "Strike (%)"])
            .with(C::Barrier, &["KI Barrier (%)", "Barrier (%)"])
            .with(C::BarrierType, &["Barrier Type"])
            .with(C::AutocallBarrier, &["Autocall Barrier", "Trigger Level (%)"])
            .with(C::AutocallFrequency, &["Autocall Frequency"])
            .with(C::NoCallPeriod, &["No Call Period", "No Call Periods", "Non Callable Periods"])
            .with(C::Reoffer, &["Fees Upfront/PC", "Reoffer (%)", "Upfront (%)"])
            .with(Field::Underlyings, &["Underlyings"]),
        UnitConventionPolicy::new(NoCallRule::FirstCallMonth)
            .fallback_frequency_months(6)
            .reoffer(ReofferQuote::FeeIfAtMost { threshold: 20.0 })
            .underlying_delimiters(";"),
    )
}

fn socgen() -> SourceProfile {
    profile(
        "socgen",
        &["socgen.com", "societegenerale.com", "sgcib.com"],
        TWO_ROWS,
        FieldVariantTable::new()
            .with(C::Product, &["Product", "PRODUCT"])
            .with(C::Currency, &["Currency"])
            .with(C::Tenor, &["Tenor", "Tenor (m)", "Tenor (months)", "Tenor m"])
            .with(C::Underlying1, &["BBG Code 1 +"])
            .with_underlyings(5, &["BBG Code {n}"])
            .with(C::Strike, &["Strike (%)", "Put Strike (%)", "Strike %", "Strike"])
            .with(C::BarrierType, &["Barrier Type"])
            .with(C::Barrier, &["KI Barrier (%)", "Barrier (%)"])
            .with(C::AutocallBarrier, &["Autocall Level (%)", "Early Termination Level (%)"])
            .with(C::AutocallFrequency, &["Frequency", "Coupon Frequency", "Early Termination Period"])
            .with(
                C::NoCallPeriod,
                &[
                    "Autocall From Period",
                    "Callable by issuer from Period",
                    "Non Autocallable Period",
                    "No Call Period",
                    "Non Callable Period",
                ],
            )
            .with(C::Coupon, &["Coupon p.a. (%)", "Coupon (% p.a.)", "Coupon (%)", "Coupon"])
            .with(C::Reoffer, &["Reoffer (%)", "Reoffer"]),
        UnitConventionPolicy::new(NoCallRule::OneBasedPeriod).barrier_sentinels(&[0.0]),
    )
}

fn gs() -> SourceProfile {
    profile(
        "gs",
        &["gs.com", "gs-marquee-space"],
        keywords(&["Product", "Currency"], KeywordMatch::All, HeaderScope::HeaderCells),
        FieldVariantTable::new()
            .with(C::Issuer, &["Issuer", "Emittent"])
            .with(C::Product, &["Product", "Prod"])
            .with(C::Currency, &["Currency", "CCY", "Ccy"])
            .with(C::Tenor, &["Tenor (m)", "Tenor (M)", "Tenor", "Tenor (months)"])
            .with_underlyings(5, &["BBG Code {n}", "Underlying {n}", "Ticker {n}"])
            .with(C::Strike, &["Strike(%)", "Strike (%)", "Strike %"])
            .with(C::BarrierType, &["Barrier Type", "KI Type"])
            .with(C::Barrier, &["KI Barrier(%)", "Barrier(%)", "Barrier %", "KI Level(%)"])
            .with(C::AutocallFrequency, &["Early Termination Period", "Coupon Frequency", "Frequency"])
            .with(C::NoCallPeriod, &["Non Autocallable Period", "NoCall Period", "Autocall from Period X"])
            .with(
                C::AutocallBarrier,
                &["Early Termination Level(%)", "Autocall Level(%)", "Trigger Level(%)"],
            )
            .with(C::Coupon, &["Coupon p.a.(%)", "Coupon p.a. (%)", "Coupon (%)", "Coupon"])
            .with(C::Reoffer, &["Reoffer(%)", "Reoffer (%)", "Issue Price", "Price (%)", "Note Price"]),
        UnitConventionPolicy::new(NoCallRule::DirectPeriods).barrier_sentinels(&[100.0]),
    )
}

fn bnp() -> SourceProfile {
    profile(
        "bnp",
        &["bnpparibas.com", "quotation.emea"],
        keywords(&["Coupon", "Exit Rate"], KeywordMatch::AnySubstring, FIRST_ROW),
        FieldVariantTable::new()
            .with(C::Product, &["PRODUCT"])
            .with(C::Currency, &["Currency"])
            .with(C::Tenor, &["Tenor", "Tenor (m)", "Tenor (months)", "Tenor m"])
            .with(C::Underlying1, &["BBG Code 1 +"])
            .with_underlyings(5, &["BBG Code {n}"])
            .with(C::Strike, &["Strike (%)", "Strike %", "Strike"])
            .with(C::BarrierType, &["Barrier Type"])
            .with(C::Barrier, &["KI Barrier (%)", "Barrier (%)"])
            .with(C::AutocallFrequency, &["Early Termination Period"])
            .with(C::NoCallPeriod, &["Non Autocallable Period", "Non Callable Period"])
            .with(C::AutocallBarrier, &["Early Termination Level (%)"])
            .with(
                C::Coupon,
                &["Coupon p.a. (%)", "Coupon (%)", "Coupon", "Exit Rate p.a. (%)", "Exit Rate (%)", "Exit rate (%)"],
            )
            .with(C::Reoffer, &["Reoffer (%)", "Reoffer"]),
        UnitConventionPolicy::new(NoCallRule::DirectPeriods).barrier_sentinels(&[0.0]),
    )
}

fn lukb() -> SourceProfile {
    with_layout(
        profile(
            "lukb",
            &["lukb.ch"],
            FIRST,
            FieldVariantTable::new()
                .with(C::Product, &["Product"])
                .with(C::Currency, &["Currency"])
                .with(C::Tenor, &["Tenor (m)"])
                .with_underlyings(5, &["BBG Code {n}"])
                .with(C::Strike, &["Strike (%)"])
                .with(C::BarrierType, &["Barrier Type"])
                .with(C::Barrier, &["KI Barrier (%)"])
                .with(C::AutocallFrequency, &["Early Termination Period"])
                .with(C::NoCallPeriod, &["Non Callable Period"])
                .with(C::AutocallBarrier, &["Early Termination Level (%)"])
                .with(C::Coupon, &["Coupon p.a. (%)"])
                .with(C::Reoffer, &["Reoffer (%)"]),
            UnitConventionPolicy::new(NoCallRule::DirectPeriods)
                .reoffer(ReofferQuote::WithholdingGrossUp { rate: 1.08 })
                .barrier_sentinels(&[0.0]),
        ),
        TableLayout {
            cells: CellScope::DataOnly,
            ..TableLayout::default()
        },
    )
}

fn jb() -> SourceProfile {
    profile(
        "jb",
        &["juliusbaer.com", "jbx.epricer@juliusbaer.com"],
        FIRST,
        FieldVariantTable::new()
            .with(C::Product, &["Product"])
            .with(C::Currency, &["Currency"])
            .with(C::Tenor, &["Tenor (m)", "Tenor (M)", "Tenor"])
            .with_underlyings(5, &["BBG Code {n}"])
            .with(C::Strike, &["Strike (%)"])
            .with(C::BarrierType, &["Barrier Type"])
            .with(C::Barrier, &["KI Barrier (%)"])
            .with(C::AutocallFrequency, &["Callable Period", "Early Termination Period"])
            .with(C::NoCallPeriod, &["Non Callable Period", "Non Autocallable Period"])
            .with(C::Coupon, &["Coupon p.a. (%)"])
            .with(C::Reoffer, &["Reoffer (%)", "Upfront (%)"]),
        UnitConventionPolicy::new(NoCallRule::DirectPeriods)
            .reoffer(ReofferQuote::FeeIfAtMost { threshold: 20.0 })
            .underlying_alias("1321 JT", "NKY")
            .underlying_alias("NKY Index", "NKY"),
    )
}

fn hsbc() -> SourceProfile {
    profile(
        "hsbc",
        &["hsbc.com", "wmssp@hsbc.com", "hsbc.fr"],
        FIRST,
        FieldVariantTable::new()
            .with(C::Product, &["Product"])
            .with(C::Currency, &["Currency"])
            .with(C::Tenor, &["Tenor (m)", "Tenor", "Tenor (months)", "Tenor m"])
            .with(C::Underlying1, &["Underlying"])
            .with_underlyings(5, &["Und_{n}", "BBG Code {n}", "Underlying {n}", "Underlying_{n}"])
            .with(C::Strike, &["Strike (%)", "Strike %", "Strike"])
            .with(C::BarrierType, &["Barrier Type", "KI Type"])
            .with(C::Barrier, &["KI Barrier (%)", "Barrier (%)"])
            .with(C::AutocallFrequency, &["Early Termination Period", "Autocall Frequency"])
            .with(C::NoCallPeriod, &["Non Autocallable Period", "No Call Period"])
            .with(C::Coupon, &["Coupon p.a. (%)", "Coupon (%)", "Coupon"])
            .with(C::Reoffer, &["Reoffer (%)", "Reoffer", "Reoffer Price"])
            .with(C::AutocallBarrier, &["Early Termination Level (%)", "Autocall Level (%)"]),
        UnitConventionPolicy::new(NoCallRule::DirectPeriods),
    )
}

fn ms() -> SourceProfile {
    profile(
        "ms",
        &["morganstanley.com", "morgan.stanley.swiss"],
        FIRST,
        FieldVariantTable::new()
            .with(C::Product, &["Product", "Product Type", "Prod", "Structure"])
            .with(C::Currency, &["CCY", "Currency", "Ccy", "Curr"])
            .with(C::Reoffer, &["Reoffer (%)", "Reoffer", "Note Price", "Issue Price", "Price (%)"])
            .with(
                C::Tenor,
                &["Tenor (M)", "Tenor (m)", "Tenor", "TENOR", "Maturity", "Tenor (Months)", "Tenor (months)"],
            )
            .with(C::Underlying1, &["BBG Code 1 +"])
            .with_underlyings(5, &["BBG Code {n}", "Underlying {n}", "UL {n}", "Ticker {n}"])
            .with(Field::CallStrike, &["Call Strike (%)", "Call Strike %", "Call Strike"])
            .with(Field::PutStrike, &["Put Strike (%)", "Put Strike %", "Put Strike"])
            .with(C::Strike, &["Strike (%)", "Strike %", "Strike", "Initial Strike (%)"])
            .with(
                C::Barrier,
                &["KI Barrier (%)", "Barrier (%)", "Put Barrier (%)", "Downside Barrier (%)", "Protection (%)"],
            )
            .with(
                C::BarrierType,
                &["Barrier Type", "Downside Type", "Protection Type", "Barrier Observation Type"],
            )
            .with(
                C::AutocallFrequency,
                &["Early Termination Period", "Coupon Frequency", "Frequency", "Payment Frequency"],
            )
            .with(
                C::AutocallBarrier,
                &[
                    "Early Termination Level (%)",
                    "Autocall Level (%)",
                    "Autocall Trigger Level (%)",
                    "Trigger Level (%)",
                    "Autocall (%)",
                ],
            )
            .with(
                C::NoCallPeriod,
                &[
                    "Autocall from Period X",
                    "Non Autocallable Period",
                    "Autocall Protection (Months)",
                    "NoCall Period",
                    "Non-Callable Period",
                ],
            )
            .with(Field::PeriodicCoupon, &["Periodic Coupon (%)", "Coupon Periodic (%)", "Coupon per Period (%)"])
            .with(
                C::Coupon,
                &[
                    "Coupon Per Annum (%)",
                    "Coupon p.a. (%)",
                    "Coupon (%)",
                    "Coupon",
                    "Coupon Rate (%)",
                    "Coupon p.a.",
                    "Coupon p.a",
                ],
            ),
        UnitConventionPolicy::new(NoCallRule::OneBasedPeriod),
    )
}

fn ubs() -> SourceProfile {
    with_layout(
        profile(
            "ubs",
            &["ubs.com", "ol-rmp-marketaccess-ep@ubs.com"],
            keywords(
                &["Product", "Currency", "Tenor (m)", "Coupon p.a. (%)"],
                KeywordMatch::All,
                FIRST_ROW,
            ),
            FieldVariantTable::new()
                .with(C::Product, &["Product"])
                .with(C::Currency, &["Currency"])
                .with_underlyings(5, &["Underlying {n}"])
                .with(C::Reoffer, &["Reoffer (%)", "Upfront (%)"])
                .with(C::Tenor, &["Tenor (m)", "Tenor", "Tenor (M)"])
                .with(C::AutocallFrequency, &["Frequency"])
                .with(
                    C::NoCallPeriod,
                    &[
                        "Autocall From Period",
                        "Callable by issuer from Period",
                        "Non Autocallable Period",
                        "No Call Period",
                        "Non Callable Period",
                    ],
                )
                .with(C::AutocallBarrier, &["Autocall Level (%)"])
                .with(C::Coupon, &["Coupon p.a. (%)", "Coupon (%)"])
                .with(C::BarrierType, &["Barrier Type", "KI Barrier Type"])
                .with(C::Barrier, &["Barrier (%)", "KI Barrier (%)"])
                .with(C::Strike, &["Put Strike (%)", "Strike (%)"]),
            UnitConventionPolicy::new(NoCallRule::OneBasedPeriod),
        ),
        TableLayout {
            fold_header_hyphens: true,
            ..TableLayout::default()
        },
    )
}

fn marex() -> SourceProfile {
    profile(
        "marex",
        &["marex", "agile@marexfp.com"],
        keywords(
            &["Structure", "Currency", "Tenor (m)", "Coupon p.a. (%)"],
            KeywordMatch::All,
            FIRST_ROW,
        ),
        FieldVariantTable::new()
            .with(C::Product, &["Structure"])
            .with(C::Currency, &["Currency"])
            .with_underlyings(5, &["Bloomberg Ticker {n}"])
            .with(C::Reoffer, &["Reoffer / Upfront (%)"])
            .with(C::Tenor, &["Tenor (m)"])
            .with(C::AutocallFrequency, &["Frequency"])
            .with(C::NoCallPeriod, &["First Observation in (m)"])
            .with(C::AutocallBarrier, &["Autocall Trigger Level (%)"])
            .with(C::Coupon, &["Coupon p.a. (%)"])
            .with(C::Strike, &["Strike Level (%)"])
            .with(C::BarrierType, &["Barrier Type"])
            .with(C::Barrier, &["Barrier Level"]),
        UnitConventionPolicy::new(NoCallRule::FirstCallMonth),
    )
}

fn bbva() -> SourceProfile {
    with_layout(
        profile(
            "bbva",
            &["bbva.com"],
            TableSelector::FirstWithRows { min_rows: 6 },
            FieldVariantTable::new()
                .with(C::Product, &["Product"])
                .with(C::Currency, &["Currency"])
                .with(
                    C::Tenor,
                    &["Expiry / Maturity / Tenor", "Tenor", "Tenor (m)", "Tenor (months)"],
                )
                .with_underlyings(5, &["BBG Code {n}"])
                .with(C::Strike, &["Strike (%)", "Strike (%)*", "Strike"])
                .with(C::BarrierType, &["Barrier Type", "KI Type", "KI Barrier Type"])
                .with(C::Barrier, &["KI Barrier Level (%)", "KI Barrier (%)", "Barrier (%)"])
                .with(
                    C::AutocallFrequency,
                    &["Frequency (1m, 3m, 6m, 12m)", "ER Frequency (1m, 3m, 6m, 12m)"],
                )
                .with(C::NoCallPeriod, &["ER Non cancelable Periods", "NC Periods"])
                .with(
                    C::AutocallBarrier,
                    &["Autocall Trigger Level (%)", "ER Trigger (%)", "ER Coupon Type"],
                )
                .with(
                    C::Coupon,
                    &["Coupon (%)", "Coupon (%)*", "Coupon p.a. (%)", "ER Coupon Amount (%)"],
                )
                .with(C::Reoffer, &["Price Result", "Reoffer (%)"]),
            UnitConventionPolicy::new(NoCallRule::DirectPeriods).coupon(CouponQuote::PerObservation),
        ),
        TableLayout {
            orientation: Orientation::FieldsInRows,
            ..TableLayout::default()
        },
    )
}

fn cibc() -> SourceProfile {
    profile(
        "cibc",
        &["cibc.com"],
        keywords(
            &["client ref", "pricing ccy", "notional"],
            KeywordMatch::AllIgnoreCase,
            HeaderScope::LeadingRows { rows: 2 },
        ),
        FieldVariantTable::new()
            .with(C::Product, &["Client Ref"])
            .with(C::Currency, &["Pricing Ccy"])
            .with(C::Tenor, &["Term"])
            .with(C::Reoffer, &["Price"])
            .with(C::Coupon, &["Coupon per Period"])
            .with(C::Barrier, &["Principal Barrier"])
            .with(Field::Underlyings, &["Underlying(s)"])
            .with(C::BarrierType, &["Barrier Monitoring"])
            .with(C::AutocallBarrier, &["Auto-Call Barrier"])
            .with(C::AutocallFrequency, &["Auto-Call Freq"])
            .with(C::NoCallPeriod, &["Auto-Call Start"])
            .with(C::Strike, &["Put Strike"]),
        UnitConventionPolicy::new(NoCallRule::FirstCallMonth).underlying_delimiters(";,"),
    )
}

fn barclays() -> SourceProfile {
    with_layout(
        profile(
            "barclays",
            &["barclays.com"],
            keywords(&["Product"], KeywordMatch::AnySubstring, HeaderScope::AllCells),
            FieldVariantTable::new()
                .with(C::Product, &["Product"])
                .with(C::Coupon, &["Coupon p.a. (%)"])
                .with(C::Tenor, &["Tenor (m)"])
                .with(C::Strike, &["Strike (%)"])
                .with(C::Barrier, &["KI Barrier (%)"])
                .with(C::Reoffer, &["Reoffer (%)"])
                .with(C::Currency, &["Currency"])
                .with_underlyings(4, &["BBG Code {n}"])
                .with(C::BarrierType, &["Barrier Type"])
                .with(C::AutocallFrequency, &["Early Termination Period"])
                .with(C::NoCallPeriod, &["Non Autocallable Period"])
                .with(C::AutocallBarrier, &["Early Termination Level (%)"]),
            UnitConventionPolicy::new(NoCallRule::DirectPeriods),
        ),
        TableLayout {
            cells: CellScope::DataOnly,
            ..TableLayout::default()
        },
    )
}

fn leonteq() -> SourceProfile {
    with_layout(
        profile(
            "leonteq",
            &["leonteq.com"],
            FIRST,
            FieldVariantTable::new()
                .with(C::Product, &["Product"])
                .with(C::Currency, &["Currency"])
                .with(C::Issuer, &["Issuer", "Emittent"])
                .with_underlyings(4, &["BBG Code {n}"])
                .with(C::Strike, &["Strike (%)", "Put Strike (%)", "Strike %"])
                .with(
                    C::Tenor,
                    &["Tenor (m)", "Tenor (months)", "Maturity (m)", "Maturity (months)"],
                )
                .with(C::Coupon, &["Coupon p.a. (%)", "Coupon (%)", "Coupon Rate (%)", "Coupon %"])
                .with(
                    C::Reoffer,
                    &["Upfront / NotePrice (%)", "Reoffer (%)", "Price (%)", "Note Price (%)"],
                )
                .with(C::BarrierType, &["Barrier Type"])
                .with(
                    C::Barrier,
                    &["KI Barrier (%)", "KI Barrier", "KI Barrier Level (%)", "Barrier (%)"],
                )
                .with(
                    C::AutocallBarrier,
                    &["KO Barrier (%)", "Autocall Trigger (%)", "Autocall Level (%)"],
                )
                .with(
                    C::AutocallFrequency,
                    &["Observation Frequency (m)", "Callable Frequency (m)", "Call Frequency (m)"],
                )
                .with(
                    C::NoCallPeriod,
                    &["Non Callable Periods", "Non-Callable Periods", "No Call Periods"],
                ),
            UnitConventionPolicy::new(NoCallRule::DirectPeriods),
        ),
        TableLayout {
            drop_empty_columns: true,
            ..TableLayout::default()
        },
    )
}

fn swissquote() -> SourceProfile {
    with_layout(
        profile(
            "swissquote",
            &["swissquote.ch", "swissquote.com"],
            keywords(&["Product Type", "Currency"], KeywordMatch::All, HeaderScope::HeaderCells),
            FieldVariantTable::new()
                .with(C::Product, &["Product Type"])
                .with(C::Currency, &["Currency"])
                .with(C::Reoffer, &["Distribution Fee (%)"])
                .with(C::Tenor, &["Maturity"])
                .with_underlyings(5, &["Stock identifier {n}"])
                .with(C::Coupon, &["Coupon Rate (%)"])
                .with(C::Strike, &["Strike (%)"])
                .with(C::Barrier, &["Barrier level (%)"])
                .with(C::BarrierType, &["Barrier Type"])
                .with(C::AutocallFrequency, &["Frequency"])
                .with(C::NoCallPeriod, &["First Observation"])
                .with(C::AutocallBarrier, &["Autocall Trigger level"]),
            UnitConventionPolicy::new(NoCallRule::FirstCallMonth).reoffer(ReofferQuote::UpfrontFee),
        ),
        TableLayout {
            captures: vec![CellCapture {
                column: 0,
                pattern: SWISSQUOTE_COUPON.clone().into(),
                header: "Coupon Rate (%)".to_string(),
            }],
            ..TableLayout::default()
        },
    )
}
