// src/config/mod.rs

pub mod builtin;
pub mod layout;
pub mod policy;
pub mod registry;
pub mod variants;

pub use layout::{
    CapturePattern, CellCapture, CellScope, HeaderScope, KeywordMatch, Orientation, TableLayout,
    TableSelector,
};
pub use policy::{CouponQuote, NoCallRule, ReofferQuote, UnitConventionPolicy};
pub use registry::{RegistryFile, SourceProfile, SourceRegistry};
pub use variants::{FieldVariantTable, FieldVariants};
