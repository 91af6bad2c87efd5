use thiserror::Error;

/// Structural failures for a single document. The batch assembler recovers
/// from every variant by emitting zero rows for that document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("unsupported source: {}", .0.as_deref().unwrap_or("<none>"))]
    UnknownSource(Option<String>),

    #[error("{source_key}: no table matches the selection policy")]
    NoTable { source_key: String },

    #[error("{source_key}: located table has {rows} non-empty rows, need a header and at least one data row")]
    NoDataRows { source_key: String, rows: usize },
}

/// Invalid source configuration. These are programmer errors and are
/// reported when a registry is built, never during extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("source `{0}` is declared more than once")]
    DuplicateSource(String),

    #[error("source `{0}` declares no header variants")]
    EmptyVariants(String),

    #[error("source `{source_key}`: header `{header}` is listed under both `{first}` and `{second}`")]
    AmbiguousVariant {
        source_key: String,
        header: String,
        first: String,
        second: String,
    },

    #[error("source `{0}`: first-call-month rule needs an autocall_frequency column or a fallback frequency")]
    MissingFrequency(String),

    #[error("source `{source_key}`: invalid capture pattern: {message}")]
    BadCapture { source_key: String, message: String },

    #[error("source `{0}`: keyword table selection declares no keywords")]
    EmptyKeywords(String),
}
