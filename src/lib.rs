pub mod batch;
pub mod config;
pub mod error;
pub mod process;
pub mod schema;

pub use batch::{CanonicalBatch, RawDocument};
pub use config::{SourceProfile, SourceRegistry};
pub use error::{ConfigError, ExtractError};
pub use process::{process_document, PipelineOptions, TableFallback};
pub use schema::{CanonicalField, CanonicalRow, Value};
