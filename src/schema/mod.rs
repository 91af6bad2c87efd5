pub mod arrow;
pub mod enforce;
pub mod field;
pub mod row;
pub mod value;

pub use arrow::{canonical_schema, to_record_batch};
pub use enforce::finalize;
pub use field::{CanonicalField, Field, FIELD_COUNT};
pub use row::{CanonicalRow, Record};
pub use value::Value;
