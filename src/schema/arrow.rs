// src/schema/arrow.rs

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Builder, Int64Builder, StringBuilder};
use arrow::datatypes::{DataType, Field as ArrowField, Schema as ArrowSchema};
use arrow::record_batch::RecordBatch;
use once_cell::sync::Lazy;
use std::sync::Arc;

use super::field::CanonicalField;
use super::row::CanonicalRow;

/// Arrow type of a canonical column.
///
/// - coupon, strike, barrier, reoffer, autocall_barrier, tenor → Float64
/// - no_call_period                                            → Int64
/// - everything else                                           → Utf8
pub fn map_to_arrow_type(field: CanonicalField) -> DataType {
    match field {
        f if f.is_numeric() => DataType::Float64,
        CanonicalField::Tenor => DataType::Float64,
        CanonicalField::NoCallPeriod => DataType::Int64,
        _ => DataType::Utf8,
    }
}

static CANONICAL_SCHEMA: Lazy<Arc<ArrowSchema>> = Lazy::new(|| {
    let fields: Vec<ArrowField> = CanonicalField::ALL
        .iter()
        .map(|f| ArrowField::new(f.as_str(), map_to_arrow_type(*f), /* nullable = */ true))
        .collect();
    Arc::new(ArrowSchema::new(fields))
});

/// The fixed schema every batch shares.
pub fn canonical_schema() -> Arc<ArrowSchema> {
    CANONICAL_SCHEMA.clone()
}

/// Columnar view of finalized rows.
pub fn to_record_batch(rows: &[CanonicalRow]) -> Result<RecordBatch> {
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(CanonicalField::ALL.len());
    for field in CanonicalField::ALL {
        let column: ArrayRef = match map_to_arrow_type(field) {
            DataType::Float64 => {
                let mut b = Float64Builder::with_capacity(rows.len());
                for row in rows {
                    b.append_option(row.get(field).as_f64());
                }
                Arc::new(b.finish())
            }
            DataType::Int64 => {
                let mut b = Int64Builder::with_capacity(rows.len());
                for row in rows {
                    b.append_option(row.get(field).as_i64());
                }
                Arc::new(b.finish())
            }
            _ => {
                let mut b = StringBuilder::with_capacity(rows.len(), rows.len() * 8);
                for row in rows {
                    b.append_option(row.get(field).as_text());
                }
                Arc::new(b.finish())
            }
        };
        columns.push(column);
    }
    RecordBatch::try_new(canonical_schema(), columns).context("building canonical RecordBatch")
}
