// src/process/resolve.rs

use tracing::debug;

use crate::config::variants::FieldVariantTable;
use crate::process::raw_table::RawTable;
use crate::process::utils::normalize_header;
use crate::schema::field::Field;
use crate::schema::row::Record;
use crate::schema::value::Value;

/// What a physical column was resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnTarget {
    Field(Field),
    /// No variant claimed it; kept under the document's own header.
    Unmatched(String),
}

impl ColumnTarget {
    pub fn name(&self) -> &str {
        match self {
            ColumnTarget::Field(f) => f.as_str(),
            ColumnTarget::Unmatched(h) => h,
        }
    }
}

/// Map each header onto a field or leave it unmatched. Columns with a blank
/// header map to `None`.
///
/// Fields are visited in table order and take the first unclaimed header equal
/// to their most preferred variant, so a spelling listed under two fields goes
/// to whichever was declared first.
pub fn resolve_headers(
    headers: &[String],
    variants: &FieldVariantTable,
    fold_hyphens: bool,
) -> Vec<Option<ColumnTarget>> {
    let normalized: Vec<String> = headers
        .iter()
        .map(|h| normalize_header(h, fold_hyphens))
        .collect();
    let mut targets: Vec<Option<ColumnTarget>> = vec![None; headers.len()];

    for entry in variants.iter() {
        let claimed = entry.variants.iter().find_map(|variant| {
            let variant = normalize_header(variant, fold_hyphens);
            normalized
                .iter()
                .enumerate()
                .position(|(i, h)| targets[i].is_none() && *h == variant)
        });
        if let Some(i) = claimed {
            targets[i] = Some(ColumnTarget::Field(entry.field));
        }
    }

    for (i, target) in targets.iter_mut().enumerate() {
        if target.is_none() && !normalized[i].is_empty() {
            debug!(header = %normalized[i], "unmatched header kept as-is");
            *target = Some(ColumnTarget::Unmatched(normalized[i].clone()));
        }
    }
    targets
}

/// One record per data row, keyed by resolved field name.
///
/// Resolved fields are written first. An unmatched column only fills a name
/// no resolved field took, and then the first such column wins.
pub fn resolve(raw: &RawTable, variants: &FieldVariantTable, fold_hyphens: bool) -> Vec<Record> {
    let targets = resolve_headers(&raw.headers, variants, fold_hyphens);
    raw.rows
        .iter()
        .map(|row| {
            let mut record = Record::new();
            for (target, cell) in targets.iter().zip(row) {
                if let Some(ColumnTarget::Field(field)) = target {
                    record.set(field.as_str(), Value::text(cell));
                }
            }
            for (target, cell) in targets.iter().zip(row) {
                let Some(ColumnTarget::Unmatched(name)) = target else { continue };
                if record.get(name).is_none() {
                    record.set(name, Value::text(cell));
                }
            }
            record
        })
        .collect()
}
