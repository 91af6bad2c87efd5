// src/process/mod.rs
//
// One document through the pipeline: locate → matrix → resolve → transform → finalize.

pub mod locate;
pub mod parse;
pub mod raw_table;
pub mod resolve;
pub mod transform;
pub mod utils;

use once_cell::sync::Lazy;
use scraper::Html;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::registry::{SourceProfile, SourceRegistry};
use crate::error::ExtractError;
use crate::schema::enforce::finalize;
use crate::schema::row::CanonicalRow;

use self::locate::{locate, locate_largest, LocatedTable};
use self::raw_table::build_matrix;

/// What to do with a document from no configured source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableFallback {
    /// Reject it with `ExtractError::UnknownSource`.
    #[default]
    FailClosed,
    /// Relaxed mode: take the largest table and read canonical headers only.
    LargestTable,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    #[serde(default)]
    pub fallback: TableFallback,
}

impl PipelineOptions {
    pub fn relaxed() -> Self {
        Self {
            fallback: TableFallback::LargestTable,
        }
    }
}

static GENERIC: Lazy<SourceProfile> = Lazy::new(SourceProfile::generic);

fn extract_rows(
    table: &LocatedTable<'_>,
    profile: &SourceProfile,
    issuer_fallback: Option<&str>,
) -> Result<Vec<CanonicalRow>, ExtractError> {
    let raw = build_matrix(table, &profile.layout, &profile.key)?;
    let records = resolve::resolve(&raw, &profile.variants, profile.layout.fold_header_hyphens);
    Ok(records
        .into_iter()
        .map(|record| finalize(&transform::apply(record, &profile.conventions), issuer_fallback))
        .collect())
}

/// Extract canonical rows from one HTML document.
///
/// `source` is a registry key. Unknown or missing sources fail unless
/// `options` opts into the relaxed fallback, whose rows carry no issuer.
#[tracing::instrument(level = "info", skip_all, fields(source = source.unwrap_or("-")))]
pub fn process_document(
    markup: &str,
    source: Option<&str>,
    registry: &SourceRegistry,
    options: &PipelineOptions,
) -> Result<Vec<CanonicalRow>, ExtractError> {
    let profile = source.and_then(|key| registry.get(key));
    if profile.is_none() && options.fallback == TableFallback::FailClosed {
        return Err(ExtractError::UnknownSource(source.map(str::to_string)));
    }

    let html = Html::parse_document(markup);
    let rows = match profile {
        Some(profile) => {
            let table = locate(&html, &profile.table, profile.layout.cells, &profile.key)?;
            debug!(table = table.index, header_row = table.header_row, "table located");
            extract_rows(&table, profile, Some(&profile.key))?
        }
        None => {
            let key = source.unwrap_or(GENERIC.key.as_str());
            let table = locate_largest(&html, key)?;
            debug!(table = table.index, "relaxed mode: largest table");
            extract_rows(&table, &GENERIC, None)?
        }
    };
    debug!(rows = rows.len(), "document extracted");
    Ok(rows)
}
