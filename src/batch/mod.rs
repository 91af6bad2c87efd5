// src/batch/mod.rs

use anyhow::Result;
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::config::registry::SourceRegistry;
use crate::process::{process_document, PipelineOptions};
use crate::schema::arrow::to_record_batch;
use crate::schema::row::CanonicalRow;

/// One inbound document and the source it is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub markup: String,
    pub source: Option<String>,
}

impl RawDocument {
    pub fn new(markup: impl Into<String>, source: Option<&str>) -> Self {
        Self {
            markup: markup.into(),
            source: source.map(|s| s.trim().to_lowercase()),
        }
    }

    /// Attribute the document by its sender address.
    pub fn from_sender(markup: impl Into<String>, sender: &str, registry: &SourceRegistry) -> Self {
        let source = registry.detect_sender(sender).map(|p| p.key.clone());
        Self {
            markup: markup.into(),
            source,
        }
    }
}

/// A document that produced no rows, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDocument {
    pub index: usize,
    pub source: Option<String>,
    pub reason: String,
}

/// Concatenated rows of every document in a batch, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalBatch {
    rows: Vec<CanonicalRow>,
    skipped: Vec<SkippedDocument>,
}

impl CanonicalBatch {
    /// Run every document through the pipeline. A structural failure skips
    /// that document and never aborts the batch.
    pub fn assemble(
        documents: &[RawDocument],
        registry: &SourceRegistry,
        options: &PipelineOptions,
    ) -> Self {
        let mut batch = CanonicalBatch::default();
        for (index, doc) in documents.iter().enumerate() {
            match process_document(&doc.markup, doc.source.as_deref(), registry, options) {
                Ok(rows) => batch.rows.extend(rows),
                Err(e) => {
                    warn!(index, source = doc.source.as_deref(), error = %e, "document skipped");
                    batch.skipped.push(SkippedDocument {
                        index,
                        source: doc.source.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        info!(
            documents = documents.len(),
            rows = batch.rows.len(),
            skipped = batch.skipped.len(),
            "batch assembled"
        );
        batch
    }

    pub fn rows(&self) -> &[CanonicalRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<CanonicalRow> {
        self.rows
    }

    pub fn skipped(&self) -> &[SkippedDocument] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row count per issuer; rows without one are counted under `""`.
    pub fn counts_by_issuer(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for row in &self.rows {
            *counts
                .entry(row.issuer().unwrap_or_default().to_string())
                .or_insert(0) += 1;
        }
        counts
    }

    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        to_record_batch(&self.rows)
    }
}
