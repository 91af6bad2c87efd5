// src/process/locate.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::config::layout::{CellScope, HeaderScope, KeywordMatch, TableSelector};
use crate::error::ExtractError;
use crate::process::utils::clean_str;

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("table selector"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("row selector"));
static HEADER_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th").expect("th selector"));
static DATA_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("td selector"));
static ANY_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td, th").expect("cell selector"));

/// The table picked out of a document, plus the `<tr>` index of its header row.
#[derive(Debug, Clone, Copy)]
pub struct LocatedTable<'a> {
    pub element: ElementRef<'a>,
    /// Position among the candidate tables.
    pub index: usize,
    pub header_row: usize,
}

/// Text of one cell: text nodes trimmed, joined by a space, whitespace collapsed.
pub fn cell_text(cell: ElementRef<'_>) -> String {
    let joined = cell
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    clean_str(&joined)
}

pub fn cell_selector(scope: CellScope) -> &'static Selector {
    match scope {
        CellScope::All => &ANY_CELL,
        CellScope::DataOnly => &DATA_CELL,
    }
}

pub fn rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    table.select(&ROW).collect()
}

pub fn row_cells(row: ElementRef<'_>, scope: CellScope) -> Vec<String> {
    row.select(cell_selector(scope)).map(cell_text).collect()
}

fn inside_blockquote(table: ElementRef<'_>) -> bool {
    table
        .ancestors()
        .filter_map(|node| node.value().as_element())
        .any(|el| el.name().eq_ignore_ascii_case("blockquote"))
}

/// Every table outside quoted replies, in document order.
pub fn candidate_tables(html: &Html) -> Vec<ElementRef<'_>> {
    html.select(&TABLE)
        .filter(|t| !inside_blockquote(*t))
        .collect()
}

fn keywords_match(cells: &[String], keywords: &[String], matching: KeywordMatch) -> bool {
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| clean_str(k))
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        return false;
    }
    match matching {
        KeywordMatch::All => keywords.iter().all(|k| cells.iter().any(|c| c == k)),
        KeywordMatch::AllIgnoreCase => keywords.iter().all(|k| {
            let k = k.to_lowercase();
            cells.iter().any(|c| c.to_lowercase() == k)
        }),
        KeywordMatch::AnySubstring => keywords
            .iter()
            .any(|k| cells.iter().any(|c| c.contains(k.as_str()))),
    }
}

/// Header row of `table` under the keyword strategy, if it qualifies.
fn keyword_header_row(
    table: ElementRef<'_>,
    keywords: &[String],
    matching: KeywordMatch,
    scope: HeaderScope,
    cells: CellScope,
) -> Option<usize> {
    let table_rows = rows(table);
    if table_rows.len() < 2 {
        return None;
    }
    match scope {
        HeaderScope::HeaderCells => {
            let texts: Vec<String> = table.select(&HEADER_CELL).map(cell_text).collect();
            keywords_match(&texts, keywords, matching).then_some(0)
        }
        HeaderScope::AllCells => {
            let texts: Vec<String> = table.select(cell_selector(cells)).map(cell_text).collect();
            keywords_match(&texts, keywords, matching).then_some(0)
        }
        HeaderScope::LeadingRows { rows: n } => table_rows
            .iter()
            .take(n.max(1))
            .position(|row| keywords_match(&row_cells(*row, cells), keywords, matching)),
    }
}

/// Pick the pricing grid for a known source.
pub fn locate<'a>(
    html: &'a Html,
    selector: &TableSelector,
    cells: CellScope,
    source_key: &str,
) -> Result<LocatedTable<'a>, ExtractError> {
    let tables = candidate_tables(html);
    debug!(source_key, candidates = tables.len(), "locating table");

    let found = match selector {
        TableSelector::Position { index } => tables.get(*index).map(|t| (*index, *t, 0)),
        TableSelector::FirstWithRows { min_rows } => tables
            .iter()
            .enumerate()
            .find(|(_, t)| rows(**t).len() >= *min_rows)
            .map(|(i, t)| (i, *t, 0)),
        TableSelector::HeaderKeywords {
            keywords,
            matching,
            scope,
        } => tables.iter().enumerate().find_map(|(i, t)| {
            keyword_header_row(*t, keywords, *matching, *scope, cells).map(|h| (i, *t, h))
        }),
    };

    found
        .map(|(index, element, header_row)| LocatedTable {
            element,
            index,
            header_row,
        })
        .ok_or_else(|| ExtractError::NoTable {
            source_key: source_key.to_string(),
        })
}

/// Relaxed fallback: the table with the most rows (first on ties), if it has
/// more than one.
pub fn locate_largest<'a>(html: &'a Html, source_key: &str) -> Result<LocatedTable<'a>, ExtractError> {
    let mut best: Option<(usize, ElementRef<'a>, usize)> = None;
    for (i, table) in candidate_tables(html).into_iter().enumerate() {
        let n = rows(table).len();
        if n > 1 && best.map_or(true, |(_, _, m)| n > m) {
            best = Some((i, table, n));
        }
    }
    best.map(|(index, element, _)| LocatedTable {
        element,
        index,
        header_row: 0,
    })
    .ok_or_else(|| ExtractError::NoTable {
        source_key: source_key.to_string(),
    })
}
