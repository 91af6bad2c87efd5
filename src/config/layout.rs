// src/config/layout.rs

use regex::Regex;
use serde::{Deserialize, Serialize};

/// How the pricing grid is picked out of a document's tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum TableSelector {
    /// Always the table at `index` (document order).
    Position { index: usize },
    /// The first table with at least `min_rows` `<tr>` rows.
    FirstWithRows { min_rows: usize },
    /// The first table (of two or more rows) whose header carries the keywords.
    HeaderKeywords {
        keywords: Vec<String>,
        #[serde(default)]
        matching: KeywordMatch,
        #[serde(default)]
        scope: HeaderScope,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordMatch {
    /// Every keyword equals some cell.
    #[default]
    All,
    /// Every keyword equals some cell, ignoring case.
    AllIgnoreCase,
    /// Some cell contains some keyword.
    AnySubstring,
}

/// Which cells are searched for keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeaderScope {
    /// Every `<th>` cell of the table; the header is the first row.
    HeaderCells,
    /// Each of the first `rows` rows on its own; the first match is the header.
    LeadingRows { rows: usize },
    /// Every cell of the table; the header is the first row.
    AllCells,
}

impl Default for HeaderScope {
    fn default() -> Self {
        HeaderScope::LeadingRows { rows: 1 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellScope {
    /// `<td>` and `<th>`.
    #[default]
    All,
    /// `<td>` only.
    DataOnly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Header row on top, one product per row.
    #[default]
    Records,
    /// Field names down the first column, one product per column.
    FieldsInRows,
}

/// A synthetic column filled from a regex over another column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellCapture {
    pub column: usize,
    pub pattern: CapturePattern,
    pub header: String,
}

/// A regex compiled once when the profile is loaded, kept in config files as
/// its source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CapturePattern(Regex);

impl CapturePattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self)
    }

    pub fn regex(&self) -> &Regex {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Regex> for CapturePattern {
    fn from(re: Regex) -> Self {
        Self(re)
    }
}

impl TryFrom<String> for CapturePattern {
    type Error = regex::Error;

    fn try_from(pattern: String) -> Result<Self, Self::Error> {
        Self::new(&pattern)
    }
}

impl From<CapturePattern> for String {
    fn from(pattern: CapturePattern) -> Self {
        pattern.as_str().to_string()
    }
}

impl PartialEq for CapturePattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// Per-source quirks of the grid's physical shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableLayout {
    #[serde(default)]
    pub cells: CellScope,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub drop_empty_columns: bool,
    #[serde(default)]
    pub fold_header_hyphens: bool,
    #[serde(default)]
    pub captures: Vec<CellCapture>,
}
