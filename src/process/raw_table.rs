use regex::Regex;
use tracing::trace;

use crate::config::layout::{Orientation, TableLayout};
use crate::error::ExtractError;
use crate::process::locate::{row_cells, rows, LocatedTable};
use crate::process::utils::normalize_header;

#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Column names as the document spells them (whitespace normalized).
    pub headers: Vec<String>,
    /// Data rows, each exactly `headers.len()` cells wide.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |r| r[index].as_str())
    }

    /// Swap axes: the first column becomes the header row.
    fn transpose(self) -> RawTable {
        let mut grid = Vec::with_capacity(self.rows.len() + 1);
        grid.push(self.headers);
        grid.extend(self.rows);
        let width = grid.first().map_or(0, Vec::len);
        let mut columns: Vec<Vec<String>> = (0..width)
            .map(|c| grid.iter().map(|r| r[c].clone()).collect())
            .collect();
        let headers = if columns.is_empty() {
            Vec::new()
        } else {
            columns.remove(0)
        };
        RawTable {
            headers,
            rows: columns,
        }
    }

    fn drop_empty_columns(&mut self) {
        let keep: Vec<bool> = (0..self.width())
            .map(|c| !self.headers[c].is_empty() || self.column(c).any(|v| !v.is_empty()))
            .collect();
        let retain = |row: &mut Vec<String>| {
            let mut i = 0;
            row.retain(|_| {
                let k = keep[i];
                i += 1;
                k
            });
        };
        retain(&mut self.headers);
        self.rows.iter_mut().for_each(retain);
    }

    fn apply_capture(&mut self, column: usize, pattern: &Regex, header: &str) {
        if column >= self.width() {
            return;
        }
        let captured: Vec<String> = self
            .rows
            .iter()
            .map(|row| {
                pattern
                    .captures(&row[column])
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default()
            })
            .collect();
        match self.headers.iter().position(|h| h == header) {
            Some(existing) => {
                for (row, value) in self.rows.iter_mut().zip(captured) {
                    if row[existing].is_empty() {
                        row[existing] = value;
                    }
                }
            }
            None => {
                self.headers.push(header.to_string());
                for (row, value) in self.rows.iter_mut().zip(captured) {
                    row.push(value);
                }
            }
        }
    }
}

/// Pad with empty cells or truncate so `row` is exactly `width` wide.
pub fn fit_width(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}

/// Turn a located table into a rectangular header + rows grid.
pub fn build_matrix(
    table: &LocatedTable<'_>,
    layout: &TableLayout,
    source_key: &str,
) -> Result<RawTable, ExtractError> {
    let mut grid: Vec<Vec<String>> = rows(table.element)
        .into_iter()
        .skip(table.header_row)
        .map(|row| row_cells(row, layout.cells))
        .filter(|cells| cells.iter().any(|c| !c.is_empty()))
        .collect();

    if grid.len() < 2 {
        return Err(ExtractError::NoDataRows {
            source_key: source_key.to_string(),
            rows: grid.len(),
        });
    }

    let headers = grid.remove(0);
    let width = headers.len();
    let rows: Vec<Vec<String>> = grid
        .into_iter()
        .map(|row| {
            if row.len() != width {
                trace!(source_key, got = row.len(), width, "ragged row normalized");
            }
            fit_width(row, width)
        })
        .collect();
    let mut raw = RawTable { headers, rows };

    if layout.orientation == Orientation::FieldsInRows {
        raw = raw.transpose();
    }
    raw.headers = raw
        .headers
        .iter()
        .map(|h| normalize_header(h, layout.fold_header_hyphens))
        .collect();
    if layout.drop_empty_columns {
        raw.drop_empty_columns();
    }
    for capture in &layout.captures {
        raw.apply_capture(capture.column, capture.pattern.regex(), &capture.header);
    }

    if raw.rows.is_empty() {
        return Err(ExtractError::NoDataRows {
            source_key: source_key.to_string(),
            rows: 1,
        });
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::layout::{CapturePattern, CellCapture, TableSelector};
    use crate::config::CellScope;
    use crate::process::locate::locate;
    use scraper::Html;

    fn matrix(markup: &str, layout: &TableLayout) -> Result<RawTable, ExtractError> {
        let html = Html::parse_document(markup);
        let table = locate(&html, &TableSelector::Position { index: 0 }, layout.cells, "t")?;
        build_matrix(&table, layout, "t")
    }

    #[test]
    fn ragged_rows_are_fitted_to_header_width() {
        let raw = matrix(
            r#"<table>
              <tr><th>A</th><th>B</th><th>C</th><th>D</th></tr>
              <tr><td>1</td><td>2</td><td>3</td></tr>
              <tr><td>1</td><td>2</td><td>3</td><td>4</td><td>5</td><td>6</td></tr>
            </table>"#,
            &TableLayout::default(),
        )
        .unwrap();
        assert_eq!(raw.width(), 4);
        assert_eq!(raw.rows[0], vec!["1", "2", "3", ""]);
        assert_eq!(raw.rows[1], vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn fit_width_pads_and_truncates() {
        let row = |n: usize| (0..n).map(|i| i.to_string()).collect::<Vec<_>>();
        assert_eq!(fit_width(row(4), 5), vec!["0", "1", "2", "3", ""]);
        assert_eq!(fit_width(row(7), 5), vec!["0", "1", "2", "3", "4"]);
        assert_eq!(fit_width(row(5), 5), row(5));
    }

    #[test]
    fn empty_rows_are_dropped_and_single_row_fails() {
        let raw = matrix(
            "<table><tr><td>A</td></tr><tr><td> </td></tr><tr></tr><tr><td>x</td></tr></table>",
            &TableLayout::default(),
        )
        .unwrap();
        assert_eq!(raw.rows, vec![vec!["x".to_string()]]);

        let err = matrix("<table><tr><td>A</td></tr><tr><td></td></tr></table>", &TableLayout::default())
            .unwrap_err();
        assert_eq!(err, ExtractError::NoDataRows { source_key: "t".into(), rows: 1 });
    }

    #[test]
    fn data_only_cells_skip_th() {
        let layout = TableLayout {
            cells: CellScope::DataOnly,
            ..TableLayout::default()
        };
        let raw = matrix(
            "<table><tr><th>Banner</th></tr><tr><td>Product</td></tr><tr><td>P1</td></tr></table>",
            &layout,
        )
        .unwrap();
        assert_eq!(raw.headers, vec!["Product"]);
        assert_eq!(raw.rows, vec![vec!["P1".to_string()]]);
    }

    #[test]
    fn fields_in_rows_are_transposed() {
        let layout = TableLayout {
            orientation: Orientation::FieldsInRows,
            ..TableLayout::default()
        };
        let raw = matrix(
            r#"<table>
              <tr><td>Product</td><td>Autocall</td><td>Phoenix</td></tr>
              <tr><td>Currency</td><td>EUR</td><td>USD</td></tr>
              <tr><td>Coupon (%)</td><td>2</td></tr>
            </table>"#,
            &layout,
        )
        .unwrap();
        assert_eq!(raw.headers, vec!["Product", "Currency", "Coupon (%)"]);
        assert_eq!(raw.rows.len(), 2);
        assert_eq!(raw.rows[0], vec!["Autocall", "EUR", "2"]);
        assert_eq!(raw.rows[1], vec!["Phoenix", "USD", ""]);
    }

    #[test]
    fn spacer_columns_are_dropped() {
        let layout = TableLayout {
            drop_empty_columns: true,
            ..TableLayout::default()
        };
        let raw = matrix(
            "<table><tr><td>Product</td><td></td><td>Currency</td></tr><tr><td>P</td><td></td><td>CHF</td></tr></table>",
            &layout,
        )
        .unwrap();
        assert_eq!(raw.headers, vec!["Product", "Currency"]);
        assert_eq!(raw.rows[0], vec!["P", "CHF"]);
    }

    #[test]
    fn headers_fold_hyphens_when_asked() {
        let layout = TableLayout {
            fold_header_hyphens: true,
            ..TableLayout::default()
        };
        let raw = matrix(
            "<table><tr><td>Non-Callable Period</td></tr><tr><td>1-2</td></tr></table>",
            &layout,
        )
        .unwrap();
        assert_eq!(raw.headers, vec!["Non Callable Period"]);
        assert_eq!(raw.rows[0], vec!["1-2"]);
    }

    #[test]
    fn captures_add_a_synthetic_column() {
        let layout = TableLayout {
            captures: vec![CellCapture {
                column: 0,
                pattern: CapturePattern::new(r"(?i)([\d.,]+)\s*\(coupon p\.a\.\)").unwrap(),
                header: "Coupon Rate (%)".into(),
            }],
            ..TableLayout::default()
        };
        let raw = matrix(
            r#"<table>
              <tr><th>Product Type</th><th>Currency</th></tr>
              <tr><td>Phoenix 5.25 (Coupon p.a.)</td><td>CHF</td></tr>
              <tr><td>Tracker</td><td>CHF</td></tr>
            </table>"#,
            &layout,
        )
        .unwrap();
        assert_eq!(raw.headers, vec!["Product Type", "Currency", "Coupon Rate (%)"]);
        assert_eq!(raw.rows[0][2], "5.25");
        assert_eq!(raw.rows[1][2], "");
    }
}
