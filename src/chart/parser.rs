//! Spreadsheet grid -> `TypeChart`.
//!
//! Expected layout (after the outer frame row/column, which carry spreadsheet labels):
//!
//! ```text
//!            | FIRE | WATER | GRASS | TOTAL OFFENSE
//!   FIRE     | 0.5  | 0.5   | 2     | ...
//!   WATER    | 2    | 0.5   | 0.5   | ...
//!   GRASS    | 0.5  | 2     | 0.5   | ...
//!   TOTAL DEFENSE | ...
//! ```
//!
//! The summary row/column are optional and discarded. Row `i` attacks column `j`.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::chart::grid::{read_csv_grid, read_grid, RawGrid};
use crate::chart::model::TypeChart;
use crate::chart::names::{fold_key, is_no_type_spelling, title_case};
use crate::error::{ChartError, HeaderAxis};

pub const DEFAULT_TYPE_CHART_CSV_PATH: &str = "data/import/type_chart.csv";
/// Source-version tag written when none is supplied.
pub const DEFAULT_ROM_VERSION: &str = "v1.3.0";

const TOTAL_DEFENSE_LABEL: &str = "TOTAL DEFENSE";
const TOTAL_OFFENSE_LABEL: &str = "TOTAL OFFENSE";

#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Treat a header order mismatch as fatal instead of a warning.
    pub strict_order: bool,
    /// Defaults to today's date (UTC, `YYYY-MM-DD`).
    pub creation_date: Option<String>,
    pub rom_version: Option<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict_order: false,
            creation_date: None,
            rom_version: Some(DEFAULT_ROM_VERSION.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticSeverity {
    Info,
    Warning,
}

impl DiagnosticSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub severity: DiagnosticSeverity,
    pub message: String,
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Non-fatal findings from a successful parse.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub diagnostics: Vec<ParseDiagnostic>,
    pub dropped_total_defense: bool,
    pub dropped_total_offense: bool,
}

impl ParseReport {
    fn push(&mut self, severity: DiagnosticSeverity, message: impl Into<String>) {
        self.diagnostics.push(ParseDiagnostic {
            severity,
            message: message.into(),
        });
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == DiagnosticSeverity::Warning)
    }
}

#[derive(Debug, Clone)]
pub struct ParsedChart {
    pub chart: TypeChart,
    pub report: ParseReport,
}

/// Parse CSV text exported from the type chart spreadsheet.
pub fn parse_type_chart_csv(text: &str, options: &ParseOptions) -> Result<ParsedChart, ChartError> {
    let grid = read_csv_grid(text)?;
    parse_type_chart_grid(grid, options)
}

/// Read a CSV or workbook file and parse it. Nothing is written.
pub fn parse_type_chart_file(
    path: &Path,
    sheet: Option<&str>,
    options: &ParseOptions,
) -> Result<ParsedChart, ChartError> {
    tracing::info!(path = %path.display(), "reading type chart source");
    let grid = read_grid(path, sheet)?;
    parse_type_chart_grid(grid, options)
}

pub fn parse_type_chart_grid(
    grid: RawGrid,
    options: &ParseOptions,
) -> Result<ParsedChart, ChartError> {
    let width = grid.first().map(Vec::len).ok_or(ChartError::EmptyGrid)?;
    for (row, cells) in grid.iter().enumerate() {
        if cells.len() != width {
            return Err(ChartError::RaggedRow {
                row: row + 1,
                expected: width,
                found: cells.len(),
            });
        }
    }

    let mut report = ParseReport::default();

    // Outer frame: first row and first column are spreadsheet labels.
    let mut rows: RawGrid = grid
        .into_iter()
        .skip(1)
        .map(|row| row.into_iter().skip(1).collect())
        .collect();
    ensure_min_size(&rows)?;

    if rows
        .last()
        .and_then(|row| row.first())
        .is_some_and(|cell| cell.eq_ignore_ascii_case(TOTAL_DEFENSE_LABEL))
    {
        tracing::info!("dropping {TOTAL_DEFENSE_LABEL} row");
        rows.pop();
        report.dropped_total_defense = true;
        report.push(DiagnosticSeverity::Info, "dropped TOTAL DEFENSE summary row");
    }
    if rows
        .first()
        .and_then(|row| row.last())
        .is_some_and(|cell| cell.eq_ignore_ascii_case(TOTAL_OFFENSE_LABEL))
    {
        tracing::info!("dropping {TOTAL_OFFENSE_LABEL} column");
        for row in &mut rows {
            row.pop();
        }
        report.dropped_total_offense = true;
        report.push(DiagnosticSeverity::Info, "dropped TOTAL OFFENSE summary column");
    }
    ensure_min_size(&rows)?;

    let mut rows = rows.into_iter();
    let header = rows.next().ok_or(ChartError::EmptyGrid)?;
    let across: Vec<String> = header.iter().skip(1).map(|name| title_case(name)).collect();
    let body: Vec<Vec<String>> = rows.collect();
    let down: Vec<String> = body.iter().map(|row| title_case(&row[0])).collect();

    check_names(&across, HeaderAxis::Row)?;
    check_names(&down, HeaderAxis::Column)?;

    if across.len() != down.len() {
        return Err(ChartError::NotSquare {
            rows: down.len(),
            columns: across.len(),
        });
    }
    tracing::info!(types = %across.join(", "), "types across");

    if across != down {
        let across_joined = across.join(", ");
        let down_joined = down.join(", ");
        if options.strict_order {
            return Err(ChartError::HeaderOrderMismatch {
                across: across_joined,
                down: down_joined,
            });
        }
        tracing::warn!(
            across = %across_joined,
            down = %down_joined,
            "types across and down differ or are in a different order; using the order across"
        );
        report.push(
            DiagnosticSeverity::Warning,
            format!(
                "types across and down differ or are in a different order \
                 (across: [{across_joined}], down: [{down_joined}]); \
                 the order across was used. Fix the spreadsheet so both orders match."
            ),
        );
    }

    let mut matchups = Vec::with_capacity(body.len());
    for (row_index, row) in body.iter().enumerate() {
        let mut values = Vec::with_capacity(across.len());
        for (col_index, cell) in row.iter().skip(1).enumerate() {
            values.push(parse_multiplier(cell, &down[row_index], &across[col_index])?);
        }
        matchups.push(values);
    }

    let creation_date = options
        .creation_date
        .clone()
        .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string());

    let chart = TypeChart::new(across, matchups, creation_date, options.rom_version.clone())?;
    tracing::info!(types = chart.len(), "type chart parsed");
    Ok(ParsedChart { chart, report })
}

/// Header cell plus at least one type across and down.
fn ensure_min_size(rows: &RawGrid) -> Result<(), ChartError> {
    let columns = rows.first().map(Vec::len).unwrap_or(0);
    if rows.len() < 2 || columns < 2 {
        return Err(ChartError::TooSmall {
            rows: rows.len(),
            columns,
        });
    }
    Ok(())
}

fn check_names(names: &[String], axis: HeaderAxis) -> Result<(), ChartError> {
    let mut seen = HashSet::with_capacity(names.len());
    for (position, name) in names.iter().enumerate() {
        if name.is_empty() {
            return Err(ChartError::EmptyTypeName { axis, position });
        }
        if is_no_type_spelling(name) {
            return Err(ChartError::ReservedTypeName {
                axis,
                name: name.clone(),
            });
        }
        if !seen.insert(fold_key(name)) {
            return Err(ChartError::DuplicateTypeName {
                axis,
                name: name.clone(),
            });
        }
    }
    Ok(())
}

fn parse_multiplier(cell: &str, attacking: &str, defending: &str) -> Result<f64, ChartError> {
    let value: f64 = cell.parse().map_err(|_| ChartError::NonNumericMatchup {
        attacking: attacking.to_string(),
        defending: defending.to_string(),
        value: cell.to_string(),
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(ChartError::InvalidMultiplier {
            attacking: attacking.to_string(),
            defending: defending.to_string(),
            value,
        });
    }
    Ok(value)
}
