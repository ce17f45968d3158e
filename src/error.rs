use std::path::PathBuf;

use thiserror::Error;

/// Where a type name came from: one of the source grid's headers, or the type index
/// of a loaded artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAxis {
    Row,
    Column,
    Index,
}

impl HeaderAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Row => "header row",
            Self::Column => "header column",
            Self::Index => "type index",
        }
    }
}

impl std::fmt::Display for HeaderAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failures while turning a spreadsheet into a chart, or loading/saving the artifact.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("unable to open workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("workbook has no sheet named '{0}'")]
    MissingSheet(String),
    #[error("type chart JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("type chart grid is empty")]
    EmptyGrid,
    #[error("grid is too small: {rows} row(s) x {columns} column(s) left after removing the outer frame")]
    TooSmall { rows: usize, columns: usize },
    #[error("row {row} has {found} cell(s), expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("chart is not square: {columns} type(s) across but {rows} type(s) down")]
    NotSquare { rows: usize, columns: usize },
    #[error("type name '{name}' appears more than once in the {axis}")]
    DuplicateTypeName { axis: HeaderAxis, name: String },
    #[error("empty type name at position {position} of the {axis}")]
    EmptyTypeName { axis: HeaderAxis, position: usize },
    #[error("type name '{name}' in the {axis} is reserved for an empty defending slot")]
    ReservedTypeName { axis: HeaderAxis, name: String },
    #[error("type name '{name}' is not title-cased, expected '{expected}'")]
    NotTitleCased { name: String, expected: String },
    #[error("types across and down are not in the same order (across: [{across}], down: [{down}])")]
    HeaderOrderMismatch { across: String, down: String },
    #[error("matchup {attacking} -> {defending} is not a number: '{value}'")]
    NonNumericMatchup {
        attacking: String,
        defending: String,
        value: String,
    },
    #[error("matchup {attacking} -> {defending} must be a finite non-negative number, got {value}")]
    InvalidMultiplier {
        attacking: String,
        defending: String,
        value: f64,
    },
    #[error("type index is not dense: '{name}' maps to {index} but the chart has {size} type(s)")]
    IndexOutOfRange {
        name: String,
        index: usize,
        size: usize,
    },
    #[error("types '{first}' and '{second}' share index {index}")]
    IndexCollision {
        first: String,
        second: String,
        index: usize,
    },
}

/// Contract violations at query time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("unknown attacking type '{0}'")]
    UnknownAttackingType(String),
    #[error("expected between 1 and {max} defending type(s), got {found}")]
    DefenderCount { found: usize, max: usize },
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("could not load type chart: {0}")]
    Chart(#[from] ChartError),
    #[error("server I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
