//! Raw grid sources: spreadsheet exports (CSV) and workbooks (xlsx/xls/ods).
//! Both produce trimmed text cells; all interpretation happens in the parser.

use std::fs;
use std::path::Path;

use calamine::Reader;

use crate::error::ChartError;

pub type RawGrid = Vec<Vec<String>>;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];
const PREFERRED_SHEET_HINT: &str = "type chart";

/// Read CSV text into rows of trimmed cells. Blank lines and trailing rows with no
/// content (common in spreadsheet exports) are dropped; row lengths are left as-is.
pub fn read_csv_grid(text: &str) -> Result<RawGrid, ChartError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }
    drop_trailing_empty_rows(&mut rows);
    Ok(rows)
}

/// Read a sheet from a workbook. With no explicit sheet name, prefer the first sheet
/// whose name mentions "Type Chart", then fall back to the first sheet.
pub fn read_workbook_grid(path: &Path, sheet: Option<&str>) -> Result<RawGrid, ChartError> {
    let mut workbook = calamine::open_workbook_auto(path)?;
    let names = workbook.sheet_names();

    let sheet_name = pick_sheet(&names, sheet)?;
    tracing::info!(sheet = %sheet_name, "reading workbook sheet");

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows: RawGrid = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    drop_trailing_empty_rows(&mut rows);
    Ok(rows)
}

/// An explicit sheet name must match exactly. Otherwise the first sheet whose name
/// mentions "Type Chart" (any case) wins, then the first sheet.
fn pick_sheet(names: &[String], requested: Option<&str>) -> Result<String, ChartError> {
    match requested {
        Some(requested) => names
            .iter()
            .find(|name| name.as_str() == requested)
            .cloned()
            .ok_or_else(|| ChartError::MissingSheet(requested.to_string())),
        None => names
            .iter()
            .find(|name| name.to_lowercase().contains(PREFERRED_SHEET_HINT))
            .or(names.first())
            .cloned()
            .ok_or_else(|| ChartError::MissingSheet("<first sheet>".to_string())),
    }
}

/// Load a grid from disk, choosing the reader by file extension.
pub fn read_grid(path: &Path, sheet: Option<&str>) -> Result<RawGrid, ChartError> {
    if is_workbook(path) {
        return read_workbook_grid(path, sheet);
    }
    let text = fs::read_to_string(path).map_err(|source| ChartError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv_grid(&text)
}

pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

fn cell_text(cell: &calamine::Data) -> String {
    match cell {
        calamine::Data::Empty => String::new(),
        calamine::Data::String(s) => s.trim().to_string(),
        calamine::Data::Float(f) => format!("{}", f),
        calamine::Data::Int(i) => format!("{}", i),
        calamine::Data::Bool(b) => format!("{}", b),
        other => other.to_string().trim().to_string(),
    }
}

fn drop_trailing_empty_rows(rows: &mut RawGrid) {
    while rows
        .last()
        .is_some_and(|row| row.iter().all(|cell| cell.is_empty()))
    {
        rows.pop();
    }
}
