pub mod grid;
pub mod model;
pub mod names;
pub mod parser;

pub use grid::{read_csv_grid, read_grid, RawGrid};
pub use model::{TypeChart, DEFAULT_TYPE_CHART_PATH};
pub use names::title_case;
pub use parser::{
    parse_type_chart_csv, parse_type_chart_file, parse_type_chart_grid, DiagnosticSeverity,
    ParseDiagnostic, ParseOptions, ParseReport, ParsedChart, DEFAULT_ROM_VERSION,
    DEFAULT_TYPE_CHART_CSV_PATH,
};
