use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::chart::{
    parse_type_chart_file, ParseOptions, TypeChart, DEFAULT_ROM_VERSION,
    DEFAULT_TYPE_CHART_CSV_PATH, DEFAULT_TYPE_CHART_PATH,
};
use crate::config::ServerConfig;
use crate::effectiveness::{defensive_profile, effectiveness, DefendingType, Verdict};
use crate::server;

const EXIT_OK: i32 = 0;
const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Parser)]
#[command(name = "manytypes")]
#[command(about = "Type chart builder and effectiveness checker for Too Many Types")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Convert the type chart spreadsheet export into the JSON artifact")]
    Parse {
        #[arg(value_name = "INPUT", default_value = DEFAULT_TYPE_CHART_CSV_PATH, help = "CSV export or workbook")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT", default_value = DEFAULT_TYPE_CHART_PATH)]
        output: PathBuf,
        #[arg(long, value_name = "NAME", help = "Workbook sheet to read")]
        sheet: Option<String>,
        #[arg(long, help = "Fail when the types across and down are not in the same order")]
        strict_order: bool,
        #[arg(long, value_name = "YYYY-MM-DD", help = "Defaults to today")]
        creation_date: Option<String>,
        #[arg(long, value_name = "TAG", default_value = DEFAULT_ROM_VERSION)]
        rom_version: String,
        #[arg(long, help = "Write indented JSON")]
        pretty: bool,
    },
    #[command(about = "Effectiveness of one attacking type against up to three defending types")]
    Query {
        #[arg(long, default_value = DEFAULT_TYPE_CHART_PATH)]
        chart: PathBuf,
        attack: String,
        #[arg(required = true, help = "One to three defending types; '-' or 'none' for an empty slot")]
        defend: Vec<String>,
    },
    #[command(about = "Effectiveness of every attacking type against a defending combination")]
    Defense {
        #[arg(long, default_value = DEFAULT_TYPE_CHART_PATH)]
        chart: PathBuf,
        #[arg(required = true, help = "One to three defending types")]
        defend: Vec<String>,
    },
    #[command(about = "List the types in a chart")]
    Types {
        #[arg(long, default_value = DEFAULT_TYPE_CHART_PATH)]
        chart: PathBuf,
    },
    #[command(about = "Check that a JSON artifact satisfies the chart invariants")]
    Validate {
        #[arg(default_value = DEFAULT_TYPE_CHART_PATH)]
        path: PathBuf,
    },
    #[command(about = "Serve the effectiveness API and the front-end")]
    Serve {
        #[arg(long, help = "Overrides MANYTYPES_BIND")]
        bind: Option<String>,
        #[arg(long, help = "Overrides MANYTYPES_CHART")]
        chart: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    attack: &'a str,
    defend: Vec<String>,
    multiplier: f64,
    verdict: Verdict,
}

/// Run the CLI and return the process exit code.
pub fn run_with_args(args: &[String]) -> i32 {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return err.exit_code();
        }
    };

    match cli.command {
        Command::Parse {
            input,
            output,
            sheet,
            strict_order,
            creation_date,
            rom_version,
            pretty,
        } => {
            let options = ParseOptions {
                strict_order,
                creation_date,
                rom_version: Some(rom_version),
            };
            handle_parse(&input, &output, sheet.as_deref(), &options, pretty)
        }
        Command::Query {
            chart,
            attack,
            defend,
        } => handle_query(&chart, &attack, &defend),
        Command::Defense { chart, defend } => handle_defense(&chart, &defend),
        Command::Types { chart } => handle_types(&chart),
        Command::Validate { path } => handle_validate(&path),
        Command::Serve { bind, chart } => {
            handle_serve(ServerConfig::from_env().with_overrides(bind, chart))
        }
    }
}

fn handle_parse(
    input: &Path,
    output: &Path,
    sheet: Option<&str>,
    options: &ParseOptions,
    pretty: bool,
) -> i32 {
    let parsed = match parse_type_chart_file(input, sheet, options) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("parse failed: {err}");
            return EXIT_FAILURE;
        }
    };
    for diagnostic in &parsed.report.diagnostics {
        eprintln!("{diagnostic}");
    }

    if let Err(err) = parsed.chart.save(output, pretty) {
        eprintln!("parse failed: {err}");
        return EXIT_FAILURE;
    }
    println!(
        "wrote {} types to {}",
        parsed.chart.len(),
        output.display()
    );
    EXIT_OK
}

fn handle_query(chart_path: &Path, attack: &str, defend: &[String]) -> i32 {
    let Some(chart) = load_chart(chart_path) else {
        return EXIT_FAILURE;
    };
    let defenders: Vec<DefendingType> = defend.iter().map(|raw| DefendingType::parse(raw)).collect();
    match effectiveness(&chart, attack, &defenders) {
        Ok(multiplier) => print_json(&QueryOutput {
            attack,
            defend: defenders.iter().map(ToString::to_string).collect(),
            multiplier,
            verdict: Verdict::from_multiplier(multiplier),
        }),
        Err(err) => {
            eprintln!("query failed: {err}");
            EXIT_FAILURE
        }
    }
}

fn handle_defense(chart_path: &Path, defend: &[String]) -> i32 {
    let Some(chart) = load_chart(chart_path) else {
        return EXIT_FAILURE;
    };
    let defenders: Vec<DefendingType> = defend.iter().map(|raw| DefendingType::parse(raw)).collect();
    match defensive_profile(&chart, &defenders) {
        Ok(profile) => {
            println!("attacking\tmultiplier\tverdict");
            for entry in profile {
                println!("{}\t{}\t{}", entry.attacking, entry.multiplier, entry.verdict);
            }
            EXIT_OK
        }
        Err(err) => {
            eprintln!("query failed: {err}");
            EXIT_FAILURE
        }
    }
}

fn handle_types(chart_path: &Path) -> i32 {
    let Some(chart) = load_chart(chart_path) else {
        return EXIT_FAILURE;
    };
    for (index, name) in chart.types().iter().enumerate() {
        println!("{index}\t{name}");
    }
    EXIT_OK
}

fn handle_validate(path: &Path) -> i32 {
    match TypeChart::load(path) {
        Ok(chart) => {
            println!(
                "validation passed: {} ({} types, created {}, rom {})",
                path.display(),
                chart.len(),
                chart.creation_date(),
                chart.rom_version().unwrap_or("unknown")
            );
            EXIT_OK
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            EXIT_FAILURE
        }
    }
}

fn handle_serve(config: ServerConfig) -> i32 {
    match server::run_server(&config) {
        Ok(()) => EXIT_OK,
        Err(err) => {
            eprintln!("server error: {err}");
            EXIT_FAILURE
        }
    }
}

fn load_chart(path: &Path) -> Option<TypeChart> {
    match TypeChart::load(path) {
        Ok(chart) => Some(chart),
        Err(err) => {
            eprintln!("{err}");
            None
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            EXIT_OK
        }
        Err(err) => {
            eprintln!("failed to serialize result: {err}");
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn parse_defaults_both_paths() {
        let cli = Cli::try_parse_from(args(&["manytypes", "parse"])).expect("valid");
        match cli.command {
            Command::Parse { input, output, .. } => {
                assert_eq!(input, PathBuf::from(DEFAULT_TYPE_CHART_CSV_PATH));
                assert_eq!(output, PathBuf::from(DEFAULT_TYPE_CHART_PATH));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_a_third_path() {
        let err = Cli::try_parse_from(args(&["manytypes", "parse", "a.csv", "b.json", "c"]))
            .unwrap_err();
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn query_needs_at_least_one_defender() {
        assert!(Cli::try_parse_from(args(&["manytypes", "query", "Fire", "Water"])).is_ok());
        assert!(Cli::try_parse_from(args(&["manytypes", "query", "Fire", "A", "B", "C"])).is_ok());
        assert!(Cli::try_parse_from(args(&["manytypes", "query", "Fire"])).is_err());
    }

    #[test]
    fn missing_subcommand_is_a_usage_error() {
        assert_eq!(run_with_args(&args(&["manytypes", "explode"])), 2);
    }
}
