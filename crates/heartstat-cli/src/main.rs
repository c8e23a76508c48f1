use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;

use heartstat_cli::report::input::config_from_arguments;
use heartstat_cli::report::{run_inspect, run_report};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("HEARTSTAT_LOG", "error,heartstat=info"))
        .init();

    let matches = Command::new("heartstat")
        .version(clap::crate_version!())
        .about("Statistical report for the UCI Heart Disease dataset")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("report")
                .about("Load the dataset, compute statistics and write the text report")
                .arg(
                    Arg::new("config")
                        .help("Path to a JSON report configuration file")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .help(
                            "Local CSV file to analyse, or uci:<id> for a UCI dataset. \
                             Overrides the data source specified in the configuration file.",
                        )
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath)
                        .conflicts_with("uci_id"),
                )
                .arg(
                    Arg::new("uci_id")
                        .long("uci-id")
                        .help("UCI ML Repository dataset id to fetch (45 is Heart Disease)")
                        .value_parser(clap::value_parser!(u32))
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("target")
                        .short('t')
                        .long("target")
                        .help("Target column of the CSV input. Defaults to the last column.")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output")
                        .help("Path the report is written to. Defaults to statistical_results.txt")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .help("Do not echo the report to stdout.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the first rows, shape and column names of a CSV file")
                .arg(
                    Arg::new("csv")
                        .help("Path to the CSV file")
                        .required(true)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("rows")
                        .short('n')
                        .long("rows")
                        .help("Number of leading rows to print")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("5"),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("report", sub_m)) => handle_report(sub_m),
        Some(("inspect", sub_m)) => handle_inspect(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_report(matches: &ArgMatches) -> Result<()> {
    let config = config_from_arguments(matches)?;
    if matches.get_one::<PathBuf>("config").is_none() {
        let default_json = serde_json::to_string_pretty(&config).unwrap_or_default();
        log::info!("[heartstat::report] No config provided; using:\n{}", default_json);
    }

    match run_report(&config, matches.get_flag("quiet")) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::error!("Report generation failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_inspect(matches: &ArgMatches) -> Result<()> {
    let path: &String = matches
        .get_one("csv")
        .ok_or_else(|| anyhow::anyhow!("Missing CSV path"))?;
    let rows = matches.get_one::<usize>("rows").copied().unwrap_or(5);
    log::info!("[heartstat::inspect] Reading {}", path);

    match run_inspect(path, rows) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::error!("Inspect failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
