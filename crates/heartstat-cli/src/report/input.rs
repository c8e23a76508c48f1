use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;

use heartstat_analysis::config::{load_report_config, DataSource, ReportConfig};

use crate::util::validate_csv_file;

/// Build the effective configuration: the JSON file when given, else the
/// defaults, with command line flags applied on top.
pub fn config_from_arguments(matches: &ArgMatches) -> Result<ReportConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            log::info!("[heartstat::report] Using config: {:?}", path);
            load_report_config(path)?
        }
        None => ReportConfig::default(),
    };
    apply_overrides(&mut config, matches)?;
    Ok(config)
}

fn apply_overrides(config: &mut ReportConfig, matches: &ArgMatches) -> Result<()> {
    if let Some(input) = matches.get_one::<String>("input") {
        let source: DataSource = input.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        if let DataSource::Csv { path, .. } = &source {
            validate_csv_file(&path.to_string_lossy())?;
        }
        config.source = source;
    } else if let Some(id) = matches.get_one::<u32>("uci_id") {
        config.source = DataSource::Uci { id: *id };
    }

    if let Some(target) = matches.get_one::<String>("target") {
        match &mut config.source {
            DataSource::Csv { target: t, .. } => *t = Some(target.clone()),
            DataSource::Uci { .. } => {
                anyhow::bail!("--target only applies to a local CSV input")
            }
        }
    }

    if let Some(output) = matches.get_one::<PathBuf>("output_file") {
        config.output_file = output.clone();
    }
    Ok(())
}
