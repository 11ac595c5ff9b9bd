use anyhow::{anyhow, Result};
use clap::Args;
use json_to_table::json_to_table;
use pathmeta::lens::staticinfo::{StaticInfoExtendArgs, StaticInfoLens};
use pathmeta::lens::utils::OutputFormat;
use pathmeta::PathmetaConfig;
use std::path::PathBuf;

use super::print_output;

/// Arguments for the Extend command
#[derive(Args)]
pub struct ExtendArgs {
    #[clap(flatten)]
    pub args: StaticInfoExtendArgs,

    /// Operator static info configuration, overrides the configured path
    #[clap(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
}

pub fn run(config: &PathmetaConfig, args: ExtendArgs, output_format: OutputFormat) -> Result<()> {
    let ExtendArgs { args, config_file } = args;

    let path = config_file.unwrap_or_else(|| PathBuf::from(&config.staticinfo_config));
    let lens = StaticInfoLens::from_file(&path)?;
    let ext = lens.try_extend(&args)?;

    let output = match output_format {
        OutputFormat::Json => serde_json::to_string(&ext)?,
        OutputFormat::JsonPretty => lens.format_json(&ext),
        OutputFormat::JsonLine => serde_json::to_string(&ext)?,
        OutputFormat::Table | OutputFormat::Markdown => {
            let json_value = serde_json::to_value(&ext)?;
            let mut table = json_to_table(&json_value);
            table.collapse();
            table.to_string()
        }
        OutputFormat::Psv => {
            return Err(anyhow!(
                "output format '{}' is not supported by extend",
                output_format
            ))
        }
    };
    print_output(&output)
}
