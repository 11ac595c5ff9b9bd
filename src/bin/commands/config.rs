use anyhow::Result;
use clap::Args;
use json_to_table::json_to_table;
use pathmeta::lens::staticinfo::StaticInfoCfg;
use pathmeta::lens::utils::OutputFormat;
use pathmeta::PathmetaConfig;
use serde::Serialize;
use std::path::Path;

use super::print_output;

/// Arguments for the Config command
#[derive(Args)]
pub struct ConfigArgs {
    /// Also load the static info configuration and report its contents
    #[clap(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Serialize)]
struct ConfigInfo {
    config_file: String,
    data_dir: String,
    staticinfo_config: StaticInfoConfigInfo,
}

#[derive(Debug, Serialize)]
struct StaticInfoConfigInfo {
    path: String,
    exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    interfaces: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn run(config: &PathmetaConfig, args: ConfigArgs, output_format: OutputFormat) -> Result<()> {
    let ConfigArgs { verbose } = args;

    let path = config.staticinfo_config.clone();
    let exists = Path::new(&path).exists();
    let mut staticinfo_config = StaticInfoConfigInfo {
        path,
        exists,
        interfaces: None,
        note: None,
        error: None,
    };

    if verbose && exists {
        match StaticInfoCfg::from_file(&staticinfo_config.path) {
            Ok(cfg) => {
                staticinfo_config.interfaces = Some(cfg.interface_count());
                staticinfo_config.note = Some(cfg.note.clone());
            }
            Err(e) => staticinfo_config.error = Some(e.to_string()),
        }
    }

    let info = ConfigInfo {
        config_file: PathmetaConfig::config_file_path(),
        data_dir: config.data_dir.clone(),
        staticinfo_config,
    };

    print_output(&format_info(config, &info, &output_format)?)
}

fn format_info(
    config: &PathmetaConfig,
    info: &ConfigInfo,
    output_format: &OutputFormat,
) -> Result<String> {
    let output = match output_format {
        OutputFormat::Json | OutputFormat::JsonLine => serde_json::to_string(info)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(info)?,
        OutputFormat::Table => {
            let sic = &info.staticinfo_config;
            let mut lines = vec![
                format!("Config File:        {}", info.config_file),
                config.summary(),
            ];
            if let Some(n) = sic.interfaces {
                lines.push(format!("Interfaces:         {}", n));
            }
            if let Some(note) = &sic.note {
                lines.push(format!("Note:               {}", note));
            }
            if let Some(e) = &sic.error {
                lines.push(format!("Error:              {}", e));
            }
            lines.join("\n")
        }
        OutputFormat::Markdown => {
            let json_value = serde_json::to_value(info)?;
            let mut table = json_to_table(&json_value);
            table.collapse();
            table.to_string()
        }
        OutputFormat::Psv => {
            let sic = &info.staticinfo_config;
            let mut lines = vec![
                "key|value".to_string(),
                format!("config_file|{}", info.config_file),
                format!("data_dir|{}", info.data_dir),
                format!("staticinfo_config|{}", sic.path),
                format!("staticinfo_config_exists|{}", sic.exists),
            ];
            if let Some(n) = sic.interfaces {
                lines.push(format!("interfaces|{}", n));
            }
            lines.join("\n")
        }
    };
    Ok(output)
}
