use clap::{Parser, Subcommand};
use pathmeta::lens::combinator::CombineArgs;
use pathmeta::lens::utils::OutputFormat;
use pathmeta::PathmetaConfig;
use tracing::Level;

mod commands;

use commands::config::ConfigArgs;
use commands::extend::ExtendArgs;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// configuration file path, by default $HOME/.pathmeta/pathmeta.toml is used
    #[clap(short, long)]
    config: Option<String>,

    /// Print debug information
    #[clap(long)]
    debug: bool,

    /// Output format: table, markdown, json, json-pretty, json-line, psv
    #[clap(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Output as JSON (same as --format json-pretty)
    #[clap(long, global = true)]
    json: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static info extension of one AS entry from the operator configuration
    Extend(ExtendArgs),

    /// Combine the static info along solved paths into path metadata
    Combine(CombineArgs),

    /// Show pathmeta configuration
    Config(ConfigArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .init();
    }

    let config = match PathmetaConfig::new(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: unable to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let output_format = if cli.json {
        OutputFormat::JsonPretty
    } else {
        cli.format.unwrap_or_default()
    };

    let res = match cli.command {
        Commands::Extend(args) => commands::extend::run(&config, args, output_format),
        Commands::Combine(args) => commands::combine::run(args, output_format),
        Commands::Config(args) => commands::config::run(&config, args, output_format),
    };

    if let Err(e) = res {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
}
