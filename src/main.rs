use binforge::classifier::ObjectClassifier;
use binforge::config::{ClassificationSettings, PipelineConfig};
use clap::{Parser, Subcommand};
use std::process;
use tracing::{error, info};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pipeline JSON with a `classifications` list. Without it, the
    /// classification flags of the subcommand describe a single one.
    #[arg(global = true, short, long)]
    pipeline: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Validate(cmd::validate::ValidateArgs),
    Columns(cmd::columns::ColumnsArgs),
    Classify(cmd::classify::ClassifyArgs),
}

impl Commands {
    fn settings(&self) -> &ClassificationSettings {
        match self {
            Commands::Validate(args) => &args.settings,
            Commands::Columns(args) => &args.settings,
            Commands::Classify(args) => &args.settings,
        }
    }
}

fn main() {
    // Logs go to stderr so stdout stays clean for tables and JSON.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    info!("🚀 Initializing BinForge...");

    let config = match &cli.pipeline {
        Some(path) => PipelineConfig::load_from_file(path).unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        }),
        None => PipelineConfig::single(cli.command.settings().clone()),
    };

    let classifier = match ObjectClassifier::new(&config) {
        Ok(c) => c,
        Err(e) => {
            error!("❌ INVALID CLASSIFICATION SETTINGS:");
            error!("   {}", e);
            process::exit(2);
        }
    };

    let outcome = match cli.command {
        Commands::Validate(_) => {
            cmd::validate::run(&classifier);
            Ok(())
        }
        Commands::Columns(args) => cmd::columns::run(args, &classifier),
        Commands::Classify(args) => cmd::classify::run(args, &classifier),
    };

    if let Err(e) = outcome {
        error!("❌ {}", e);
        process::exit(1);
    }
}
