//! CLI application for auction catalog and winning-bid report extraction.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use arremate_core::DocumentKind;
use commands::{config, extract, import};

/// Arremate - Extract lots and winning bids from pawn auction documents
#[derive(Parser)]
#[command(name = "arremate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract lots from an auction catalog
    Catalog(extract::ExtractArgs),

    /// Extract winning bids from an auction report
    Report(extract::ExtractArgs),

    /// Combine a catalog and its report into an auction import
    Import(import::ImportArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Catalog(args) => extract::run(DocumentKind::Catalog, args, cli.config.as_deref()).await,
        Commands::Report(args) => extract::run(DocumentKind::Report, args, cli.config.as_deref()).await,
        Commands::Import(args) => import::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    }
}
