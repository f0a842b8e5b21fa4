mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "canopy", about = "Plant canopy enhancement and growth analysis")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image brightness class and the parameters it selects
    Info(commands::info::InfoArgs),
    /// Adaptively enhance a single image
    Enhance(commands::enhance::EnhanceArgs),
    /// Enhance an image and report its vegetation coverage
    Measure(commands::measure::MeasureArgs),
    /// Measure an ordered image series and compute growth rates
    Analyze(commands::analyze::AnalyzeArgs),
    /// Print or save the default analysis config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Enhance(args) => commands::enhance::run(args),
        Commands::Measure(args) => commands::measure::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
