mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "linktrack", about = "Vision tracking and motor control for a two-link arm")]
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
    /// Run the closed tracking loop
    Run(commands::run::RunArgs),
    /// Locate the markers in a single image
    Detect(commands::detect::DetectArgs),
    /// Print or save the default configuration
    Config(commands::config::ConfigArgs),
    /// Show the wire bytes of a motor command
    Encode(commands::encode::EncodeArgs),
    /// List serial ports on this machine
    Ports,
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
        Commands::Run(args) => commands::run::run(args),
        Commands::Detect(args) => commands::detect::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Encode(args) => commands::encode::run(args),
        Commands::Ports => commands::ports::run(),
    }
}
