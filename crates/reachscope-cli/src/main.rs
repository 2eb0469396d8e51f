mod trend;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::trend::TrendCommands;

#[derive(Debug, Parser)]
#[command(name = "reachscope-cli")]
#[command(about = "Creator engagement analysis command line interface")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Engagement-trend analysis
    Trend {
        #[command(subcommand)]
        command: TrendCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = reachscope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Trend { command }) => trend::run(&config, command).await?,
        None => println!("reachscope-cli ready; see --help for commands"),
    }

    Ok(())
}
