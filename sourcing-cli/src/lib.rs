use clap::Parser;
use std::path::PathBuf;

pub mod catalog;
pub mod distance;
pub mod session;

mod config;
pub use config::AppConfig;

mod ids;
pub use ids::{LocationId, ProductId};

mod io;
pub use io::*;

mod commands;
pub use commands::*;

// The top-level arguments: where the configuration lives and what to do
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "SOURCING_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub async fn evaluate(self) -> anyhow::Result<()> {
        let config = AppConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Optimize { catalog, io, seed } => {
                optimize(config, &catalog, &io, seed).await?;
            }
            Commands::Config => {
                let output = std::io::stdout().lock();
                serde_json::to_writer_pretty(output, &config)?;
                println!();
            }
        }

        Ok(())
    }
}
