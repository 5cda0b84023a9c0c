use super::IOArgs;
use clap::Subcommand;
use std::path::PathBuf;

mod optimize;
pub use optimize::optimize;

#[derive(Subcommand)]
pub enum Commands {
    /// Choose the cheapest and the convenient location for every requested product
    Optimize {
        /// The catalog JSON file listing products, locations, and stock
        #[arg(short, long)]
        catalog: PathBuf,

        #[command(flatten)]
        io: IOArgs,

        /// Seed sampled distances, overriding the configuration
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the effective configuration and exit
    Config,
}
