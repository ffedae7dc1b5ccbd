//! dbot CLI: run the echo bot or the catalog bot. Config from env and optional CLI args.

use anyhow::Result;
use clap::Parser;
use dbot_cli::{load_config, run_catalog, run_echo, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Echo { token } => run_echo(load_config(token)?).await,
        Commands::Catalog { token } => run_catalog(load_config(token)?).await,
    }
}
