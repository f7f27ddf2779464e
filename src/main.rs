use clap::Parser;
use modular_bna::cli::{Cli, execute};
use modular_bna::utils::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.config());
    execute(cli).await
}
