//! Climate CLI - serve and inspect the climate observation dataset.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "clim-cli",
    version,
    about = "Read-only precipitation and temperature API"
)]
struct Cli {
    #[command(subcommand)]
    command: clim_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    clim_cmd::run(cli.command).await
}
