//! sparkterm — console wallet for the Breez Spark SDK.
//!
//! Run with no arguments for the interactive menu, or use a subcommand
//! for one-shot operations (`sparkterm balance`, `sparkterm send ...`).

mod commands;
mod error;
mod format;
mod menu;
mod validation;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use commands::{Command, WalletOptions};

#[derive(Parser)]
#[command(name = "sparkterm", version, about = "Console wallet for the Breez Spark SDK")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    wallet: WalletOptions,

    /// Output JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,
}

fn main() -> Result<()> {
    // .env feeds the config resolution below, so load it first.
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let runtime = tokio::runtime::Runtime::new().context("Failed to start Tokio runtime")?;
    runtime.block_on(run(cli))
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None | Some(Command::Menu) => {
            let wallet = commands::build_wallet(&cli.wallet).await?;
            menu::run(&wallet).await
        }
        Some(Command::Balance(args)) => commands::balance(&cli.wallet, cli.json, args).await,
        Some(Command::Receive(args)) => commands::receive(&cli.wallet, cli.json, args).await,
        Some(Command::Parse(args)) => commands::parse(cli.json, args).await,
        Some(Command::Send(args)) => commands::send(&cli.wallet, cli.json, args).await,
        Some(Command::Payments(args)) => commands::payments(&cli.wallet, cli.json, args).await,
        Some(Command::Sync) => commands::sync(&cli.wallet, cli.json).await,
        Some(Command::Seed(args)) => commands::seed_new(cli.json, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
