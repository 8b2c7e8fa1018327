mod config;
mod shell;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{DirectoryController, HttpGateway, ViewPhase};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "employee-directory", about = "HR employee directory client")]
struct Args {
    /// Base URL of the directory API; overrides config and environment.
    #[arg(long)]
    server_url: Option<String>,
    /// TOML settings file (defaults to ./directory.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the employee table once and exit.
    List,
    /// Interactive session (default).
    Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = config::load_settings(args.config.as_deref())?;
    if let Some(url) = args.server_url {
        settings.api_base_url = url;
    }
    let base_url = config::normalize_base_url(&settings.api_base_url)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    info!(%base_url, "starting employee directory");

    let mut controller = DirectoryController::new(HttpGateway::new(base_url));
    match args.command.unwrap_or(Command::Shell) {
        Command::List => {
            controller.mount().await;
            println!("{}", controller.view());
            if controller.phase() == ViewPhase::Failed {
                bail!(
                    "{}",
                    controller.store().error().unwrap_or("failed to load employees")
                );
            }
        }
        Command::Shell => shell::run(&mut controller).await?,
    }

    Ok(())
}
