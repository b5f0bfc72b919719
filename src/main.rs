use crate::actions::{dump_cue_sheet, format_cue_sheet, inspect_cue_sheet};
use crate::commands::{Cli, Commands};
use anyhow::Result;
use clap::Parser;
use log::debug;

mod actions;
mod commands;

pub mod built_info {
    // The file has been placed there by the build script.
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init()?;

    debug!(
        "{} v{} ({})",
        built_info::PKG_NAME,
        built_info::PKG_VERSION,
        built_info::TARGET
    );

    let cli = Cli::parse();

    match cli.command {
        Commands::Format(cmd) => format_cue_sheet(cmd).await?,
        Commands::Inspect(cmd) => inspect_cue_sheet(cmd).await?,
        Commands::Dump(cmd) => dump_cue_sheet(cmd).await?,
    }

    Ok(())
}
