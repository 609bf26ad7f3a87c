use anyhow::Context;
use clap::Parser;
use dasl_trading::cli::{show_config, Cli, Commands};
use dasl_trading::config::Config;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing config file means defaults; a broken one is an error
    let config_found = Path::new(&cli.config).exists();
    let config = if config_found {
        Config::load(&cli.config).with_context(|| format!("Invalid config {}", cli.config))?
    } else {
        Config::default()
    };

    dasl_trading::telemetry::init_telemetry(&config.telemetry)?;
    if !config_found {
        tracing::warn!(path = %cli.config, "No config file, using defaults");
    }

    match cli.command.unwrap_or_default() {
        Commands::Simulate(args) => args.execute(config).await?,
        Commands::Request(args) => args.execute(config).await?,
        Commands::Report(args) => args.execute(config).await?,
        Commands::Config => show_config(&config),
    }

    Ok(())
}
