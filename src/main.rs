use anyhow::Result;
use clap::Parser;

use tooldebt::cli::Cli;
use tooldebt::config::Config;
use tooldebt::utils::error::report_error;
use tooldebt::utils::logging::{LoggingConfig, init_logging_with_config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging_with_config(LoggingConfig::from_debug_flag(cli.debug));

    let config_path = cli.config_path();
    let config = match Config::load_custom(&config_path) {
        Ok(config) => config,
        Err(e) => {
            report_error(&e);
            std::process::exit(1);
        }
    };

    if !config.general.color {
        colored::control::set_override(false);
    }

    let session = cli.session(&config);
    tracing::debug!(persona = %session.persona(), config = %config_path.display(), "starting");

    if let Err(e) = cli.command.execute(config, &config_path, session).await {
        report_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
