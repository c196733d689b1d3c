// Configuration operations

use crate::cli::ConfigCommands;
use crate::config::Config;
use crate::utils::error::{AppResult, FlowResult, handle_flow};
use crate::utils::interactive::prompt_yes_no;
use crate::utils::output::OutputStyle;
use std::path::Path;

pub fn handle_config_command(
    config: &Config,
    config_path: &Path,
    command: Option<ConfigCommands>,
) -> AppResult<()> {
    match command {
        Some(ConfigCommands::Show) => handle_show_command(config, config_path),
        Some(ConfigCommands::Path) => {
            println!("{}", config_path.display());
            Ok(())
        }
        Some(ConfigCommands::Reset { yes }) => handle_reset_command(config_path, yes),
        None => handle_config_help(config_path),
    }
}

fn handle_show_command(config: &Config, config_path: &Path) -> AppResult<()> {
    OutputStyle::print_header("⚙️  tooldebt Configuration");
    println!("{}", OutputStyle::muted(&config_path.display().to_string()));
    println!();
    println!("{}", config.to_toml()?);
    Ok(())
}

fn handle_config_help(config_path: &Path) -> AppResult<()> {
    println!("⚙️  Configuration Management");
    println!("==========================");
    println!("Available configuration commands:");
    println!("  tooldebt config show     - Show current configuration");
    println!("  tooldebt config path     - Print the configuration file location");
    println!("  tooldebt config reset    - Reset configuration to defaults");
    println!();
    println!("Configuration file location: {}", config_path.display());
    Ok(())
}

fn handle_reset_command(config_path: &Path, skip_confirm: bool) -> AppResult<()> {
    if !skip_confirm
        && !prompt_yes_no(
            "Are you sure you want to reset configuration to defaults? This will overwrite your current settings.",
        )?
    {
        handle_flow(FlowResult::Cancelled("Reset cancelled".to_string()));
        return Ok(());
    }

    Config::default().save_to(config_path)?;
    handle_flow(FlowResult::Success("Configuration reset to defaults".to_string()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::Persona;
    use tempfile::TempDir;

    #[test]
    fn test_reset_overwrites_custom_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut custom = Config::default();
        custom.general.default_persona = Persona::Startup;
        custom.save_to(&path).unwrap();

        handle_config_command(&custom, &path, Some(ConfigCommands::Reset { yes: true })).unwrap();

        assert_eq!(Config::load_custom(&path).unwrap(), Config::default());
    }
}
