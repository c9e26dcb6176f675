//! Command routing logic for CLI

use anyhow::Result;

use crate::args::{Cli, Commands, ConfigAction};
use crate::commands;

/// Route CLI commands to their respective handlers
pub fn route(cli: Cli) -> Result<()> {
    if let Some(command) = &cli.command {
        return match command {
            Commands::Config { action } => route_config(action.clone()),
        };
    }

    commands::eval::run(&cli)
}

fn route_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show { config_file } => commands::config::show(&config_file),
        ConfigAction::Validate { config_file } => commands::config::validate(&config_file),
        ConfigAction::Init { config_file, force } => commands::config::init(&config_file, force),
    }
}
