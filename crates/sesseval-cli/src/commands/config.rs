//! Configuration management commands

use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::*;
use sesseval_core::EvalConfig;

use crate::console::CliConsole;

/// Show the settings stored in a configuration file, or the defaults
pub fn show(config_file: &Path) -> Result<()> {
    let console = CliConsole::new(true);

    console.print_header("Configuration");

    let config = if config_file.exists() {
        let config = EvalConfig::load(config_file)?;
        console.success(&format!(
            "Loaded configuration from: {}",
            config_file.display()
        ));
        config
    } else {
        console.warn(&format!(
            "Configuration file not found: {}",
            config_file.display()
        ));
        console.info("Using default configuration");
        EvalConfig::default()
    };

    print_config(&config);
    Ok(())
}

/// Validate a configuration file
pub fn validate(config_file: &Path) -> Result<()> {
    let console = CliConsole::new(true);

    console.print_header("Configuration Validation");

    if !config_file.exists() {
        bail!("Configuration file not found: {}", config_file.display());
    }

    let config = EvalConfig::load(config_file)
        .with_context(|| format!("Failed to load configuration: {}", config_file.display()))?;
    console.success("Configuration file loaded successfully");

    if let Err(e) = config.validate() {
        console.error(&format!("Configuration validation failed: {e}"));
        return Err(e.into());
    }
    console.success("Configuration is valid");

    if !config.base_dir.is_dir() {
        console.warn(&format!(
            "Base directory does not exist yet: {}",
            config.base_dir.display()
        ));
    }

    Ok(())
}

/// Initialize a new configuration file with defaults
pub fn init(config_file: &Path, force: bool) -> Result<()> {
    let console = CliConsole::new(true);

    console.print_header("Configuration Initialization");

    if config_file.exists() && !force {
        console.info("Use --force to overwrite");
        bail!(
            "Configuration file already exists: {}",
            config_file.display()
        );
    }

    EvalConfig::default()
        .save(config_file)
        .context("Failed to write configuration file")?;

    console.success(&format!(
        "Created configuration file: {}",
        config_file.display()
    ));
    Ok(())
}

fn print_config(config: &EvalConfig) {
    let sessions = if config.sessions.is_empty() {
        "discover".to_string()
    } else {
        config
            .sessions
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    println!("{} {}", "Base directory:".bold(), config.base_dir.display());
    println!("{} {}", "Sessions:".bold(), sessions);
    println!(
        "{} {}{{:0{}}}",
        "Session dirs:".bold(),
        config.session_prefix,
        config.session_id_width
    );
    println!("{} {}", "Label file:".bold(), config.label_file);
    println!("{} {}", "Prediction file:".bold(), config.prediction_file);
    println!(
        "{} {:?}",
        "Invalid sessions:".bold(),
        config.on_invalid_session
    );
    println!("{} {}", "Format:".bold(), config.format);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_then_validate() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sesseval.json");

        init(&path, false).unwrap();
        assert_eq!(EvalConfig::load(&path).unwrap(), EvalConfig::default());
        validate(&path).unwrap();

        // refuses to overwrite without --force
        assert!(init(&path, false).is_err());
        assert!(init(&path, true).is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dup.json");
        std::fs::write(&path, r#"{"sessions": [2, 2]}"#).unwrap();
        assert!(validate(&path).is_err());
    }

    #[test]
    fn test_validate_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(validate(&temp.path().join("absent.json")).is_err());
    }
}
