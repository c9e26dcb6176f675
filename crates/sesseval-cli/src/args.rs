//! CLI argument definitions using clap
//!
//! - sesseval                        # Evaluate the configured sessions
//! - sesseval --sessions 2,3         # Override the session list
//! - sesseval config show/init/...   # Utility commands

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sesseval_core::ReportFormat;

/// Default configuration file name used by the config commands.
pub const DEFAULT_CONFIG_FILE: &str = "sesseval.json";

#[derive(Parser)]
#[command(name = "sesseval")]
#[command(about = "Evaluate binary predictions against labels across sessions")]
#[command(
    long_about = r#"Evaluate binary predictions against labels across sessions

Each session directory holds a label file and a prediction file with one
0/1 value per whitespace-separated token. Metrics are reported averaged
over sessions and over the pooled data.

USAGE:
  sesseval                             # Evaluate default sessions
  sesseval --base-dir data --sessions 1,2
  sesseval --base-dir data --discover
  sesseval --format json --output report.json

UTILITY COMMANDS:
  sesseval config init                 # Create config file
  sesseval config show                 # Show effective config
  sesseval config validate             # Check a config file"#
)]
#[command(version)]
pub struct Cli {
    /// Path to a JSON or YAML configuration file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Directory containing the session directories
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Comma-separated session ids
    #[arg(long, value_delimiter = ',', conflicts_with = "discover")]
    pub sessions: Option<Vec<u32>>,

    /// Evaluate every complete session directory under the base directory
    #[arg(long)]
    pub discover: bool,

    /// Label file name inside each session directory
    #[arg(long)]
    pub label_file: Option<String>,

    /// Prediction file name inside each session directory
    #[arg(long)]
    pub prediction_file: Option<String>,

    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Skip sessions that fail to load or validate instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,

    /// Also write the report to this file
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration files
    #[command(verbatim_doc_comment)]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigAction {
    /// Display the settings stored in a configuration file (defaults if missing)
    Show {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config_file: PathBuf,
    },

    /// Validate configuration file for errors
    Validate {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config_file: PathBuf,
    },

    /// Create a new configuration file with defaults
    Init {
        /// Path for the new configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config_file: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

/// Report format accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
    #[value(alias = "md")]
    Markdown,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
            FormatArg::Markdown => ReportFormat::Markdown,
        }
    }
}
