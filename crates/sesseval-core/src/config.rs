//! Evaluation configuration
//!
//! Configuration options for evaluation runs, loadable from JSON or YAML.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, EvalResult};
use crate::loader::{DEFAULT_LABEL_FILE, DEFAULT_PREDICTION_FILE, SessionLoader, SessionNaming};
use crate::report::ReportFormat;

/// What the runner does with a session that fails to load or validate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidSessionPolicy {
    /// Stop the run with the session's error
    #[default]
    Abort,
    /// Log a warning, record the session as skipped and continue
    Skip,
}

/// Configuration for evaluation runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Directory holding one subdirectory per session
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Session ids in evaluation order (empty = discover)
    #[serde(default = "default_sessions")]
    pub sessions: Vec<u32>,

    /// Label file name inside each session directory
    #[serde(default = "default_label_file")]
    pub label_file: String,

    /// Prediction file name inside each session directory
    #[serde(default = "default_prediction_file")]
    pub prediction_file: String,

    /// Session directory prefix
    #[serde(default = "default_session_prefix")]
    pub session_prefix: String,

    /// Zero-padded width of the session id in directory names
    #[serde(default = "default_session_id_width")]
    pub session_id_width: usize,

    #[serde(default)]
    pub on_invalid_session: InvalidSessionPolicy,

    /// Report output format
    #[serde(default)]
    pub format: ReportFormat,
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("submission/sample")
}

fn default_sessions() -> Vec<u32> {
    vec![2, 3, 15, 16]
}

fn default_label_file() -> String {
    DEFAULT_LABEL_FILE.to_string()
}

fn default_prediction_file() -> String {
    DEFAULT_PREDICTION_FILE.to_string()
}

fn default_session_prefix() -> String {
    "Session".to_string()
}

fn default_session_id_width() -> usize {
    2
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            sessions: default_sessions(),
            label_file: default_label_file(),
            prediction_file: default_prediction_file(),
            session_prefix: default_session_prefix(),
            session_id_width: default_session_id_width(),
            on_invalid_session: InvalidSessionPolicy::default(),
            format: ReportFormat::default(),
        }
    }
}

impl EvalConfig {
    /// Load a config file, YAML for `.yaml`/`.yml` and JSON otherwise
    pub fn load(path: impl AsRef<Path>) -> EvalResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| EvalError::io(path, e))?;

        let config: EvalConfig = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        Ok(config)
    }

    /// Write the config, format chosen by extension as in [`EvalConfig::load`]
    pub fn save(&self, path: impl AsRef<Path>) -> EvalResult<()> {
        let path = path.as_ref();
        let content = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };

        std::fs::write(path, content).map_err(|e| EvalError::io(path, e))
    }

    /// Set the base directory
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Set the session ids
    pub fn with_sessions(mut self, sessions: Vec<u32>) -> Self {
        self.sessions = sessions;
        self
    }

    /// Set the label file name
    pub fn with_label_file(mut self, name: impl Into<String>) -> Self {
        self.label_file = name.into();
        self
    }

    /// Set the prediction file name
    pub fn with_prediction_file(mut self, name: impl Into<String>) -> Self {
        self.prediction_file = name.into();
        self
    }

    /// Set the invalid-session policy
    pub fn with_policy(mut self, policy: InvalidSessionPolicy) -> Self {
        self.on_invalid_session = policy;
        self
    }

    /// Set the report format
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Check the config for errors
    pub fn validate(&self) -> EvalResult<()> {
        if self.label_file.trim().is_empty() {
            return Err(EvalError::config("label_file must not be empty"));
        }
        if self.prediction_file.trim().is_empty() {
            return Err(EvalError::config("prediction_file must not be empty"));
        }
        if self.label_file == self.prediction_file {
            return Err(EvalError::config(format!(
                "label_file and prediction_file are both '{}'",
                self.label_file
            )));
        }

        let mut seen = HashSet::new();
        for id in &self.sessions {
            if !seen.insert(id) {
                return Err(EvalError::config(format!("session {} listed twice", id)));
            }
        }

        Ok(())
    }

    /// Build the session loader described by this config
    pub fn loader(&self) -> SessionLoader {
        SessionLoader::new(&self.base_dir)
            .with_files(&self.label_file, &self.prediction_file)
            .with_naming(SessionNaming::new(
                &self.session_prefix,
                self.session_id_width,
            ))
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
}
