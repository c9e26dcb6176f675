//! Session file loading
//!
//! Resolves session ids to label/prediction file pairs under a base
//! directory and reads them as whitespace-separated numeric text.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{EvalError, EvalResult};

/// Default label file name inside a session directory
pub const DEFAULT_LABEL_FILE: &str = "detection.txt";

/// Default prediction file name inside a session directory
pub const DEFAULT_PREDICTION_FILE: &str = "prediction.txt";

/// How session ids map to directory names, e.g. `2` -> `Session02`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionNaming {
    pub prefix: String,
    pub width: usize,
}

impl SessionNaming {
    pub fn new(prefix: impl Into<String>, width: usize) -> Self {
        Self {
            prefix: prefix.into(),
            width,
        }
    }

    /// Directory name for a session id
    pub fn dir_name(&self, id: u32) -> String {
        format!("{}{:0width$}", self.prefix, id, width = self.width)
    }

    /// Session id for a directory name, if it follows this scheme
    pub fn parse(&self, name: &str) -> Option<u32> {
        let digits = name.strip_prefix(&self.prefix)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let id = digits.parse().ok()?;
        (self.dir_name(id) == name).then_some(id)
    }
}

impl Default for SessionNaming {
    fn default() -> Self {
        Self::new("Session", 2)
    }
}

/// Resolved file pair for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaths {
    pub id: u32,
    pub label: PathBuf,
    pub prediction: PathBuf,
}

/// Loaded vectors for one session
#[derive(Debug, Clone)]
pub struct SessionData {
    pub paths: SessionPaths,
    pub labels: Vec<f64>,
    pub predictions: Vec<f64>,
}

/// Loader for per-session label/prediction files
pub struct SessionLoader {
    /// Directory holding one subdirectory per session
    base_dir: PathBuf,

    /// Label file name inside each session directory
    label_file: String,

    /// Prediction file name inside each session directory
    prediction_file: String,

    naming: SessionNaming,
}

impl SessionLoader {
    /// Create a loader with the default file names and naming scheme
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            label_file: DEFAULT_LABEL_FILE.to_string(),
            prediction_file: DEFAULT_PREDICTION_FILE.to_string(),
            naming: SessionNaming::default(),
        }
    }

    /// Set the label and prediction file names
    pub fn with_files(
        mut self,
        label_file: impl Into<String>,
        prediction_file: impl Into<String>,
    ) -> Self {
        self.label_file = label_file.into();
        self.prediction_file = prediction_file.into();
        self
    }

    /// Set the session directory naming scheme
    pub fn with_naming(mut self, naming: SessionNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve the file pair for a session id
    pub fn resolve(&self, id: u32) -> SessionPaths {
        let dir = self.base_dir.join(self.naming.dir_name(id));
        SessionPaths {
            id,
            label: dir.join(&self.label_file),
            prediction: dir.join(&self.prediction_file),
        }
    }

    /// Load both vectors for a session
    pub fn load(&self, id: u32) -> EvalResult<SessionData> {
        let paths = self.resolve(id);
        let labels = read_vector(&paths.label)?;
        let predictions = read_vector(&paths.prediction)?;

        debug!(
            "Loaded session {}: {} labels, {} predictions",
            id,
            labels.len(),
            predictions.len()
        );

        Ok(SessionData {
            paths,
            labels,
            predictions,
        })
    }

    /// Find session directories containing both files, sorted by id
    pub fn discover(&self) -> EvalResult<Vec<u32>> {
        if !self.base_dir.is_dir() {
            return Err(EvalError::io(
                &self.base_dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "base directory not found"),
            ));
        }

        let mut ids = Vec::new();
        for entry in WalkDir::new(&self.base_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_dir() {
                continue;
            }
            let Some(id) = entry
                .file_name()
                .to_str()
                .and_then(|n| self.naming.parse(n))
            else {
                continue;
            };

            let paths = self.resolve(id);
            if paths.label.is_file() && paths.prediction.is_file() {
                ids.push(id);
            } else {
                debug!("Ignoring incomplete session directory {:?}", entry.path());
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}

/// Read a whitespace-separated numeric file into a flat vector.
///
/// Blank lines are ignored and `#` starts a comment.
pub fn read_vector(path: &Path) -> EvalResult<Vec<f64>> {
    let content = std::fs::read_to_string(path).map_err(|e| EvalError::io(path, e))?;
    parse_vector(&content, path)
}

fn parse_vector(content: &str, path: &Path) -> EvalResult<Vec<f64>> {
    let mut values = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let data = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };

        for token in data.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| EvalError::Parse {
                path: path.to_path_buf(),
                line: line_no + 1,
                token: token.to_string(),
            })?;
            values.push(value);
        }
    }

    Ok(values)
}
