//! Evaluation runner
//!
//! Drives loading and evaluation over the configured sessions.

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{EvalConfig, InvalidSessionPolicy};
use crate::error::EvalResult;
use crate::loader::SessionLoader;
use crate::metrics::{EvalReport, Evaluator, SessionResult};

/// A session that was evaluated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub id: u32,
    pub result: SessionResult,
}

/// A session left out under [`InvalidSessionPolicy::Skip`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedSession {
    pub id: u32,
    pub reason: String,
}

/// Everything produced by one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub report: EvalReport,
    pub sessions: Vec<SessionOutcome>,
    #[serde(default)]
    pub skipped: Vec<SkippedSession>,
    pub base_dir: PathBuf,
    pub timestamp: DateTime<Utc>,
    pub elapsed_secs: f64,
}

/// Runs an evaluation described by an [`EvalConfig`]
pub struct EvalRunner {
    config: EvalConfig,
    loader: SessionLoader,
}

impl EvalRunner {
    pub fn new(config: EvalConfig) -> EvalResult<Self> {
        config.validate()?;
        let loader = config.loader();
        Ok(Self { config, loader })
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Session ids to evaluate, discovered when none are configured
    pub fn session_ids(&self) -> EvalResult<Vec<u32>> {
        if self.config.sessions.is_empty() {
            let ids = self.loader.discover()?;
            info!(
                "Discovered {} sessions under {:?}",
                ids.len(),
                self.loader.base_dir()
            );
            Ok(ids)
        } else {
            Ok(self.config.sessions.clone())
        }
    }

    /// Evaluate every session in order and report
    pub fn run(&self) -> EvalResult<RunSummary> {
        let start = Instant::now();
        let ids = self.session_ids()?;

        let mut evaluator = Evaluator::new();
        let mut sessions = Vec::with_capacity(ids.len());
        let mut skipped = Vec::new();

        for id in ids {
            let outcome = self
                .loader
                .load(id)
                .and_then(|data| evaluator.evaluate_session(&data.labels, &data.predictions));

            match outcome {
                Ok(result) => {
                    info!(
                        "Session {}: recall={:.4} precision={:.4} accuracy={:.4} f1={:.4}",
                        id,
                        result.metrics.recall,
                        result.metrics.precision,
                        result.metrics.accuracy,
                        result.metrics.f1
                    );
                    sessions.push(SessionOutcome { id, result });
                }
                Err(e)
                    if e.is_session_error()
                        && self.config.on_invalid_session == InvalidSessionPolicy::Skip =>
                {
                    warn!("Skipping session {}: {}", id, e);
                    skipped.push(SkippedSession {
                        id,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        let report = evaluator.report()?;

        Ok(RunSummary {
            report,
            sessions,
            skipped,
            base_dir: self.config.base_dir.clone(),
            timestamp: Utc::now(),
            elapsed_secs: start.elapsed().as_secs_f64(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_session(base: &Path, id: u32, labels: &str, predictions: &str) {
        let dir = base.join(format!("Session{:02}", id));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("detection.txt"), labels).unwrap();
        fs::write(dir.join("prediction.txt"), predictions).unwrap();
    }

    #[test]
    fn test_run_configured_sessions() {
        let temp = TempDir::new().unwrap();
        write_session(temp.path(), 2, "1\n1\n0\n0\n", "1\n0\n0\n0\n");
        write_session(temp.path(), 3, "0\n0\n0\n", "0\n0\n0\n");

        let config = EvalConfig::default()
            .with_base_dir(temp.path())
            .with_sessions(vec![3, 2]);
        let summary = EvalRunner::new(config).unwrap().run().unwrap();

        assert_eq!(summary.report.session_count, 2);
        let ids: Vec<u32> = summary.sessions.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert!(summary.skipped.is_empty());
        assert_eq!(summary.report.totals.num_sample, 7);
        assert_eq!(summary.report.totals.correct_prediction, 6);
    }

    #[test]
    fn test_run_discovers_sessions() {
        let temp = TempDir::new().unwrap();
        write_session(temp.path(), 16, "1", "1");
        write_session(temp.path(), 4, "0", "1");

        let config = EvalConfig::default()
            .with_base_dir(temp.path())
            .with_sessions(Vec::new());
        let summary = EvalRunner::new(config).unwrap().run().unwrap();

        let ids: Vec<u32> = summary.sessions.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![4, 16]);
    }

    #[test]
    fn test_abort_on_missing_session() {
        let temp = TempDir::new().unwrap();
        write_session(temp.path(), 2, "1 0", "1 0");

        let config = EvalConfig::default()
            .with_base_dir(temp.path())
            .with_sessions(vec![2, 9]);
        let err = EvalRunner::new(config).unwrap().run().unwrap_err();
        assert!(matches!(err, EvalError::Io { .. }));
    }

    #[test]
    fn test_skip_invalid_sessions() {
        let temp = TempDir::new().unwrap();
        write_session(temp.path(), 2, "1 0", "1 0");
        write_session(temp.path(), 3, "1 0 1", "1 0");
        write_session(temp.path(), 4, "1 2", "1 0");

        let config = EvalConfig::default()
            .with_base_dir(temp.path())
            .with_sessions(vec![2, 3, 4, 5])
            .with_policy(InvalidSessionPolicy::Skip);
        let summary = EvalRunner::new(config).unwrap().run().unwrap();

        assert_eq!(summary.report.session_count, 1);
        let skipped: Vec<u32> = summary.skipped.iter().map(|s| s.id).collect();
        assert_eq!(skipped, vec![3, 4, 5]);
        assert!(summary.skipped[0].reason.contains("Shape mismatch"));
    }

    #[test]
    fn test_all_sessions_skipped_is_an_error() {
        let temp = TempDir::new().unwrap();
        let config = EvalConfig::default()
            .with_base_dir(temp.path())
            .with_sessions(vec![1])
            .with_policy(InvalidSessionPolicy::Skip);
        let err = EvalRunner::new(config).unwrap().run().unwrap_err();
        assert!(matches!(err, EvalError::NoSessions));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EvalConfig::default().with_sessions(vec![1, 1]);
        assert!(EvalRunner::new(config).is_err());
    }
}
