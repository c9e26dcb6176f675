//! Session-based evaluation of binary predictions
//!
//! This crate compares binary predictions against ground-truth labels over
//! independent sessions and reports recall, precision, accuracy and F1 two
//! ways:
//!
//! - **Average over Session**: the mean of each metric computed per session
//! - **Entire Data**: each metric recomputed from counts pooled over all sessions
//!
//! # Example
//!
//! ```rust
//! use sesseval_core::Evaluator;
//!
//! let mut evaluator = Evaluator::new();
//! evaluator.evaluate_session(&[1.0, 1.0, 0.0, 0.0], &[1.0, 0.0, 0.0, 0.0])?;
//! evaluator.evaluate_session(&[0.0, 0.0, 0.0], &[0.0, 0.0, 0.0])?;
//!
//! let report = evaluator.report()?;
//! assert_eq!(report.session_count, 2);
//! # Ok::<(), sesseval_core::EvalError>(())
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod report;
pub mod runner;

// Re-exports for convenience
pub use config::{EvalConfig, InvalidSessionPolicy};
pub use error::{EvalError, EvalResult, VectorKind};
pub use loader::{SessionLoader, SessionNaming, SessionPaths};
pub use metrics::{ConfusionCounts, EvalReport, Evaluator, MetricSet, SessionResult};
pub use report::{ReportFormat, generate_report};
pub use runner::{EvalRunner, RunSummary, SessionOutcome, SkippedSession};
