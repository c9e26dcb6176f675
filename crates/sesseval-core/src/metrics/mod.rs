//! Metric computation and aggregation for evaluation
//!
//! This module provides the per-session confusion counts, the metric
//! formulas and the [`Evaluator`] that accumulates sessions into macro and
//! pooled reports.

mod evaluator;
pub mod formulas;
mod types;

pub use evaluator::Evaluator;
pub use types::{ConfusionCounts, EvalReport, MetricSet, SessionResult};
