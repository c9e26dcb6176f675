//! Per-session evaluation with macro and pooled aggregation
//!
//! Each session contributes its metric quadruple to the macro sequences and
//! its raw counts to the pooled totals.

use tracing::debug;

use super::formulas::mean;
use super::types::{ConfusionCounts, EvalReport, MetricSet, SessionResult};
use crate::error::{EvalError, EvalResult, VectorKind};

/// Accumulator for one evaluation run
#[derive(Debug, Default)]
pub struct Evaluator {
    /// Per-session recall values
    recall_list: Vec<f64>,

    /// Per-session precision values
    precision_list: Vec<f64>,

    /// Per-session accuracy values
    accuracy_list: Vec<f64>,

    /// Per-session F1 values
    f1_list: Vec<f64>,

    /// Counts summed over every evaluated session
    totals: ConfusionCounts,
}

impl Evaluator {
    /// Create an empty evaluator
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate one session's aligned label and prediction vectors.
    ///
    /// Inputs are validated before any state changes, so a failed call
    /// leaves the evaluator exactly as it was.
    pub fn evaluate_session(
        &mut self,
        labels: &[f64],
        predictions: &[f64],
    ) -> EvalResult<SessionResult> {
        if labels.len() != predictions.len() {
            return Err(EvalError::ShapeMismatch {
                labels: labels.len(),
                predictions: predictions.len(),
            });
        }
        if labels.is_empty() {
            return Err(EvalError::EmptySession);
        }

        let labels = to_binary(labels, VectorKind::Labels)?;
        let predictions = to_binary(predictions, VectorKind::Predictions)?;

        let counts = ConfusionCounts::from_pairs(labels.into_iter().zip(predictions));
        self.record(counts)
    }

    /// Evaluate a session from precomputed counts
    pub fn evaluate_counts(&mut self, counts: ConfusionCounts) -> EvalResult<SessionResult> {
        if counts.num_sample == 0 {
            return Err(EvalError::EmptySession);
        }
        counts.validate()?;
        self.record(counts)
    }

    fn record(&mut self, counts: ConfusionCounts) -> EvalResult<SessionResult> {
        let metrics = counts.metrics().ok_or(EvalError::EmptySession)?;
        let totals = self
            .totals
            .checked_add(&counts)
            .ok_or_else(|| EvalError::InconsistentCounts {
                message: "pooled totals overflow u64".to_string(),
            })?;

        self.recall_list.push(metrics.recall);
        self.precision_list.push(metrics.precision);
        self.accuracy_list.push(metrics.accuracy);
        self.f1_list.push(metrics.f1);
        self.totals = totals;

        debug!(
            "Recorded session {}: {} samples, {} correct",
            self.session_count(),
            counts.num_sample,
            counts.correct_prediction
        );

        Ok(SessionResult { counts, metrics })
    }

    /// Macro-averaged and pooled metrics over all sessions so far
    pub fn report(&self) -> EvalResult<EvalReport> {
        let (Some(recall), Some(precision), Some(accuracy), Some(f1)) = (
            mean(&self.recall_list),
            mean(&self.precision_list),
            mean(&self.accuracy_list),
            mean(&self.f1_list),
        ) else {
            return Err(EvalError::NoSessions);
        };

        let pooled = self.totals.metrics().ok_or(EvalError::NoSessions)?;

        Ok(EvalReport {
            session_count: self.session_count(),
            macro_average: MetricSet {
                recall,
                precision,
                accuracy,
                f1,
            },
            pooled,
            totals: self.totals,
        })
    }

    /// Number of sessions evaluated
    pub fn session_count(&self) -> usize {
        self.accuracy_list.len()
    }

    /// Counts summed over all sessions
    pub fn totals(&self) -> ConfusionCounts {
        self.totals
    }

    /// Recorded per-session metrics, in evaluation order
    pub fn session_metrics(&self) -> Vec<MetricSet> {
        (0..self.session_count())
            .map(|i| MetricSet {
                recall: self.recall_list[i],
                precision: self.precision_list[i],
                accuracy: self.accuracy_list[i],
                f1: self.f1_list[i],
            })
            .collect()
    }
}

fn to_binary(values: &[f64], vector: VectorKind) -> EvalResult<Vec<bool>> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if value == 1.0 {
                Ok(true)
            } else if value == 0.0 {
                Ok(false)
            } else {
                Err(EvalError::InvalidLabelValue {
                    vector,
                    index,
                    value,
                })
            }
        })
        .collect()
}
