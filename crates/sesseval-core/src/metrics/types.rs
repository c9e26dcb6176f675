//! Core metric types for evaluation
//!
//! Defines the confusion counts and metric records produced per session and
//! for the whole run.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use super::formulas;
use crate::error::{EvalError, EvalResult};

/// Raw counts for one session, or summed over many
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionCounts {
    /// Samples with label 1 and prediction 1
    pub true_positive: u64,

    /// Samples with label 1
    pub positive_sample: u64,

    /// Samples with prediction 1
    pub predict_positive: u64,

    /// Samples where prediction equals label
    pub correct_prediction: u64,

    /// Total samples
    pub num_sample: u64,
}

impl ConfusionCounts {
    /// Count a paired label/prediction pass.
    ///
    /// Inputs must already be validated as equal-length and binary.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (bool, bool)>,
    {
        let mut counts = Self::default();
        for (label, prediction) in pairs {
            counts.num_sample += 1;
            if label {
                counts.positive_sample += 1;
            }
            if prediction {
                counts.predict_positive += 1;
            }
            if label && prediction {
                counts.true_positive += 1;
            }
            if label == prediction {
                counts.correct_prediction += 1;
            }
        }
        counts
    }

    pub fn negative_sample(&self) -> u64 {
        self.num_sample - self.positive_sample
    }

    pub fn true_negative(&self) -> u64 {
        self.correct_prediction - self.true_positive
    }

    pub fn false_positive(&self) -> u64 {
        self.predict_positive - self.true_positive
    }

    pub fn false_negative(&self) -> u64 {
        self.positive_sample - self.true_positive
    }

    /// Check the counts could come from a binary session.
    pub fn validate(&self) -> EvalResult<()> {
        let inconsistent = |message: String| Err(EvalError::InconsistentCounts { message });

        if self.true_positive > self.positive_sample {
            return inconsistent(format!(
                "true_positive {} exceeds positive_sample {}",
                self.true_positive, self.positive_sample
            ));
        }
        if self.true_positive > self.predict_positive {
            return inconsistent(format!(
                "true_positive {} exceeds predict_positive {}",
                self.true_positive, self.predict_positive
            ));
        }
        if self.positive_sample > self.num_sample || self.predict_positive > self.num_sample {
            return inconsistent(format!("positive counts exceed num_sample {}", self.num_sample));
        }
        if self.correct_prediction < self.true_positive
            || self.correct_prediction > self.num_sample
        {
            return inconsistent(format!(
                "correct_prediction {} outside [{}, {}]",
                self.correct_prediction, self.true_positive, self.num_sample
            ));
        }
        // true negatives = N - (pos + pred - tp)
        let union = self
            .positive_sample
            .checked_add(self.predict_positive - self.true_positive);
        let Some(union) = union.filter(|&union| union <= self.num_sample) else {
            return inconsistent(format!(
                "positive-labelled or positive-predicted samples exceed num_sample {}",
                self.num_sample
            ));
        };
        if self.correct_prediction - self.true_positive != self.num_sample - union {
            return inconsistent(format!(
                "correct_prediction {} does not match {} true positives and {} true negatives",
                self.correct_prediction,
                self.true_positive,
                self.num_sample - union
            ));
        }
        Ok(())
    }

    /// Field-wise sum, `None` if any count would overflow
    pub fn checked_add(&self, rhs: &Self) -> Option<Self> {
        Some(Self {
            true_positive: self.true_positive.checked_add(rhs.true_positive)?,
            positive_sample: self.positive_sample.checked_add(rhs.positive_sample)?,
            predict_positive: self.predict_positive.checked_add(rhs.predict_positive)?,
            correct_prediction: self.correct_prediction.checked_add(rhs.correct_prediction)?,
            num_sample: self.num_sample.checked_add(rhs.num_sample)?,
        })
    }

    /// Derive the metric quadruple, `None` when there are no samples
    pub fn metrics(&self) -> Option<MetricSet> {
        let accuracy = formulas::accuracy(self.correct_prediction, self.num_sample)?;
        let recall = formulas::recall(self.true_positive, self.positive_sample);
        let precision = formulas::precision(self.true_positive, self.predict_positive);

        Some(MetricSet {
            recall,
            precision,
            accuracy,
            f1: formulas::f1(precision, recall),
        })
    }
}

impl Add for ConfusionCounts {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for ConfusionCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.true_positive += rhs.true_positive;
        self.positive_sample += rhs.positive_sample;
        self.predict_positive += rhs.predict_positive;
        self.correct_prediction += rhs.correct_prediction;
        self.num_sample += rhs.num_sample;
    }
}

impl Sum for ConfusionCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Recall, precision, accuracy and F1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub recall: f64,
    pub precision: f64,
    pub accuracy: f64,
    pub f1: f64,
}

/// Result of evaluating a single session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub counts: ConfusionCounts,
    pub metrics: MetricSet,
}

/// Macro and pooled metrics over every evaluated session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    /// Number of sessions averaged
    pub session_count: usize,

    /// Mean of each per-session metric
    pub macro_average: MetricSet,

    /// Metrics recomputed from the summed counts
    pub pooled: MetricSet,

    /// Summed counts
    pub totals: ConfusionCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(tp: u64, pos: u64, pred: u64, correct: u64, n: u64) -> ConfusionCounts {
        ConfusionCounts {
            true_positive: tp,
            positive_sample: pos,
            predict_positive: pred,
            correct_prediction: correct,
            num_sample: n,
        }
    }

    #[test]
    fn test_from_pairs() {
        let pairs = [(true, true), (true, false), (false, false), (false, false)];
        let c = ConfusionCounts::from_pairs(pairs);

        assert_eq!(c, counts(1, 2, 1, 3, 4));
        assert_eq!(c.negative_sample(), 2);
        assert_eq!(c.true_negative(), 2);
        assert_eq!(c.false_positive(), 0);
        assert_eq!(c.false_negative(), 1);
    }

    #[test]
    fn test_sum_counts() {
        let total: ConfusionCounts = [counts(1, 2, 1, 3, 4), counts(2, 2, 2, 4, 4)]
            .into_iter()
            .sum();
        assert_eq!(total, counts(3, 4, 3, 7, 8));
    }

    #[test]
    fn test_metrics_empty() {
        assert!(ConfusionCounts::default().metrics().is_none());
    }

    #[test]
    fn test_validate() {
        assert!(counts(1, 2, 1, 3, 4).validate().is_ok());
        assert!(counts(0, 0, 0, 3, 3).validate().is_ok());
        // tp above positives
        assert!(counts(3, 2, 3, 3, 4).validate().is_err());
        // 1 tp, 2 pos, 1 pred in 4 samples leaves exactly 2 true negatives
        assert!(counts(1, 2, 1, 4, 4).validate().is_err());
    }

    #[test]
    fn test_validate_huge_counts_without_overflow() {
        let huge = counts(0, u64::MAX, u64::MAX, 0, u64::MAX);
        assert!(matches!(huge.validate(), Err(EvalError::InconsistentCounts { .. })));

        // all positive, all predicted positive, all correct
        let full = counts(u64::MAX, u64::MAX, u64::MAX, u64::MAX, u64::MAX);
        assert!(full.validate().is_ok());
    }

    #[test]
    fn test_checked_add() {
        let a = counts(1, 2, 1, 3, 4);
        assert_eq!(a.checked_add(&a), Some(counts(2, 4, 2, 6, 8)));

        let full = counts(0, 0, 0, u64::MAX, u64::MAX);
        assert_eq!(full.checked_add(&counts(0, 0, 0, 1, 1)), None);
    }
}
