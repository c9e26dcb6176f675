//! Report generation for evaluation results
//!
//! Generates reports in various formats (text, JSON, Markdown).

mod json;
mod markdown;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, EvalResult};
use crate::metrics::MetricSet;
use crate::runner::RunSummary;

/// Header above the macro-averaged metrics
pub const MACRO_HEADER: &str = "=== Average over Session: ===";

/// Header above the pooled metrics
pub const POOLED_HEADER: &str = "=== Entire Data: ===";

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl FromStr for ReportFormat {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            other => Err(EvalError::config(format!("unknown report format '{other}'"))),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Generate a report in the specified format
pub fn generate_report(summary: &RunSummary, format: ReportFormat) -> EvalResult<String> {
    match format {
        ReportFormat::Text => Ok(generate_text(summary)),
        ReportFormat::Json => JsonReporter::generate(summary),
        ReportFormat::Markdown => Ok(MarkdownReporter::generate(summary)),
    }
}

/// One `Recall: .., Precision: .., Accuracy: .., F1: ..` line.
///
/// Values use shortest round-trip formatting so nothing is rounded away.
pub fn metrics_line(metrics: &MetricSet) -> String {
    format!(
        "Recall: {:?}, Precision: {:?}, Accuracy: {:?}, F1: {:?}",
        metrics.recall, metrics.precision, metrics.accuracy, metrics.f1
    )
}

/// Plain text report for terminal output
fn generate_text(summary: &RunSummary) -> String {
    let report = &summary.report;
    let mut output = String::new();

    output.push_str(MACRO_HEADER);
    output.push('\n');
    output.push_str(&metrics_line(&report.macro_average));
    output.push('\n');
    output.push_str(POOLED_HEADER);
    output.push('\n');
    output.push_str(&metrics_line(&report.pooled));
    output.push('\n');

    if !summary.sessions.is_empty() {
        output.push_str(&format!("\n{:-<70}\n", ""));
        output.push_str(&format!(
            "{:<10} {:>8} {:>12} {:>12} {:>12} {:>12}\n",
            "Session", "Samples", "Recall", "Precision", "Accuracy", "F1"
        ));
        output.push_str(&format!("{:-<70}\n", ""));

        for session in &summary.sessions {
            let m = &session.result.metrics;
            output.push_str(&format!(
                "{:<10} {:>8} {:>12.4} {:>12.4} {:>12.4} {:>12.4}\n",
                session.id,
                session.result.counts.num_sample,
                m.recall,
                m.precision,
                m.accuracy,
                m.f1
            ));
        }
        output.push_str(&format!("{:-<70}\n", ""));
    }

    if !summary.skipped.is_empty() {
        output.push_str("\nSKIPPED\n");
        for skipped in &summary.skipped {
            output.push_str(&format!("  Session {}: {}\n", skipped.id, skipped.reason));
        }
    }

    output
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::metrics::Evaluator;
    use crate::runner::{SessionOutcome, SkippedSession};
    use chrono::Utc;
    use std::path::PathBuf;

    pub(crate) fn create_test_summary() -> RunSummary {
        let mut evaluator = Evaluator::new();
        let first = evaluator
            .evaluate_session(&[1.0, 1.0, 0.0, 0.0], &[1.0, 0.0, 0.0, 0.0])
            .unwrap();
        let second = evaluator
            .evaluate_session(&[1.0, 0.0, 1.0, 0.0], &[1.0, 0.0, 1.0, 0.0])
            .unwrap();

        RunSummary {
            report: evaluator.report().unwrap(),
            sessions: vec![
                SessionOutcome {
                    id: 2,
                    result: first,
                },
                SessionOutcome {
                    id: 3,
                    result: second,
                },
            ],
            skipped: vec![SkippedSession {
                id: 15,
                reason: "Session contains no samples".to_string(),
            }],
            base_dir: PathBuf::from("submission/sample"),
            timestamp: Utc::now(),
            elapsed_secs: 0.5,
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert!("html".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_metrics_line() {
        let line = metrics_line(&MetricSet {
            recall: 0.5,
            precision: 1.0,
            accuracy: 0.75,
            f1: 2.0 / 3.0,
        });
        assert_eq!(
            line,
            "Recall: 0.5, Precision: 1.0, Accuracy: 0.75, F1: 0.6666666666666666"
        );
    }

    #[test]
    fn test_text_report_layout() {
        let summary = create_test_summary();
        let text = generate_report(&summary, ReportFormat::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], MACRO_HEADER);
        let expected = "Recall: 0.75, Precision: 1.0, Accuracy: 0.875, F1: ";
        assert!(lines[1].starts_with(expected));
        assert_eq!(lines[2], POOLED_HEADER);
        assert!(lines[3].starts_with(expected));
        assert!(text.contains("Session 15: Session contains no samples"));
    }
}
