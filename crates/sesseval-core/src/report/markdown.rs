//! Markdown report generation

use crate::metrics::MetricSet;
use crate::runner::RunSummary;

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Generate a Markdown report
    pub fn generate(summary: &RunSummary) -> String {
        let report = &summary.report;
        let mut md = String::new();

        md.push_str("# Session Evaluation Report\n\n");

        // Metadata
        md.push_str("## Overview\n\n");
        md.push_str(&format!("- **Data**: {}\n", summary.base_dir.display()));
        md.push_str(&format!("- **Sessions**: {}\n", report.session_count));
        md.push_str(&format!("- **Skipped**: {}\n", summary.skipped.len()));
        md.push_str(&format!("- **Samples**: {}\n", report.totals.num_sample));
        md.push_str(&format!(
            "- **Timestamp**: {}\n\n",
            summary.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        // Summary
        md.push_str("## Summary\n\n");
        md.push_str("| Scope | Recall | Precision | Accuracy | F1 |\n");
        md.push_str("|-------|--------|-----------|----------|----|\n");
        md.push_str(&summary_row("Average over Session", &report.macro_average));
        md.push_str(&summary_row("Entire Data", &report.pooled));
        md.push('\n');

        // Sessions
        md.push_str("## Sessions\n\n");
        md.push_str("| Session | Samples | TP | Positives | Predicted | Correct | Recall | Precision | Accuracy | F1 |\n");
        md.push_str("|---------|---------|----|-----------|-----------|---------|--------|-----------|----------|----|\n");

        for session in &summary.sessions {
            let c = &session.result.counts;
            let m = &session.result.metrics;
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {:.4} | {:.4} | {:.4} | {:.4} |\n",
                session.id,
                c.num_sample,
                c.true_positive,
                c.positive_sample,
                c.predict_positive,
                c.correct_prediction,
                m.recall,
                m.precision,
                m.accuracy,
                m.f1
            ));
        }
        md.push('\n');

        if !summary.skipped.is_empty() {
            md.push_str("## Skipped Sessions\n\n");
            for skipped in &summary.skipped {
                md.push_str(&format!("- **{}**: {}\n", skipped.id, skipped.reason));
            }
            md.push('\n');
        }

        md
    }
}

fn summary_row(scope: &str, m: &MetricSet) -> String {
    format!(
        "| {} | {:.4} | {:.4} | {:.4} | {:.4} |\n",
        scope, m.recall, m.precision, m.accuracy, m.f1
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::create_test_summary;

    #[test]
    fn test_markdown_generation() {
        let summary = create_test_summary();
        let md = MarkdownReporter::generate(&summary);

        assert!(md.contains("# Session Evaluation Report"));
        assert!(md.contains("| Average over Session | 0.7500 | 1.0000 | 0.8750 |"));
        assert!(md.contains("| Entire Data | 0.7500 | 1.0000 | 0.8750 |"));
        assert!(md.contains("## Skipped Sessions"));
        assert!(md.contains("| 2 | 4 | 1 | 2 | 1 | 3 |"));
    }
}
