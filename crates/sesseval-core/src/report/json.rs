//! JSON report generation

use crate::error::EvalResult;
use crate::runner::RunSummary;

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Generate a JSON report
    pub fn generate(summary: &RunSummary) -> EvalResult<String> {
        let json = serde_json::to_string_pretty(summary)?;
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::create_test_summary;

    #[test]
    fn test_json_generation() {
        let summary = create_test_summary();
        let json = JsonReporter::generate(&summary).unwrap();

        assert!(json.contains("macro_average"));
        assert!(json.contains("pooled"));
        assert!(json.contains("true_positive"));

        let parsed: RunSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.report, summary.report);
        assert_eq!(parsed.skipped.len(), 1);
    }
}
