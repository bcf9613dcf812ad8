//! Plain-text rendering of results

use promptlab_classifiers::{Classification, ComparisonReport, CompletionOutcome};
use std::fmt::Write;

const SEPARATOR_WIDTH: usize = 50;

/// One block per strategy, one `Result:` line per text
pub fn render_comparison(report: &ComparisonReport) -> String {
    let mut out = String::new();
    let separator = "-".repeat(SEPARATOR_WIDTH);

    for results in report.iter() {
        let _ = writeln!(out, "Strategy: {}", results.strategy);
        for outcome in &results.outcomes {
            let _ = writeln!(out, "Result: {}", render_outcome(outcome));
            let _ = writeln!(out, "{separator}");
        }
    }

    out
}

/// Raw completion text, or the failure marker
pub fn render_outcome(outcome: &CompletionOutcome) -> String {
    match outcome {
        Ok(text) => text.clone(),
        Err(e) => format!("Error: {e}"),
    }
}

/// Pretty JSON record, with a note when it was relabelled
pub fn render_classification(classification: &Classification) -> String {
    let json = serde_json::to_string_pretty(classification)
        .unwrap_or_else(|e| format!("Error: failed to render classification: {e}"));

    if classification.accepted {
        json
    } else {
        format!("{json}\n(reported label rejected by confidence threshold)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptlab_classifiers::ModelOutputRecord;
    use promptlab_core::Error;

    #[test]
    fn test_render_outcome() {
        assert_eq!(render_outcome(&Ok("Positive".to_string())), "Positive");
        assert_eq!(
            render_outcome(&Err(Error::transport("connection reset"))),
            "Error: transport error: connection reset"
        );
    }

    #[test]
    fn test_render_accepted_classification() {
        let classification =
            Classification::accepted(ModelOutputRecord::new("Negative", 0.9, "angry"));
        let rendered = render_classification(&classification);

        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["Sentiment"], "Negative");
        assert!(!rendered.contains("rejected"));
    }

    #[test]
    fn test_render_uncertain_classification() {
        let classification =
            Classification::below_threshold(ModelOutputRecord::new("Negative", 0.3, "unsure"));
        let rendered = render_classification(&classification);
        assert!(rendered.contains("\"Sentiment\": \"uncertain\""));
        assert!(rendered.ends_with("(reported label rejected by confidence threshold)"));
    }
}
