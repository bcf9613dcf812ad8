//! Confidence-gated classification
//!
//! Asks the model for a JSON classification record, parses it, and relabels
//! the answer as [`UNCERTAIN`] when the reported confidence is below the
//! threshold. Transport failures and unparseable output come back as `Err`;
//! a low-confidence answer is a normal `Ok` outcome.

use crate::classifier::{
    Categories, Classification, ModelOutputRecord, DEFAULT_CONFIDENCE_THRESHOLD, UNCERTAIN,
};
use crate::prompts;
use promptlab_core::{CompletionClient, Error, GenerationParams, Result};
use serde::Deserialize;
use tracing::{debug, warn};

/// Classifier that applies a confidence threshold to model output
#[derive(Debug, Clone)]
pub struct GatedClassifier {
    categories: Categories,
    threshold: f64,
    params: GenerationParams,
}

impl GatedClassifier {
    /// Create a classifier with the default threshold and deterministic settings
    pub fn new(categories: Categories) -> Self {
        Self {
            categories,
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            params: GenerationParams::CLASSIFICATION,
        }
    }

    /// Set the confidence threshold; must lie in [0, 1]
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::config(format!(
                "confidence threshold must be between 0 and 1, got {threshold}"
            )));
        }
        self.threshold = threshold;
        Ok(self)
    }

    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Generation settings sent with every classification call
    pub fn params(&self) -> GenerationParams {
        self.params
    }

    /// Classify `text` with a single completion call
    pub async fn classify<C>(&self, client: &C, text: &str) -> Result<Classification>
    where
        C: CompletionClient + ?Sized,
    {
        let prompt = prompts::classification_prompt(text, &self.categories);
        let completion = client.complete(&prompt, self.params).await?;
        debug!(completion = %completion, "Raw classification output");

        let record = parse_model_output(&completion, &self.categories)?;
        Ok(apply_threshold(record, self.threshold))
    }
}

/// Classify `text` into one of `categories`, gating on `threshold`
pub async fn classify<C>(
    client: &C,
    text: &str,
    categories: &Categories,
    threshold: f64,
) -> Result<Classification>
where
    C: CompletionClient + ?Sized,
{
    GatedClassifier::new(categories.clone())
        .with_threshold(threshold)?
        .classify(client, text)
        .await
}

/// Wire shape of the model's answer before validation
#[derive(Debug, Deserialize)]
struct RawModelOutput {
    #[serde(rename = "Sentiment")]
    sentiment: String,
    #[serde(rename = "Confidence", default)]
    confidence: Option<f64>,
    #[serde(rename = "Explanation")]
    explanation: String,
}

/// Parse raw completion text into a validated record
///
/// A missing `Confidence` is read as 0, which always fails a positive
/// threshold. A null `Confidence`, labels outside `categories` (other than
/// [`UNCERTAIN`]) and confidences outside [0, 1] are rejected.
pub fn parse_model_output(raw: &str, categories: &Categories) -> Result<ModelOutputRecord> {
    let value: serde_json::Value = serde_json::from_str(raw.trim())
        .map_err(|e| Error::parse(format!("model output is not valid JSON: {e}")))?;

    // Structs also deserialize from arrays; only objects are records
    if !value.is_object() {
        return Err(Error::parse("model output is not a JSON object"));
    }

    // Option<f64> reads null as absent; only absence defaults to zero
    if value.get("Confidence").is_some_and(serde_json::Value::is_null) {
        return Err(Error::parse("model output has a null Confidence"));
    }

    let parsed: RawModelOutput = serde_json::from_value(value)
        .map_err(|e| Error::parse(format!("model output is not a classification record: {e}")))?;

    let confidence = match parsed.confidence {
        Some(c) => c,
        None => {
            // Treated as zero confidence rather than a parse failure
            warn!("Model output has no Confidence field; treating it as 0");
            0.0
        }
    };

    if !(0.0..=1.0).contains(&confidence) {
        return Err(Error::parse(format!("confidence {confidence} is outside [0, 1]")));
    }

    if parsed.sentiment != UNCERTAIN && !categories.contains(&parsed.sentiment) {
        return Err(Error::parse(format!(
            "label '{}' is not one of: {categories}",
            parsed.sentiment
        )));
    }

    Ok(ModelOutputRecord {
        sentiment: parsed.sentiment,
        confidence,
        explanation: parsed.explanation,
    })
}

/// Accept the record or relabel it as uncertain
pub fn apply_threshold(record: ModelOutputRecord, threshold: f64) -> Classification {
    if record.meets_threshold(threshold) {
        Classification::accepted(record)
    } else {
        debug!(
            label = %record.sentiment,
            confidence = record.confidence,
            threshold,
            "Confidence below threshold"
        );
        Classification::below_threshold(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::LOW_CONFIDENCE_EXPLANATION;

    #[test]
    fn test_parse_valid_record() {
        let raw = r#"{"Sentiment":"Positive","Confidence":0.95,"Explanation":"glowing"}"#;
        let record = parse_model_output(raw, &Categories::sentiment()).unwrap();
        assert_eq!(record, ModelOutputRecord::new("Positive", 0.95, "glowing"));
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        let raw = "\n  {\"Sentiment\": \"Neutral\", \"Confidence\": 1, \"Explanation\": \"ok\"}\n";
        let record = parse_model_output(raw, &Categories::sentiment()).unwrap();
        assert_eq!(record.confidence, 1.0);
    }

    #[test]
    fn test_missing_confidence_defaults_to_zero() {
        let raw = r#"{"Sentiment":"Negative","Explanation":"harsh"}"#;
        let record = parse_model_output(raw, &Categories::sentiment()).unwrap();
        assert_eq!(record.confidence, 0.0);

        let classification = apply_threshold(record, 0.8);
        assert!(!classification.accepted);
        assert_eq!(classification.label(), UNCERTAIN);
    }

    #[test]
    fn test_malformed_outputs_are_parse_errors() {
        let categories = Categories::sentiment();
        let cases = [
            "not json",
            "",
            r#"{"Sentiment":"Positive","Confidence":0.9"#,
            r#"["Positive", 0.9, "list"]"#,
            r#"{"Confidence":0.9,"Explanation":"no label"}"#,
            r#"{"Sentiment":"Positive","Confidence":0.9}"#,
            r#"{"Sentiment":"Positive","Confidence":"high","Explanation":"x"}"#,
            r#"{"Sentiment":"Positive","Confidence":null,"Explanation":"x"}"#,
            r#"{"Sentiment":null,"Confidence":0.9,"Explanation":"x"}"#,
        ];

        for raw in cases {
            let err = parse_model_output(raw, &categories).unwrap_err();
            assert!(err.is_parse(), "{raw:?} gave {err:?}");
        }
    }

    #[test]
    fn test_unknown_label_rejected() {
        let raw = r#"{"Sentiment":"Ecstatic","Confidence":0.99,"Explanation":"x"}"#;
        let err = parse_model_output(raw, &Categories::sentiment()).unwrap_err();
        assert!(err.to_string().contains("Ecstatic"));
    }

    #[test]
    fn test_uncertain_label_accepted_from_model() {
        let raw = r#"{"Sentiment":"uncertain","Confidence":0.9,"Explanation":"mixed"}"#;
        let record = parse_model_output(raw, &Categories::sentiment()).unwrap();
        assert!(record.is_uncertain());
    }

    #[test]
    fn test_out_of_range_confidence_rejected() {
        let raw = r#"{"Sentiment":"Positive","Confidence":95,"Explanation":"x"}"#;
        assert!(parse_model_output(raw, &Categories::sentiment())
            .unwrap_err()
            .is_parse());
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let record = ModelOutputRecord::new("Positive", 0.8, "right at the line");
        let classification = apply_threshold(record.clone(), 0.8);
        assert!(classification.accepted);
        assert_eq!(classification.record, record);
    }

    #[test]
    fn test_below_threshold_keeps_confidence() {
        let classification = apply_threshold(ModelOutputRecord::new("Positive", 0.4, "..."), 0.8);
        assert_eq!(
            classification.record,
            ModelOutputRecord::new(UNCERTAIN, 0.4, LOW_CONFIDENCE_EXPLANATION)
        );
    }

    #[test]
    fn test_threshold_validation() {
        let classifier = GatedClassifier::new(Categories::sentiment());
        assert_eq!(classifier.threshold(), DEFAULT_CONFIDENCE_THRESHOLD);
        assert!(classifier.clone().with_threshold(1.5).is_err());
        assert!(classifier.clone().with_threshold(-0.1).is_err());
        assert!(classifier.clone().with_threshold(f64::NAN).is_err());
        assert_eq!(classifier.with_threshold(0.0).unwrap().threshold(), 0.0);
    }
}
