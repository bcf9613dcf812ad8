//! Category sets and classification records

use promptlab_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label reported when the model's confidence falls below the threshold
pub const UNCERTAIN: &str = "uncertain";

/// Explanation written into relabelled records
pub const LOW_CONFIDENCE_EXPLANATION: &str = "Confidence below threshold";

/// Threshold applied when the caller does not pick one
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Closed, ordered set of labels the model must choose from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories(Vec<String>);

impl Categories {
    /// Create a category set; it must be non-empty and free of duplicates
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into().trim().to_string();
            if label.is_empty() {
                return Err(Error::config("category labels must not be empty"));
            }
            if out.contains(&label) {
                return Err(Error::config(format!("duplicate category label: {label}")));
            }
            out.push(label);
        }

        if out.is_empty() {
            return Err(Error::config("at least one category is required"));
        }

        Ok(Self(out))
    }

    /// The Positive / Negative / Neutral sentiment set
    pub fn sentiment() -> Self {
        Self(vec![
            "Positive".to_string(),
            "Negative".to_string(),
            "Neutral".to_string(),
        ])
    }

    /// Parse a comma-separated list such as `"Positive, Negative"`
    pub fn parse_list(list: &str) -> Result<Self> {
        Self::new(list.split(','))
    }

    /// Whether `label` is one of the categories (exact match)
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|c| c == label)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Labels joined with `", "` for embedding in prompts
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl fmt::Display for Categories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

/// Structured answer the model is asked to produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOutputRecord {
    /// One of the categories, or [`UNCERTAIN`]
    #[serde(rename = "Sentiment")]
    pub sentiment: String,

    /// Model-reported confidence (0.0-1.0)
    #[serde(rename = "Confidence")]
    pub confidence: f64,

    /// Free-text reasoning
    #[serde(rename = "Explanation")]
    pub explanation: String,
}

impl ModelOutputRecord {
    /// Create a new record
    pub fn new(
        sentiment: impl Into<String>,
        confidence: f64,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            sentiment: sentiment.into(),
            confidence,
            explanation: explanation.into(),
        }
    }

    /// Check if confidence meets the threshold
    pub fn meets_threshold(&self, threshold: f64) -> bool {
        self.confidence >= threshold
    }

    /// Whether the record carries the uncertain sentinel
    pub fn is_uncertain(&self) -> bool {
        self.sentiment == UNCERTAIN
    }
}

/// Outcome of a gated classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Record returned to the caller, possibly relabelled
    #[serde(flatten)]
    pub record: ModelOutputRecord,

    /// False when the record was relabelled for low confidence
    #[serde(skip)]
    pub accepted: bool,
}

impl Classification {
    /// Keep the record as the model reported it
    pub fn accepted(record: ModelOutputRecord) -> Self {
        Self {
            record,
            accepted: true,
        }
    }

    /// Relabel the record as uncertain, keeping the reported confidence
    pub fn below_threshold(mut record: ModelOutputRecord) -> Self {
        record.sentiment = UNCERTAIN.to_string();
        record.explanation = LOW_CONFIDENCE_EXPLANATION.to_string();
        Self {
            record,
            accepted: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.record.sentiment
    }

    pub fn confidence(&self) -> f64 {
        self.record.confidence
    }
}
