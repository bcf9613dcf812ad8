//! Experiment configuration (categories, sample texts, strategies, sampling)
//!
//! Gated classification always runs with [`GenerationParams::CLASSIFICATION`];
//! only the comparison and analysis calls take sampling from config.

use crate::classifier::{Categories, DEFAULT_CONFIDENCE_THRESHOLD};
use crate::gated::GatedClassifier;
use crate::strategy::Strategy;
use promptlab_core::{GenerationParams, Result};
use serde::{Deserialize, Serialize};

/// Texts compared when none are supplied
pub const SAMPLE_TEXTS: [&str; 3] = [
    "I absolutely love this product! It exceeded all my expectations.",
    "The service was terrible and I will not be coming back.",
    "The experience was just okay, nothing extraordinary.",
];

/// Settings for one experiment run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Closed label set
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Input texts for comparisons
    #[serde(default = "default_texts")]
    pub texts: Vec<String>,

    /// Strategies to compare, in order
    #[serde(default = "default_strategies")]
    pub strategies: Vec<Strategy>,

    /// Gated classification settings
    #[serde(default)]
    pub classify: ClassifySettings,

    /// Sampling for strategy comparisons
    #[serde(default = "default_compare_params")]
    pub compare: GenerationParams,

    /// Sampling for free-form content analysis
    #[serde(default)]
    pub analyze: GenerationParams,
}

impl ExperimentConfig {
    /// Validated category set
    pub fn categories(&self) -> Result<Categories> {
        Categories::new(self.categories.iter().cloned())
    }

    /// Gated classifier built from these settings
    pub fn gated_classifier(&self) -> Result<GatedClassifier> {
        GatedClassifier::new(self.categories()?).with_threshold(self.classify.threshold)
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            texts: default_texts(),
            strategies: default_strategies(),
            classify: ClassifySettings::default(),
            compare: default_compare_params(),
            analyze: GenerationParams::default(),
        }
    }
}

/// Gated classification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifySettings {
    /// Minimum accepted confidence
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for ClassifySettings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

fn default_categories() -> Vec<String> {
    Categories::sentiment().as_slice().to_vec()
}

fn default_texts() -> Vec<String> {
    SAMPLE_TEXTS.iter().map(|t| t.to_string()).collect()
}

fn default_strategies() -> Vec<Strategy> {
    Strategy::ALL.to_vec()
}

fn default_threshold() -> f64 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

fn default_compare_params() -> GenerationParams {
    GenerationParams::COMPARISON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExperimentConfig::default();
        assert_eq!(config.categories().unwrap(), Categories::sentiment());
        assert_eq!(config.texts.len(), 3);
        assert_eq!(config.strategies, Strategy::ALL);
        assert_eq!(config.compare, GenerationParams::COMPARISON);
        assert_eq!(config.analyze, GenerationParams::default());
        assert_eq!(config.gated_classifier().unwrap().threshold(), 0.8);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ExperimentConfig = serde_json::from_str(
            r#"{
                "categories": ["Spam", "Ham"],
                "strategies": ["few_shot"],
                "classify": { "threshold": 0.6 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.categories().unwrap().joined(), "Spam, Ham");
        assert_eq!(config.strategies, vec![Strategy::FewShot]);
        assert_eq!(config.classify.threshold, 0.6);
        assert_eq!(config.texts.len(), 3);
    }

    #[test]
    fn test_classify_sampling_is_not_configurable() {
        let config: ExperimentConfig = serde_json::from_str(
            r#"{
                "classify": {
                    "threshold": 0.7,
                    "sampling": { "max_tokens": 900, "temperature": 0.9 }
                },
                "compare": { "max_tokens": 900, "temperature": 0.9 }
            }"#,
        )
        .unwrap();

        let classifier = config.gated_classifier().unwrap();
        assert_eq!(classifier.params(), GenerationParams::CLASSIFICATION);
        assert_eq!(classifier.params().temperature, 0.0);
        assert_eq!(config.compare, GenerationParams::new(900, 0.9));
    }

    #[test]
    fn test_invalid_threshold_surfaces_on_build() {
        let mut config = ExperimentConfig::default();
        config.classify.threshold = 2.0;
        assert!(config.gated_classifier().is_err());
    }
}
