//! PromptLab Classifiers
//!
//! Prompting strategies and LLM-backed classification.
//!
//! - [`Strategy`] registry (basic, structured, few_shot) and the prompt builders behind it
//! - [`GatedClassifier`]: parses the model's JSON answer and downgrades
//!   low-confidence labels to `"uncertain"`
//! - [`compare_strategies`]: runs every strategy over the same texts and keeps
//!   the raw completions for side-by-side reading
//!
//! All remote work goes through [`promptlab_core::CompletionClient`], so any
//! implementation (including test stubs) can be plugged in.

pub mod classifier;
pub mod comparator;
pub mod config;
pub mod gated;
pub mod prompts;
pub mod strategy;

pub use classifier::{
    Categories, Classification, ModelOutputRecord, DEFAULT_CONFIDENCE_THRESHOLD,
    LOW_CONFIDENCE_EXPLANATION, UNCERTAIN,
};
pub use comparator::{
    compare_strategies, compare_with, ComparisonReport, CompletionOutcome, StrategyResults,
};
pub use config::{ClassifySettings, ExperimentConfig, SAMPLE_TEXTS};
pub use gated::{apply_threshold, classify, parse_model_output, GatedClassifier};
pub use strategy::Strategy;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{Categories, Classification, ModelOutputRecord};
    pub use crate::comparator::{compare_strategies, ComparisonReport};
    pub use crate::gated::GatedClassifier;
    pub use crate::strategy::Strategy;
}
