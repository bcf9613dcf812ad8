//! Subcommand runners
//!
//! Each runner returns the text to print. Remote failures are rendered
//! inline; only configuration problems surface as `Err`.

use crate::cli::{AnalyzeArgs, ClassifyArgs, CompareArgs};
use crate::output;
use promptlab_classifiers::{
    compare_with, prompts, Categories, ExperimentConfig, GatedClassifier, Strategy,
};
use promptlab_core::{CompletionClient, Result};
use tracing::{info, warn};

/// Category set from the flag, or from the experiment config
fn categories_for(flag: Option<&str>, experiment: &ExperimentConfig) -> Result<Categories> {
    match flag {
        Some(list) => Categories::parse_list(list),
        None => experiment.categories(),
    }
}

pub async fn run_compare<C>(
    client: &C,
    experiment: &ExperimentConfig,
    args: &CompareArgs,
) -> Result<String>
where
    C: CompletionClient + ?Sized,
{
    let categories = categories_for(args.categories.as_deref(), experiment)?;
    let texts: &[String] = if args.texts.is_empty() {
        &experiment.texts
    } else {
        &args.texts
    };
    let strategies: &[Strategy] = if args.strategies.is_empty() {
        &experiment.strategies
    } else {
        &args.strategies
    };

    info!(
        model = client.model(),
        strategies = strategies.len(),
        texts = texts.len(),
        "Comparing prompting strategies"
    );

    let report = compare_with(client, strategies, texts, &categories, experiment.compare).await;
    Ok(output::render_comparison(&report))
}

pub async fn run_classify<C>(
    client: &C,
    experiment: &ExperimentConfig,
    args: &ClassifyArgs,
) -> Result<String>
where
    C: CompletionClient + ?Sized,
{
    let categories = categories_for(args.categories.as_deref(), experiment)?;
    let threshold = args.threshold.unwrap_or(experiment.classify.threshold);
    let classifier = GatedClassifier::new(categories).with_threshold(threshold)?;

    match classifier.classify(client, &args.text).await {
        Ok(classification) => Ok(output::render_classification(&classification)),
        Err(e) => {
            warn!(error = %e, "Classification failed");
            Ok(format!("Error: {e}"))
        }
    }
}

pub async fn run_analyze<C>(
    client: &C,
    experiment: &ExperimentConfig,
    args: &AnalyzeArgs,
) -> Result<String>
where
    C: CompletionClient + ?Sized,
{
    let prompt = prompts::content_analysis_prompt(&args.text, &args.question);
    let outcome = client.complete(&prompt, experiment.analyze).await;
    Ok(output::render_outcome(&outcome))
}
