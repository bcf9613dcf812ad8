//! Strategy comparison
//!
//! Runs each prompting strategy over the same texts, one completion per
//! (strategy, text) pair, and keeps the raw model output for side-by-side
//! reading. Calls are issued sequentially; a failed call is recorded at its
//! position and never stops the run.

use crate::classifier::Categories;
use crate::strategy::Strategy;
use promptlab_core::{CompletionClient, GenerationParams, Result};
use std::time::Instant;
use tracing::{info, warn};

/// Raw completion text, or the failure that replaced it
pub type CompletionOutcome = Result<String>;

/// Outcomes for one strategy, index-aligned with the input texts
#[derive(Debug)]
pub struct StrategyResults {
    pub strategy: Strategy,
    pub outcomes: Vec<CompletionOutcome>,
}

impl StrategyResults {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Strategy → per-text outcomes, in the order the strategies were run
#[derive(Debug, Default)]
pub struct ComparisonReport {
    results: Vec<StrategyResults>,
}

impl ComparisonReport {
    /// Outcomes for `strategy`, if it was part of the run
    pub fn get(&self, strategy: Strategy) -> Option<&[CompletionOutcome]> {
        self.results
            .iter()
            .find(|r| r.strategy == strategy)
            .map(|r| r.outcomes.as_slice())
    }

    /// Outcomes looked up by registry name
    pub fn get_by_name(&self, name: &str) -> Option<&[CompletionOutcome]> {
        let strategy = name.parse::<Strategy>().ok()?;
        self.get(strategy)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StrategyResults> {
        self.results.iter()
    }

    pub fn strategies(&self) -> Vec<Strategy> {
        self.results.iter().map(|r| r.strategy).collect()
    }

    pub fn total_calls(&self) -> usize {
        self.results.iter().map(|r| r.outcomes.len()).sum()
    }

    pub fn total_failures(&self) -> usize {
        self.results.iter().map(StrategyResults::failed).sum()
    }
}

/// Run every registered strategy with the shared comparison settings
pub async fn compare_strategies<C, S>(
    client: &C,
    texts: &[S],
    categories: &Categories,
) -> ComparisonReport
where
    C: CompletionClient + ?Sized,
    S: AsRef<str>,
{
    compare_with(
        client,
        &Strategy::ALL,
        texts,
        categories,
        GenerationParams::COMPARISON,
    )
    .await
}

/// Run a chosen set of strategies with explicit generation settings
pub async fn compare_with<C, S>(
    client: &C,
    strategies: &[Strategy],
    texts: &[S],
    categories: &Categories,
    params: GenerationParams,
) -> ComparisonReport
where
    C: CompletionClient + ?Sized,
    S: AsRef<str>,
{
    let start = Instant::now();
    let mut report = ComparisonReport::default();

    for &strategy in strategies {
        if report.get(strategy).is_some() {
            continue;
        }

        info!(strategy = %strategy, texts = texts.len(), "Running strategy");
        let mut outcomes = Vec::with_capacity(texts.len());

        for (index, text) in texts.iter().enumerate() {
            let prompt = strategy.build_prompt(text.as_ref(), categories);
            let outcome = client.complete(&prompt, params).await;

            if let Err(e) = &outcome {
                warn!(strategy = %strategy, index, error = %e, "Completion failed");
            }
            outcomes.push(outcome);
        }

        report.results.push(StrategyResults { strategy, outcomes });
    }

    info!(
        calls = report.total_calls(),
        failures = report.total_failures(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Comparison finished"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use promptlab_core::Error;
    use std::sync::Mutex;

    /// Echoes the tail of each prompt and remembers the settings it saw
    #[derive(Default)]
    struct RecordingClient {
        seen: Mutex<Vec<GenerationParams>>,
    }

    #[async_trait]
    impl CompletionClient for RecordingClient {
        async fn complete(&self, prompt: &str, params: GenerationParams) -> Result<String> {
            self.seen.lock().unwrap().push(params);
            if prompt.contains("FAIL") {
                return Err(Error::transport("connection reset"));
            }
            Ok(format!("len={}", prompt.len()))
        }

        fn model(&self) -> &str {
            "recording"
        }
    }

    #[tokio::test]
    async fn test_runs_every_strategy_with_comparison_params() {
        let client = RecordingClient::default();
        let report = compare_strategies(&client, &["a", "b"], &Categories::sentiment()).await;

        assert_eq!(report.strategies(), Strategy::ALL);
        assert_eq!(report.total_calls(), 6);
        assert_eq!(report.total_failures(), 0);

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 6);
        assert!(seen.iter().all(|p| *p == GenerationParams::COMPARISON));
    }

    #[tokio::test]
    async fn test_subset_and_duplicates() {
        let client = RecordingClient::default();
        let report = compare_with(
            &client,
            &[Strategy::FewShot, Strategy::FewShot],
            &["only"],
            &Categories::sentiment(),
            GenerationParams::new(64, 0.2),
        )
        .await;

        assert_eq!(report.strategies(), vec![Strategy::FewShot]);
        assert!(report.get(Strategy::Basic).is_none());
        assert_eq!(report.get_by_name("few-shot").unwrap().len(), 1);
        assert_eq!(
            client.seen.lock().unwrap()[0],
            GenerationParams::new(64, 0.2)
        );
    }

    #[tokio::test]
    async fn test_failure_counts() {
        let client = RecordingClient::default();
        let report = compare_strategies(
            &client,
            &["fine", "FAIL here", "fine too"],
            &Categories::sentiment(),
        )
        .await;

        for results in report.iter() {
            assert_eq!(results.succeeded(), 2);
            assert_eq!(results.failed(), 1);
            assert!(results.outcomes[1].as_ref().unwrap_err().is_transport());
        }
        assert_eq!(report.total_failures(), 3);
    }

    #[tokio::test]
    async fn test_empty_texts() {
        let client = RecordingClient::default();
        let texts: Vec<String> = Vec::new();
        let report = compare_strategies(&client, &texts, &Categories::sentiment()).await;

        assert_eq!(report.total_calls(), 0);
        assert_eq!(report.get(Strategy::Basic).unwrap().len(), 0);
    }
}
