use clap::{Args, Parser, Subcommand};
use promptlab_classifiers::Strategy;

#[derive(Parser, Debug)]
#[command(name = "promptlab")]
#[command(
    author,
    version,
    about = "Compare LLM text-classification prompting strategies"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path (YAML, optional)
    #[arg(short, long, global = true, default_value = "promptlab.yaml")]
    pub config: String,

    /// Model identifier
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// OpenAI-compatible API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Command to run; `compare` with defaults when none is given
    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Compare(CompareArgs::default()))
    }

    pub fn overrides(&self) -> crate::config::Overrides {
        crate::config::Overrides {
            model: self.model.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run every prompting strategy over the texts and print raw responses
    Compare(CompareArgs),

    /// Classify one text with the confidence-gated classifier
    Classify(ClassifyArgs),

    /// Ask a free-form content analysis question about a text
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct CompareArgs {
    /// Text to classify (repeatable; replaces the sample texts)
    #[arg(short, long = "text")]
    pub texts: Vec<String>,

    /// Comma-separated categories
    #[arg(long)]
    pub categories: Option<String>,

    /// Strategy to run (repeatable: basic, structured, few_shot)
    #[arg(short, long = "strategy", value_parser = parse_strategy)]
    pub strategies: Vec<Strategy>,
}

#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    /// Text to classify
    #[arg(short, long)]
    pub text: String,

    /// Minimum accepted confidence (0-1)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Comma-separated categories
    #[arg(long)]
    pub categories: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Text to analyze
    #[arg(short, long)]
    pub text: String,

    /// Question guiding the analysis
    #[arg(short, long)]
    pub question: String,
}

fn parse_strategy(s: &str) -> Result<Strategy, String> {
    s.parse().map_err(|e: promptlab_core::Error| e.to_string())
}
