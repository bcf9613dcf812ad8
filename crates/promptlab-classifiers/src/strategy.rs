//! Registry of prompting strategies

use crate::classifier::Categories;
use crate::prompts;
use promptlab_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named prompt-construction approach
///
/// Declaration order is the registry order used by comparisons and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Minimal instruction + response format
    Basic,
    /// Formal instruction, same response format
    Structured,
    /// Three worked examples before the instruction
    FewShot,
}

impl Strategy {
    /// Every registered strategy, in registry order
    pub const ALL: [Strategy; 3] = [Strategy::Basic, Strategy::Structured, Strategy::FewShot];

    /// Registry name of the strategy
    pub fn name(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Structured => "structured",
            Self::FewShot => "few_shot",
        }
    }

    /// Build this strategy's prompt for `text`
    pub fn build_prompt(&self, text: &str, categories: &Categories) -> String {
        match self {
            Self::Basic => prompts::basic_prompt(text, categories),
            Self::Structured => prompts::structured_prompt(text, categories),
            Self::FewShot => prompts::few_shot_prompt(text, categories),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "basic" => Ok(Self::Basic),
            "structured" => Ok(Self::Structured),
            "few_shot" | "fewshot" => Ok(Self::FewShot),
            other => Err(Error::config(format!(
                "unknown strategy '{other}' (expected basic, structured or few_shot)"
            ))),
        }
    }
}
