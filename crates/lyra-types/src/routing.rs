//! Prompt context and routing decision types.
//!
//! These are the values that flow between the pipeline stages in
//! `lyra-core`. All of them are built fresh for each invocation and never
//! outlive it.

use serde::{Deserialize, Serialize};

/// Immutable view of one user prompt plus the injected project flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    /// Trimmed prompt as received.
    pub raw_text: String,

    /// Trimmed, lowercased prompt. All matching runs against this.
    pub normalized_text: String,

    /// Length of `normalized_text` in characters.
    pub length: usize,

    /// Whether the working directory already holds a managed project.
    pub has_managed_project: bool,
}

impl PromptContext {
    /// Build a context from raw prompt text.
    pub fn new(raw: &str, has_managed_project: bool) -> Self {
        let raw_text = raw.trim().to_string();
        let normalized_text = raw_text.to_lowercase();
        let length = normalized_text.chars().count();
        Self {
            raw_text,
            normalized_text,
            length,
            has_managed_project,
        }
    }
}

/// Terminal output of the pipeline.
///
/// `category == None` is the "do not route" decision. `score` is the best
/// score observed, kept for diagnostics even when nothing was routed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Destination category id, or `None` for no route.
    pub category: Option<String>,

    /// Winning (or best) score.
    pub score: u32,

    /// Original winner when the managed-project redirect applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirected_from: Option<String>,
}

impl Decision {
    /// A "no route" decision.
    pub fn none(score: u32) -> Self {
        Self {
            category: None,
            score,
            redirected_from: None,
        }
    }

    /// Route to `category`.
    pub fn route(category: impl Into<String>, score: u32) -> Self {
        Self {
            category: Some(category.into()),
            score,
            redirected_from: None,
        }
    }

    /// Whether this is the "no route" decision.
    pub fn is_none(&self) -> bool {
        self.category.is_none()
    }

    /// Category id, or `"NONE"`.
    pub fn label(&self) -> &str {
        self.category.as_deref().unwrap_or("NONE")
    }
}
