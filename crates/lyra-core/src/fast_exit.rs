//! Fast-exit filter.
//!
//! Cheap, high-precision structural checks that end classification with
//! "no route" before any signal is evaluated. A false route costs more than
//! a missed one, so any sign that the prompt is not a fresh task wins.

use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use lyra_types::config::RouterConfig;
use lyra_types::routing::PromptContext;
use lyra_types::{LyraError, Result};

/// Why a prompt was rejected before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FastExit {
    /// Empty or below the minimum length.
    TooShort,
    /// Already an explicit `/command`.
    SlashCommand,
    /// A version-control command (`git push ...`).
    VcsCommand,
    /// Acknowledgement or closing remark (`ok`, `thanks`, `looks good`).
    Acknowledgement,
    /// A short informational question.
    ShortQuestion,
}

impl FastExit {
    /// Stable snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            FastExit::TooShort => "too_short",
            FastExit::SlashCommand => "slash_command",
            FastExit::VcsCommand => "vcs_command",
            FastExit::Acknowledgement => "acknowledgement",
            FastExit::ShortQuestion => "short_question",
        }
    }
}

impl fmt::Display for FastExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiled fast-exit checks.
#[derive(Debug, Clone)]
pub struct FastExitFilter {
    min_length: usize,
    question_max_length: usize,
    vcs_prefixes: Vec<String>,
    acknowledgement: Option<Regex>,
    question: Option<Regex>,
}

impl FastExitFilter {
    /// Compile the filter from the router config.
    pub fn from_config(config: &RouterConfig) -> Result<Self> {
        Ok(Self {
            min_length: config.min_length,
            question_max_length: config.question_max_length,
            vcs_prefixes: config
                .vcs_prefixes
                .iter()
                .map(|p| p.to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
            acknowledgement: anchored_words(&config.acknowledgements)?,
            question: anchored_words(&config.question_openers)?,
        })
    }

    /// Return the first fast-exit that applies, or `None` to keep going.
    pub fn check(&self, ctx: &PromptContext) -> Option<FastExit> {
        let text = ctx.normalized_text.as_str();

        if text.is_empty() || ctx.length < self.min_length {
            return Some(FastExit::TooShort);
        }
        if text.starts_with('/') {
            return Some(FastExit::SlashCommand);
        }
        if self.vcs_prefixes.iter().any(|p| text.starts_with(p.as_str())) {
            return Some(FastExit::VcsCommand);
        }
        if self.acknowledgement.as_ref().is_some_and(|re| re.is_match(text)) {
            return Some(FastExit::Acknowledgement);
        }
        if ctx.length < self.question_max_length
            && self.question.as_ref().is_some_and(|re| re.is_match(text))
        {
            return Some(FastExit::ShortQuestion);
        }
        None
    }
}

/// `^(?:w1|w2|...)\b`, case-insensitive. Words keep their trailing spaces,
/// so `"is "` only opens a question when a word follows the space.
fn anchored_words(words: &[String]) -> Result<Option<Regex>> {
    let alternatives: Vec<String> = words
        .iter()
        .map(|w| w.to_lowercase())
        .filter(|w| !w.trim().is_empty())
        .map(|w| regex::escape(&w))
        .collect();
    if alternatives.is_empty() {
        return Ok(None);
    }

    let pattern = format!(r"^(?:{})\b", alternatives.join("|"));
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map(Some)
        .map_err(|e| LyraError::ConfigInvalid {
            reason: format!("invalid fast-exit word list: {e}"),
        })
}
