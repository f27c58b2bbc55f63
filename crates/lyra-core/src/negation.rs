//! Negation detection.
//!
//! A negatable signal is cancelled when a negation cue ("don't", "never",
//! "without", ...) starts within a small window of characters before the
//! signal's match. The check is a pure function of `(text, index, window)`
//! so it can be tested with synthetic offsets.

use regex::{Regex, RegexBuilder};

use lyra_types::{LyraError, Result};

/// Compiled negation cues plus the lookback window.
#[derive(Debug, Clone)]
pub struct NegationDetector {
    cues: Regex,
    window: usize,
}

impl NegationDetector {
    /// Compile `cues` into a single word-bounded alternation.
    pub fn new(cues: &[String], window: usize) -> Result<Self> {
        Ok(Self {
            cues: cue_regex(cues)?,
            window,
        })
    }

    /// Whether the match starting at byte `index` of `text` is negated.
    pub fn is_negated(&self, text: &str, index: usize) -> bool {
        is_negated(&self.cues, text, index, self.window)
    }
}

/// Whether a cue from `cues` starts within `window` characters before byte
/// `index` of `text`.
///
/// Word boundaries are evaluated against the full text, so a window that
/// starts mid-word (`...piano build`) does not see a spurious `no`.
pub fn is_negated(cues: &Regex, text: &str, index: usize, window: usize) -> bool {
    if window == 0 || index == 0 {
        return false;
    }
    let index = floor_char_boundary(text, index.min(text.len()));
    let start = window_start(text, index, window);
    cues.find_iter(&text[..index]).any(|m| m.start() >= start)
}

/// Byte offset `window` characters before `index` (or 0).
pub fn window_start(text: &str, index: usize, window: usize) -> usize {
    if window == 0 {
        return index;
    }
    text[..index]
        .char_indices()
        .rev()
        .nth(window - 1)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Build a case-insensitive alternation of word-bounded cues.
///
/// An empty cue list yields a regex that never matches.
pub fn cue_regex(cues: &[String]) -> Result<Regex> {
    let mut alternatives: Vec<String> = cues
        .iter()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .map(|c| bounded(&c, true, true))
        .collect();
    // Longest first, so "do not" wins over "no" at the same position.
    alternatives.sort_by_key(|alt| std::cmp::Reverse(alt.len()));

    let pattern = if alternatives.is_empty() {
        r"\b\B".to_string()
    } else {
        format!("(?:{})", alternatives.join("|"))
    };

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| LyraError::ConfigInvalid {
            reason: format!("invalid negation cue: {e}"),
        })
}

/// Escape `literal` and add `\b` on the requested sides, but only where the
/// literal begins/ends with a word character (a `\b` next to punctuation
/// would never match where intended).
pub fn bounded(literal: &str, start: bool, end: bool) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut out = String::new();
    if start && literal.chars().next().is_some_and(is_word) {
        out.push_str(r"\b");
    }
    out.push_str(&regex::escape(literal));
    if end && literal.chars().last().is_some_and(is_word) {
        out.push_str(r"\b");
    }
    out
}
