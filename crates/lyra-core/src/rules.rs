//! Compiled rule table.
//!
//! [`RuleTable::compile`] turns the declarative [`RouterConfig`] categories
//! into matchers. All validation happens here, once, so the per-prompt
//! stages never fail.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

use lyra_types::config::{CategoryConfig, PatternSpec, RouterConfig, SignalSpec};
use lyra_types::routing::PromptContext;
use lyra_types::{LyraError, Result};

use crate::negation::{NegationDetector, bounded};

/// Where a matcher fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Byte offset of the first match in the normalized text.
    Anchored(usize),
    /// A whole-prompt property with no position (length, term counts).
    Holistic,
}

/// A compiled [`PatternSpec`].
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Literal, phrase or regex, compiled to one case-insensitive regex.
    Pattern(Regex),
    /// Prompt is at least this many characters.
    MinLength(usize),
    /// At least `at_least` of `terms` occur, each at a word start.
    /// Under negation a term whose first occurrence is negated does not count.
    DistinctTerms { terms: Vec<Regex>, at_least: usize },
}

impl Matcher {
    /// Compile a pattern. `category` is only used in error messages.
    pub fn compile(spec: &PatternSpec, category: &str) -> Result<Self> {
        let invalid = |reason: String| LyraError::InvalidPattern {
            category: category.to_string(),
            reason,
        };

        match spec {
            PatternSpec::Literal(text) => {
                if text.is_empty() {
                    return Err(invalid("empty literal".into()));
                }
                Ok(Matcher::Pattern(case_insensitive(&regex::escape(text), category)?))
            }
            PatternSpec::Phrase(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(invalid("empty phrase".into()));
                }
                Ok(Matcher::Pattern(case_insensitive(
                    &bounded(text, true, true),
                    category,
                )?))
            }
            PatternSpec::Regex(pattern) => {
                if pattern.is_empty() {
                    return Err(invalid("empty regex".into()));
                }
                Ok(Matcher::Pattern(case_insensitive(pattern, category)?))
            }
            PatternSpec::MinLength(len) => Ok(Matcher::MinLength(*len)),
            PatternSpec::DistinctTerms { terms, at_least } => {
                let mut seen = HashSet::new();
                let mut compiled = Vec::with_capacity(terms.len());
                for term in terms {
                    let term = term.trim().to_lowercase();
                    if term.is_empty() {
                        return Err(invalid("empty term in distinct_terms".into()));
                    }
                    if seen.insert(term.clone()) {
                        compiled.push(case_insensitive(&bounded(&term, true, false), category)?);
                    }
                }
                if *at_least == 0 || *at_least > compiled.len() {
                    return Err(invalid(format!(
                        "distinct_terms at_least must be between 1 and {}, got {at_least}",
                        compiled.len()
                    )));
                }
                Ok(Matcher::DistinctTerms {
                    terms: compiled,
                    at_least: *at_least,
                })
            }
        }
    }

    /// Evaluate against a prompt.
    ///
    /// `negation` only affects term counting; anchored hits are checked for
    /// negation by the caller.
    pub fn find(&self, ctx: &PromptContext, negation: Option<&NegationDetector>) -> Option<Hit> {
        let text = ctx.normalized_text.as_str();
        match self {
            Matcher::Pattern(re) => re.find(text).map(|m| Hit::Anchored(m.start())),
            Matcher::MinLength(len) => (ctx.length >= *len).then_some(Hit::Holistic),
            Matcher::DistinctTerms { terms, at_least } => {
                let present = terms
                    .iter()
                    .filter_map(|re| re.find(text))
                    .filter(|m| negation.is_none_or(|n| !n.is_negated(text, m.start())))
                    .count();
                (present >= *at_least).then_some(Hit::Holistic)
            }
        }
    }

    /// Whether the matcher fires anywhere, ignoring negation.
    pub fn is_present(&self, ctx: &PromptContext) -> bool {
        self.find(ctx, None).is_some()
    }
}

fn case_insensitive(pattern: &str, category: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| LyraError::InvalidPattern {
            category: category.to_string(),
            reason: e.to_string(),
        })
}

/// Short human-readable form of a pattern, used in diagnostics.
pub fn describe(spec: &PatternSpec) -> String {
    match spec {
        PatternSpec::Literal(text) => format!("literal \"{text}\""),
        PatternSpec::Phrase(text) => format!("phrase \"{text}\""),
        PatternSpec::Regex(pattern) => format!("regex /{pattern}/"),
        PatternSpec::MinLength(len) => format!("length >= {len}"),
        PatternSpec::DistinctTerms { terms, at_least } => {
            format!("{at_least} of [{}]", terms.join(", "))
        }
    }
}

/// One compiled signal rule.
#[derive(Debug, Clone)]
pub struct SignalRule {
    pub matcher: Matcher,
    pub weight: u32,
    pub negatable: bool,
    pub min_length: Option<usize>,
    pub requires: Vec<Matcher>,
    /// Diagnostic label, e.g. `regex /\bdebug\b/ +requires`.
    pub label: String,
}

impl SignalRule {
    fn compile(spec: &SignalSpec, category: &str) -> Result<Self> {
        if spec.weight == 0 {
            return Err(LyraError::InvalidPattern {
                category: category.to_string(),
                reason: format!("signal {} has zero weight", describe(&spec.pattern)),
            });
        }

        let requires = spec
            .requires
            .iter()
            .map(|r| Matcher::compile(r, category))
            .collect::<Result<Vec<_>>>()?;

        let mut label = describe(&spec.pattern);
        if !spec.requires.is_empty() {
            let companions: Vec<String> = spec.requires.iter().map(describe).collect();
            label.push_str(&format!(" + {}", companions.join(" + ")));
        }

        Ok(Self {
            matcher: Matcher::compile(&spec.pattern, category)?,
            weight: spec.weight,
            negatable: spec.negatable,
            min_length: spec.min_length,
            requires,
            label,
        })
    }

    /// Negatable phrase rule for a sample prompt of the category.
    fn example(example: &str, weight: u32, category: &str) -> Result<Self> {
        let text = example.trim().to_lowercase();
        Ok(Self {
            matcher: Matcher::compile(&PatternSpec::Phrase(text.clone()), category)?,
            weight,
            negatable: true,
            min_length: None,
            requires: Vec::new(),
            label: format!("example \"{text}\""),
        })
    }
}

/// A compiled routing category.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: String,
    pub route: String,
    pub description: String,
    pub examples: Vec<String>,
    pub rules: Vec<SignalRule>,
}

impl Category {
    fn compile(config: &CategoryConfig, example_weight: u32) -> Result<Self> {
        let id = config.resolved_id();
        let id = id.as_str();
        if id.is_empty() {
            return Err(LyraError::ConfigInvalid {
                reason: "category with empty id".into(),
            });
        }
        if config.route.trim().is_empty() {
            return Err(LyraError::ConfigInvalid {
                reason: format!("category '{id}' has an empty route"),
            });
        }

        let signals = config.resolved_signals();
        if config.signals.is_empty() && !signals.is_empty() {
            tracing::debug!(category = id, "no signals configured, using built-in signals");
        }
        let mut rules = signals
            .iter()
            .map(|s| SignalRule::compile(s, id))
            .collect::<Result<Vec<_>>>()?;

        let examples: Vec<String> = config
            .examples
            .iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        if example_weight > 0 {
            for example in &examples {
                rules.push(SignalRule::example(example, example_weight, id)?);
            }
        }

        if rules.is_empty() {
            tracing::warn!(category = id, "category has no signals and can never win");
        }

        Ok(Self {
            id: id.to_string(),
            route: config.route.trim().to_string(),
            description: config.description.clone(),
            examples,
            rules,
        })
    }
}

/// All categories, in configuration order.
#[derive(Debug, Clone)]
pub struct RuleTable {
    categories: Vec<Category>,
}

impl RuleTable {
    /// Compile and validate the categories of `config`.
    pub fn compile(config: &RouterConfig) -> Result<Self> {
        if config.categories.is_empty() {
            return Err(LyraError::ConfigInvalid {
                reason: "no categories configured".into(),
            });
        }

        let mut seen = HashSet::new();
        let mut categories = Vec::with_capacity(config.categories.len());
        for cat in &config.categories {
            let compiled = Category::compile(cat, config.example_weight)?;
            if !seen.insert(compiled.id.clone()) {
                return Err(LyraError::ConfigInvalid {
                    reason: format!("duplicate category id '{}'", compiled.id),
                });
            }
            categories.push(compiled);
        }

        tracing::debug!(categories = categories.len(), "rule table compiled");
        Ok(Self { categories })
    }

    /// Categories in configuration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Route surface form for a category id.
    pub fn route_for(&self, id: &str) -> Option<&str> {
        self.category(id).map(|c| c.route.as_str())
    }

    /// Category ids in configuration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.id.as_str())
    }
}
