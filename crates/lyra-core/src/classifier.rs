//! Lexical intent classifier.
//!
//! [`LexicalClassifier`] owns the compiled stages and runs them in order:
//! fast-exit, extraction, scoring, decision. Formatting is kept separate so
//! callers can inspect a [`Decision`] before anything is written.

use std::io::{self, Write};

use serde::Serialize;

use lyra_types::config::RouterConfig;
use lyra_types::routing::{Decision, PromptContext};
use lyra_types::{LyraError, Result};

use crate::extractor::{self, Evidence};
use crate::fast_exit::{FastExit, FastExitFilter};
use crate::format::OutputFormatter;
use crate::negation::NegationDetector;
use crate::normalize::normalize_payload;
use crate::policy::DecisionPolicy;
use crate::rules::RuleTable;
use crate::scorer::ScoreBoard;

/// Classify a prompt into a routing decision.
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, ctx: &PromptContext) -> Decision;
}

/// Full trace of one classification, for `lyra explain`.
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub prompt: String,
    pub length: usize,
    pub has_managed_project: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast_exit: Option<FastExit>,
    pub scores: ScoreBoard,
    pub matched: Vec<Evidence>,
    pub negated: Vec<Evidence>,
    pub decision: Decision,
    /// The exact line the hook would print, without the newline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Rule-table driven classifier.
#[derive(Debug, Clone)]
pub struct LexicalClassifier {
    table: RuleTable,
    fast_exit: FastExitFilter,
    negation: NegationDetector,
    policy: DecisionPolicy,
    formatter: OutputFormatter,
}

impl LexicalClassifier {
    /// Compile a classifier. Fails on any invalid rule or a redirect that
    /// names an unknown category.
    pub fn from_config(config: &RouterConfig) -> Result<Self> {
        let table = RuleTable::compile(config)?;

        if let Some(ref redirect) = config.managed_redirect {
            for id in [&redirect.from, &redirect.to] {
                if table.category(id).is_none() {
                    return Err(LyraError::ConfigInvalid {
                        reason: format!("managed redirect names unknown category '{id}'"),
                    });
                }
            }
        }

        Ok(Self {
            fast_exit: FastExitFilter::from_config(config)?,
            negation: NegationDetector::new(&config.negation_cues, config.negation_window)?,
            policy: DecisionPolicy::from_config(config),
            formatter: OutputFormatter::new(config.prefix.trim()),
            table,
        })
    }

    /// Classifier over the built-in rules.
    pub fn with_defaults() -> Result<Self> {
        Self::from_config(&RouterConfig::default())
    }

    /// Use `loaded` when it is present and valid, the built-in rules
    /// otherwise. A broken config file must never stop the hook.
    pub fn load_or_default(loaded: Result<RouterConfig>) -> Result<Self> {
        match loaded.and_then(|cfg| Self::from_config(&cfg)) {
            Ok(classifier) => Ok(classifier),
            Err(e) => {
                tracing::warn!(error = %e, "config unusable, falling back to built-in rules");
                Self::with_defaults()
            }
        }
    }

    /// Run every stage and keep the intermediate results.
    pub fn explain(&self, ctx: &PromptContext) -> Explanation {
        let mut explanation = Explanation {
            prompt: ctx.raw_text.clone(),
            length: ctx.length,
            has_managed_project: ctx.has_managed_project,
            fast_exit: None,
            scores: ScoreBoard::new(&self.table),
            matched: Vec::new(),
            negated: Vec::new(),
            decision: Decision::none(0),
            output: None,
        };

        if let Some(exit) = self.fast_exit.check(ctx) {
            tracing::debug!(reason = %exit, "fast exit");
            explanation.fast_exit = Some(exit);
            return explanation;
        }

        let extraction = extractor::extract(&self.table, ctx, &self.negation);
        let scores = ScoreBoard::tally(&self.table, &extraction);
        let decision = self.policy.decide(&scores, ctx.has_managed_project);
        tracing::debug!(
            decision = decision.label(),
            score = decision.score,
            matched = extraction.matched.len(),
            negated = extraction.negated.len(),
            "classified prompt"
        );

        explanation.output = self.formatter.render(&decision, &self.table);
        explanation.scores = scores;
        explanation.matched = extraction.matched;
        explanation.negated = extraction.negated;
        explanation.decision = decision;
        explanation
    }

    /// Suggestion line for `ctx`, or `None`.
    pub fn route(&self, ctx: &PromptContext) -> Option<String> {
        let decision = self.classify(ctx);
        self.formatter.render(&decision, &self.table)
    }

    /// Suggestion line for a raw hook payload, or `None`.
    pub fn route_payload(&self, payload: &str, has_managed_project: bool) -> Option<String> {
        normalize_payload(payload, has_managed_project).and_then(|ctx| self.route(&ctx))
    }

    /// Classify a raw payload and write the hook output to `out`.
    pub fn write_route<W: Write>(
        &self,
        payload: &str,
        has_managed_project: bool,
        out: &mut W,
    ) -> io::Result<()> {
        let decision = match normalize_payload(payload, has_managed_project) {
            Some(ctx) => self.classify(&ctx),
            None => Decision::none(0),
        };
        self.formatter.write(&decision, &self.table, out)
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }
}

impl IntentClassifier for LexicalClassifier {
    fn classify(&self, ctx: &PromptContext) -> Decision {
        if self.fast_exit.check(ctx).is_some() {
            return Decision::none(0);
        }
        let extraction = extractor::extract(&self.table, ctx, &self.negation);
        let scores = ScoreBoard::tally(&self.table, &extraction);
        self.policy.decide(&scores, ctx.has_managed_project)
    }
}
