//! Signal extraction.
//!
//! Every rule of every category is evaluated independently against the
//! prompt. A rule fires when its length gate passes, its anchor matches and
//! all of its companions are present. A negatable anchored rule that fires
//! is moved to the `negated` list when a negation cue precedes the anchor.
//! A negatable term-count rule only counts terms that are not negated.

use serde::Serialize;

use lyra_types::routing::PromptContext;

use crate::negation::NegationDetector;
use crate::rules::{Hit, RuleTable, SignalRule};

/// A rule that fired (or would have, before negation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evidence {
    pub category: String,
    pub signal: String,
    pub weight: u32,
    /// Byte offset of the anchor, when the rule has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

/// Outcome of evaluating one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    Absent,
    Matched(Hit),
    Negated(usize),
}

/// All evidence for one prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub matched: Vec<Evidence>,
    pub negated: Vec<Evidence>,
}

/// Evaluate a single rule.
pub fn evaluate(rule: &SignalRule, ctx: &PromptContext, negation: &NegationDetector) -> RuleOutcome {
    if rule.min_length.is_some_and(|min| ctx.length < min) {
        return RuleOutcome::Absent;
    }
    let Some(hit) = rule.matcher.find(ctx, rule.negatable.then_some(negation)) else {
        return RuleOutcome::Absent;
    };
    if !rule.requires.iter().all(|m| m.is_present(ctx)) {
        return RuleOutcome::Absent;
    }

    match hit {
        Hit::Anchored(index)
            if rule.negatable && negation.is_negated(&ctx.normalized_text, index) =>
        {
            RuleOutcome::Negated(index)
        }
        _ => RuleOutcome::Matched(hit),
    }
}

/// Evaluate every rule in `table`.
pub fn extract(table: &RuleTable, ctx: &PromptContext, negation: &NegationDetector) -> Extraction {
    let mut extraction = Extraction::default();

    for category in table.categories() {
        for rule in &category.rules {
            let evidence = |offset| Evidence {
                category: category.id.clone(),
                signal: rule.label.clone(),
                weight: rule.weight,
                offset,
            };
            match evaluate(rule, ctx, negation) {
                RuleOutcome::Absent => {}
                RuleOutcome::Matched(Hit::Anchored(i)) => extraction.matched.push(evidence(Some(i))),
                RuleOutcome::Matched(Hit::Holistic) => extraction.matched.push(evidence(None)),
                RuleOutcome::Negated(i) => {
                    tracing::debug!(category = %category.id, signal = %rule.label, "signal negated");
                    extraction.negated.push(evidence(Some(i)));
                }
            }
        }
    }

    extraction
}
