//! Per-category score aggregation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::extractor::Extraction;
use crate::rules::RuleTable;

/// Summed signal weights per category. Every category is present, so a
/// category with no evidence reads as 0 rather than missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScoreBoard {
    scores: BTreeMap<String, u32>,
}

impl ScoreBoard {
    /// All categories of `table` at zero.
    pub fn new(table: &RuleTable) -> Self {
        Self {
            scores: table.ids().map(|id| (id.to_string(), 0)).collect(),
        }
    }

    /// Sum the matched evidence of `extraction`.
    pub fn tally(table: &RuleTable, extraction: &Extraction) -> Self {
        let mut board = Self::new(table);
        for evidence in &extraction.matched {
            board.add(&evidence.category, evidence.weight);
        }
        board
    }

    /// Add `weight` to `category`, inserting it if unknown.
    pub fn add(&mut self, category: &str, weight: u32) {
        let score = self.scores.entry(category.to_string()).or_insert(0);
        *score = score.saturating_add(weight);
    }

    /// Score of `category`, 0 when unknown.
    pub fn score(&self, category: &str) -> u32 {
        self.scores.get(category).copied().unwrap_or(0)
    }

    /// `(category, score)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.scores.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Highest score and every category holding it, in id order.
    pub fn leaders(&self) -> (u32, Vec<&str>) {
        let max = self.scores.values().copied().max().unwrap_or(0);
        let ids = self
            .scores
            .iter()
            .filter(|(_, v)| **v == max)
            .map(|(k, _)| k.as_str())
            .collect();
        (max, ids)
    }
}
