//! Decision policy.
//!
//! Picks a unique winner from the score board. Ambiguity is resolved toward
//! silence: a tie for first place, a zero best score, or a best score below
//! the confidence floor all produce "no route". The managed-project redirect
//! is applied last and only to an already-confident winner.

use lyra_types::config::{RedirectConfig, RouterConfig};
use lyra_types::routing::Decision;

use crate::scorer::ScoreBoard;

/// Thresholds and overrides for turning scores into a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionPolicy {
    pub confidence_floor: u32,
    pub managed_redirect: Option<RedirectConfig>,
}

impl DecisionPolicy {
    pub fn from_config(config: &RouterConfig) -> Self {
        Self {
            confidence_floor: config.confidence_floor,
            managed_redirect: config.managed_redirect.clone(),
        }
    }

    /// Decide on a route.
    pub fn decide(&self, board: &ScoreBoard, has_managed_project: bool) -> Decision {
        let (max, leaders) = board.leaders();

        if max == 0 {
            return Decision::none(0);
        }
        let winner = match leaders.as_slice() {
            [single] => *single,
            _ => {
                tracing::debug!(score = max, tied = ?leaders, "tie for first place");
                return Decision::none(max);
            }
        };
        if max < self.confidence_floor {
            tracing::debug!(
                score = max,
                floor = self.confidence_floor,
                winner,
                "best score below confidence floor"
            );
            return Decision::none(max);
        }

        match &self.managed_redirect {
            Some(redirect) if has_managed_project && redirect.from == winner => {
                tracing::debug!(from = winner, to = %redirect.to, "managed project redirect");
                Decision {
                    category: Some(redirect.to.clone()),
                    score: max,
                    redirected_from: Some(winner.to_string()),
                }
            }
            _ => Decision::route(winner, max),
        }
    }
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self::from_config(&RouterConfig::default())
    }
}
