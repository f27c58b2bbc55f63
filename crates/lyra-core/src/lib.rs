//! # lyra-core
//!
//! Lexical intent classification for the lyra prompt router.
//!
//! A prompt flows through six stages, each a pure function over immutable
//! inputs:
//!
//! 1. **[`normalize`]** -- pull the prompt out of the hook payload
//! 2. **[`fast_exit`]** -- structural checks that stop before any scoring
//! 3. **[`extractor`]** -- evaluate every category's signal rules
//!    (with [`negation`] suppression)
//! 4. **[`scorer`]** -- sum matched weights into a [`ScoreBoard`]
//! 5. **[`policy`]** -- pick a unique winner above the confidence floor
//! 6. **[`format`]** -- render the single suggestion line, or nothing
//!
//! [`LexicalClassifier`] composes the stages over a compiled [`RuleTable`].
//! The engine performs no I/O and keeps no state between calls.

pub mod classifier;
pub mod extractor;
pub mod fast_exit;
pub mod format;
pub mod negation;
pub mod normalize;
pub mod policy;
pub mod rules;
pub mod scorer;

pub use classifier::{Explanation, IntentClassifier, LexicalClassifier};
pub use rules::RuleTable;
pub use scorer::ScoreBoard;
