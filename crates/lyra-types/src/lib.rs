//! # lyra-types
//!
//! Core type definitions for the lyra prompt router.
//!
//! Every other lyra crate depends on this one. It contains:
//!
//! - **[`error`]** -- [`LyraError`] and the crate-wide [`Result`] alias
//! - **[`config`]** -- Router configuration schema and the built-in rule table
//! - **[`routing`]** -- Prompt context and routing decision types

pub mod config;
pub mod error;
pub mod routing;

pub use error::{LyraError, Result};
