//! # CineCommand Core
//!
//! Domain types, traits, and error definitions shared by every CineCommand
//! crate. Nothing in here talks to the network or the filesystem.
//!
//! ## Design Philosophy
//!
//! The seams of the pipeline are defined here and implemented elsewhere:
//! - [`Provider`] is implemented by `cinecommand-providers` (and by mocks in tests)
//! - [`Command`] and [`ParseResult`] are produced by `cinecommand-parser`,
//!   `cinecommand-rules` and `cinecommand-agent`, and consumed by the scene executor

pub mod command;
pub mod error;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use command::{ArgValue, Args, Command, ParseResult, Source, RULE_COMPLETION};
pub use error::{Error, ProviderError, RuleError};
pub use provider::{CompletionRequest, ModelInfo, Provider};
