//! The prompt translator, the heart of CineCommand.
//!
//! Each prompt follows a fixed path:
//!
//! 1. **Rules**: if rule matching is on and a rule trigger occurs in the
//!    prompt, its commands are returned without calling the LLM
//! 2. **Complete**: otherwise the prompt is sent with the command system
//!    prompt to the configured provider
//! 3. **Parse**: commands are extracted from the completion text and their
//!    arguments normalized
//!
//! Failures of the LLM call come back as an `error` result, never as `Err`.

pub mod session;
pub mod system_prompt;
pub mod translator;

#[cfg(test)]
mod test_helpers;

pub use session::{EntryKind, SessionEntry, SessionLog, SessionSummary};
pub use system_prompt::SYSTEM_PROMPT;
pub use translator::Translator;
