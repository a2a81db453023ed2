//! Turning LLM output into scene commands.
//!
//! - [`envelope`] pulls the completion text out of the API response body
//! - [`extract`] finds command objects in that text
//! - [`normalize`] types and completes command arguments
//!
//! Everything here is pure and total: malformed input produces fewer
//! commands, never an error.

pub mod envelope;
pub mod extract;
pub mod normalize;

pub use envelope::extract_text;
pub use extract::{
    CASCADE, Strategy, extract_commands, from_blank_line_blocks, from_brace_scan,
    from_fenced_blocks, from_keywords,
};
pub use normalize::{RawArgs, coerce_value, normalize, parse_arg_string, parse_call};

use cinecommand_core::Command;

/// Extract and normalize every command in a completion.
pub fn parse_completion(text: &str) -> Vec<Command> {
    extract_commands(text)
        .into_iter()
        .map(|cmd| {
            let args = normalize(&cmd.action, RawArgs::Structured(cmd.args));
            Command::new(cmd.action, args)
        })
        .collect()
}
