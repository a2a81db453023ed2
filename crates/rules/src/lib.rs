//! Prompt rules: static substring triggers mapped to fixed command lists.
//!
//! A rule answers a prompt without calling the LLM. Rules live in a text
//! file with one JSON object per line:
//!
//! ```text
//! # comment
//! {"prompt_contains": "red cube", "commands": [{"action": "AddCube", "args": {"size": 100}}]}
//! ```

mod model;
mod store;

pub use model::{Rule, RuleSet};
pub use store::{LoadOutcome, RuleBook, RuleStore};
