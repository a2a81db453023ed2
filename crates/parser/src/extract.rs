//! Command extraction from free-form completion text.
//!
//! Strategies run in [`CASCADE`] order and the first one that yields
//! anything wins. When all of them come up empty, [`from_keywords`] scans
//! the text for plain-language requests ("add a red cube").

use crate::normalize::parse_arg_string;
use cinecommand_core::{ArgValue, Args, Command};
use regex_lite::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, error, info, warn};

/// One extraction strategy. Pure; never panics.
pub type Strategy = fn(&str) -> Vec<Command>;

/// Structured strategies in precedence order.
pub const CASCADE: &[(&str, Strategy)] = &[
    ("blank_line_blocks", from_blank_line_blocks),
    ("fenced_blocks", from_fenced_blocks),
    ("brace_scan", from_brace_scan),
];

static FENCED: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?[ \t]*\n?(.*?)```").ok());

static FLAT_OBJECT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"\{[^{}]*"action"[^{}]*\}"#).ok());

struct Keyword {
    pattern: Option<Regex>,
    action: &'static str,
    defaults: fn() -> Args,
}

fn keyword(noun: &str, action: &'static str, defaults: fn() -> Args) -> Keyword {
    // verb, then within the same sentence "a"/"an", an optional word, the noun
    let pattern = format!(r"(?i)\b(?:create|add|make)\b[^.!?\n]*?\ban?\s+(?:\w+\s+)?{noun}\b");
    Keyword {
        pattern: Regex::new(&pattern).ok(),
        action,
        defaults,
    }
}

static KEYWORDS: LazyLock<Vec<Keyword>> = LazyLock::new(|| {
    vec![
        keyword("cube", "AddCube", || {
            Args::from([
                ("size".to_string(), ArgValue::Int(100)),
                ("name".to_string(), ArgValue::from("Cube")),
            ])
        }),
        keyword("sphere", "AddSphere", || {
            Args::from([("diameter".to_string(), ArgValue::Int(100))])
        }),
        keyword("camera", "AddCamera", Args::new),
        keyword("light", "AddLight", || {
            Args::from([("type".to_string(), ArgValue::from("point"))])
        }),
        keyword("material", "CreateMaterial", || {
            Args::from([("name".to_string(), ArgValue::from("NewMaterial"))])
        }),
    ]
});

/// Extract every command from a completion.
///
/// Returns an empty list when nothing recognisable is found.
pub fn extract_commands(text: &str) -> Vec<Command> {
    let text = text.trim();
    if text.is_empty() {
        error!("Empty completion, nothing to extract");
        return Vec::new();
    }

    let text = text.replace("\r\n", "\n");

    for (name, strategy) in CASCADE {
        let commands = strategy(&text);
        if !commands.is_empty() {
            info!(strategy = name, count = commands.len(), "Extracted commands");
            return commands;
        }
        debug!(strategy = name, "Strategy found nothing");
    }

    let commands = from_keywords(&text);
    if commands.is_empty() {
        warn!(chars = text.len(), "No commands found in completion");
    } else {
        info!(strategy = "keywords", count = commands.len(), "Extracted commands");
    }
    commands
}

/// JSON objects separated by blank lines.
///
/// A block may hold several whole values back to back (one object per
/// line). A block with anything that does not parse contributes nothing.
pub fn from_blank_line_blocks(text: &str) -> Vec<Command> {
    let mut commands = Vec::new();
    for block in text.split("\n\n") {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }
        let values: Result<Vec<Value>, _> = serde_json::Deserializer::from_str(block)
            .into_iter::<Value>()
            .collect();
        match values {
            Ok(values) => commands.extend(values.iter().filter_map(command_from_value)),
            Err(e) => debug!(error = %e, "Block is not JSON"),
        }
    }
    commands
}

/// Contents of triple-backtick fences, optionally tagged `json`.
pub fn from_fenced_blocks(text: &str) -> Vec<Command> {
    let Some(re) = FENCED.as_ref() else {
        return Vec::new();
    };

    let mut commands = Vec::new();
    for caps in re.captures_iter(text) {
        let Some(body) = caps.get(1) else { continue };
        let body = body.as_str().trim();

        if body.starts_with('[') {
            match serde_json::from_str::<Vec<Value>>(body) {
                Ok(items) => commands.extend(items.iter().filter_map(command_from_value)),
                Err(e) => debug!(error = %e, "Fenced array is not JSON"),
            }
        } else if body.starts_with('{') {
            match serde_json::from_str::<Value>(body) {
                Ok(value) => commands.extend(command_from_value(&value)),
                Err(e) => debug!(error = %e, "Fenced object is not JSON"),
            }
        }
    }
    commands
}

/// Flat `{...}` objects mentioning `"action"` anywhere in the text.
///
/// Only objects without nested braces are seen.
pub fn from_brace_scan(text: &str) -> Vec<Command> {
    let Some(re) = FLAT_OBJECT.as_ref() else {
        return Vec::new();
    };

    re.find_iter(text)
        .filter_map(|m| match serde_json::from_str::<Value>(m.as_str()) {
            Ok(value) => command_from_value(&value),
            Err(e) => {
                debug!(error = %e, "Brace match is not JSON");
                None
            }
        })
        .collect()
}

/// Plain-language requests such as "make a blue sphere".
///
/// Each table entry contributes at most one command, in table order.
pub fn from_keywords(text: &str) -> Vec<Command> {
    KEYWORDS
        .iter()
        .filter(|k| k.pattern.as_ref().is_some_and(|re| re.is_match(text)))
        .map(|k| Command::new(k.action, (k.defaults)()))
        .collect()
}

/// A command from a JSON object with a string `action`.
fn command_from_value(value: &Value) -> Option<Command> {
    let obj = value.as_object()?;
    let action = match obj.get("action")? {
        Value::String(s) => s.clone(),
        other => {
            debug!(action = %other, "Skipping object with non-string action");
            return None;
        }
    };

    let args = match obj.get("args") {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(k, v)| (k.clone(), ArgValue::from(v.clone())))
            .collect(),
        Some(Value::String(s)) => parse_arg_string(s),
        _ => Args::new(),
    };

    Some(Command::new(action, args))
}
