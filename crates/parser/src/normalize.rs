//! Argument normalization: generic coercion of call-style argument text
//! plus per-action defaults.

use cinecommand_core::{ArgValue, Args, Command};
use regex_lite::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Arguments as they arrive from the model or a legacy call line.
#[derive(Debug, Clone, PartialEq)]
pub enum RawArgs {
    /// `key=value, key2='text'` call-style argument text.
    Text(String),
    /// Already-typed arguments from a JSON object.
    Structured(Args),
}

static COLOR_LIST: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\[([\d\.,\s]+)\]").ok());

/// Coerce and complete the arguments of one command.
///
/// Never fails: values that cannot be coerced are kept as provided.
pub fn normalize(action: &str, raw: RawArgs) -> Args {
    let mut args = match raw {
        RawArgs::Text(text) => parse_arg_string(&text),
        RawArgs::Structured(args) => args,
    };

    match action.to_ascii_lowercase().as_str() {
        "addcube" => {
            if !args.contains_key("size") && !args.contains_key("radius") {
                args.insert("size".into(), ArgValue::Int(200));
            }
        }
        "addsphere" => {
            if !args.contains_key("size") && !args.contains_key("radius") {
                args.insert("radius".into(), ArgValue::Int(100));
            }
        }
        "creatematerial" => {
            if let Some(ArgValue::Str(color)) = args.get("color").cloned() {
                if let Some(list) = parse_color(&color) {
                    args.insert("color".into(), list);
                } else {
                    debug!(color = %color, "Leaving unparseable color as text");
                }
            }
            args.entry("name".into())
                .or_insert_with(|| ArgValue::from("NewMaterial"));
            args.entry("color".into()).or_insert_with(|| {
                ArgValue::List(vec![ArgValue::Int(1), ArgValue::Int(1), ArgValue::Int(1)])
            });
        }
        "duplicate" => {
            args.entry("count".into()).or_insert(ArgValue::Int(1));
            args.entry("axis".into())
                .or_insert_with(|| ArgValue::from("X"));
            args.entry("distance".into()).or_insert(ArgValue::Int(100));
        }
        _ => {}
    }

    args
}

/// Parse `key=value` pairs separated by top-level commas.
///
/// Pairs without `=` or with an empty key are dropped.
pub fn parse_arg_string(text: &str) -> Args {
    let mut args = Args::new();
    for pair in split_top_level(text) {
        let Some((key, value)) = pair.split_once('=') else {
            if !pair.trim().is_empty() {
                debug!(pair = %pair.trim(), "Skipping argument without '='");
            }
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        args.insert(key.to_string(), coerce_value(value.trim()));
    }
    args
}

/// Best-effort typing of one argument value.
pub fn coerce_value(text: &str) -> ArgValue {
    let text = text.trim();

    if text.starts_with('\'') || text.starts_with('"') {
        return ArgValue::Str(text.trim_matches(|c| c == '\'' || c == '"').to_string());
    }

    if text.eq_ignore_ascii_case("true") {
        return ArgValue::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return ArgValue::Bool(false);
    }

    if text.contains('.') {
        return text
            .parse::<f64>()
            .map(ArgValue::Float)
            .unwrap_or_else(|_| ArgValue::Str(text.to_string()));
    }

    text.parse::<i64>()
        .map(ArgValue::Int)
        .unwrap_or_else(|_| ArgValue::Str(text.to_string()))
}

/// Parse a call-style line such as `AddCube(size=100, name='Box')` into a
/// normalized command.
pub fn parse_call(line: &str) -> Option<Command> {
    let line = line.trim();
    let open = line.find('(')?;
    let inner = line[open + 1..].strip_suffix(')')?;

    let action = line[..open].trim();
    if action.is_empty() || !action.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }

    let args = normalize(action, RawArgs::Text(inner.to_string()));
    Some(Command::new(action, args))
}

/// `"[1, 0, 0.5]"` to a list of floats.
fn parse_color(text: &str) -> Option<ArgValue> {
    let re = COLOR_LIST.as_ref()?;
    let inner = re.captures(text)?.get(1)?.as_str();

    let values = inner
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok().map(ArgValue::Float))
        .collect::<Option<Vec<_>>>()?;

    if values.is_empty() {
        return None;
    }
    Some(ArgValue::List(values))
}

/// Split on commas that sit outside brackets and quotes.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' => quote = Some(c),
                '[' | '(' | '{' => depth += 1,
                ']' | ')' | '}' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    parts.push(&text[start..idx]);
                    start = idx + 1;
                }
                _ => {}
            },
        }
    }
    parts.push(&text[start..]);
    parts
}
