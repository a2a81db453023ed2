//! Command and result envelope types.
//!
//! These are the value objects that flow through the whole pipeline:
//! prompt → rule match or LLM completion → extracted commands → normalized
//! commands → scene executor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Completion text reported when a rule answered the prompt.
pub const RULE_COMPLETION: &str = "Executing predefined rule";

/// Argument bag of a command, keyed by argument name.
pub type Args = BTreeMap<String, ArgValue>;

/// A single argument value.
///
/// Serializes as plain JSON (`200`, `"X"`, `[1.0, 0.0, 0.0]`), so a command
/// list round-trips through the executor's JSON contract unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ArgValue>),
    Map(Args),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgValue::Int(n) => Some(*n as f64),
            ArgValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ArgValue]> {
        match self {
            ArgValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for ArgValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ArgValue::Null,
            serde_json::Value::Bool(b) => ArgValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => ArgValue::Int(i),
                None => ArgValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => ArgValue::Str(s),
            serde_json::Value::Array(items) => {
                ArgValue::List(items.into_iter().map(ArgValue::from).collect())
            }
            serde_json::Value::Object(map) => ArgValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, ArgValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Str(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Str(s)
    }
}

impl From<i64> for ArgValue {
    fn from(n: i64) -> Self {
        ArgValue::Int(n)
    }
}

impl From<f64> for ArgValue {
    fn from(f: f64) -> Self {
        ArgValue::Float(f)
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Bool(b)
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Null => write!(f, "null"),
            ArgValue::Bool(b) => write!(f, "{b}"),
            ArgValue::Int(n) => write!(f, "{n}"),
            // Debug keeps the trailing ".0" so the value stays a float when re-parsed
            ArgValue::Float(x) => write!(f, "{x:?}"),
            ArgValue::Str(s) => write!(f, "'{s}'"),
            ArgValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            ArgValue::Map(map) => {
                let json = serde_json::to_string(map).map_err(|_| fmt::Error)?;
                write!(f, "{json}")
            }
        }
    }
}

/// A structured scene-editing instruction.
///
/// `action` names an entry in the executor's registry; the core never checks
/// it against a vocabulary, so unknown actions pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub action: String,

    #[serde(default)]
    pub args: Args,
}

impl Command {
    pub fn new(action: impl Into<String>, args: Args) -> Self {
        Self {
            action: action.into(),
            args,
        }
    }

    /// A command with no arguments.
    pub fn bare(action: impl Into<String>) -> Self {
        Self::new(action, Args::new())
    }

    /// Builder-style argument setter.
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }
}

/// Renders the call style used in logs: `AddCube(name='Box', size=100)`.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.action)?;
        for (i, (key, value)) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        write!(f, ")")
    }
}

/// Where the commands of a [`ParseResult`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// A local rule matched the prompt.
    Rule,
    /// The LLM answered and its completion was parsed.
    Ai,
    /// The LLM call failed.
    Error,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Rule => write!(f, "rule"),
            Source::Ai => write!(f, "ai"),
            Source::Error => write!(f, "error"),
        }
    }
}

/// The uniform result of translating one prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub source: Source,

    /// Human-readable text: the LLM completion, a fixed note for rule hits,
    /// or `"Error: ..."`.
    #[serde(default)]
    pub completion: String,

    #[serde(default)]
    pub commands: Vec<Command>,
}

impl ParseResult {
    pub fn rule(commands: Vec<Command>) -> Self {
        Self {
            source: Source::Rule,
            completion: RULE_COMPLETION.into(),
            commands,
        }
    }

    pub fn ai(completion: impl Into<String>, commands: Vec<Command>) -> Self {
        Self {
            source: Source::Ai,
            completion: completion.into(),
            commands,
        }
    }

    pub fn error(message: impl fmt::Display) -> Self {
        Self {
            source: Source::Error,
            completion: format!("Error: {message}"),
            commands: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.source == Source::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn command_args_default_to_empty() {
        let cmd: Command = serde_json::from_str(r#"{"action": "FrameAll"}"#).unwrap();
        assert_eq!(cmd.action, "FrameAll");
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn arg_values_deserialize_to_matching_variants() {
        let cmd: Command = serde_json::from_value(json!({
            "action": "AddCube",
            "args": {
                "size": 100,
                "scale": 1.5,
                "name": "Box",
                "visible": true,
                "position": [0, 10, 0],
                "meta": {"tag": "hero"},
                "parent": null
            }
        }))
        .unwrap();

        assert_eq!(cmd.args["size"], ArgValue::Int(100));
        assert_eq!(cmd.args["scale"], ArgValue::Float(1.5));
        assert_eq!(cmd.args["name"], ArgValue::Str("Box".into()));
        assert_eq!(cmd.args["visible"], ArgValue::Bool(true));
        assert_eq!(
            cmd.args["position"],
            ArgValue::List(vec![ArgValue::Int(0), ArgValue::Int(10), ArgValue::Int(0)])
        );
        assert!(matches!(cmd.args["meta"], ArgValue::Map(_)));
        assert_eq!(cmd.args["parent"], ArgValue::Null);
    }

    #[test]
    fn from_json_value_keeps_integers_integral() {
        assert_eq!(ArgValue::from(json!(200)), ArgValue::Int(200));
        assert_eq!(ArgValue::from(json!(2.0)), ArgValue::Float(2.0));
        assert_eq!(ArgValue::from(json!(u64::MAX)), ArgValue::Float(u64::MAX as f64));
    }

    #[test]
    fn arg_value_serializes_as_plain_json() {
        let cmd = Command::bare("CreateMaterial")
            .with_arg("name", "Red")
            .with_arg("color", ArgValue::List(vec![1.0.into(), 0.0.into(), 0.0.into()]));
        let value = serde_json::to_value(&cmd).unwrap();
        assert_eq!(
            value,
            json!({"action": "CreateMaterial", "args": {"color": [1.0, 0.0, 0.0], "name": "Red"}})
        );
    }

    #[test]
    fn command_display_uses_call_style() {
        let cmd = Command::bare("Duplicate")
            .with_arg("count", 3i64)
            .with_arg("axis", "Y")
            .with_arg("distance", 2.5);
        assert_eq!(cmd.to_string(), "Duplicate(axis='Y', count=3, distance=2.5)");
        assert_eq!(Command::bare("FrameAll").to_string(), "FrameAll()");
    }

    #[test]
    fn float_display_keeps_decimal_point() {
        assert_eq!(ArgValue::Float(1.0).to_string(), "1.0");
        assert_eq!(
            ArgValue::List(vec![ArgValue::Float(1.0), ArgValue::Int(0)]).to_string(),
            "[1.0, 0]"
        );
    }

    #[test]
    fn parse_result_envelopes() {
        let rule = ParseResult::rule(vec![Command::bare("AddCube")]);
        assert_eq!(rule.source, Source::Rule);
        assert_eq!(rule.completion, RULE_COMPLETION);

        let err = ParseResult::error("Network error: connection refused");
        assert!(err.is_error());
        assert_eq!(err.completion, "Error: Network error: connection refused");
        assert!(err.commands.is_empty());
    }

    #[test]
    fn source_serializes_lowercase() {
        let result = ParseResult::ai("{}", vec![]);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["source"], "ai");
        assert_eq!(Source::Error.to_string(), "error");
    }

    #[test]
    fn numeric_accessors() {
        assert_eq!(ArgValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(ArgValue::Float(0.5).as_i64(), None);
        assert_eq!(ArgValue::from("X").as_str(), Some("X"));
        assert_eq!(ArgValue::Bool(false).as_bool(), Some(false));
    }
}
