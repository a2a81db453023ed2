//! Rule data model and the line-oriented rule file format.

use cinecommand_core::Command;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A static prompt trigger mapped to a fixed command list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Matched case-insensitively as a substring of the prompt.
    pub prompt_contains: String,

    #[serde(default)]
    pub commands: Vec<Command>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Rule {
    pub fn new(prompt_contains: impl Into<String>, commands: Vec<Command>) -> Self {
        Self {
            prompt_contains: prompt_contains.into(),
            commands,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// `lowered_prompt` must already be lowercase.
    pub(crate) fn matches(&self, lowered_prompt: &str) -> bool {
        lowered_prompt.contains(&self.prompt_contains.to_lowercase())
    }
}

/// An ordered set of rules. Earlier rules win.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
    skipped: usize,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a rule file: one JSON object per line.
    ///
    /// Blank lines and lines starting with `#` are ignored. Malformed lines
    /// and rules with an empty trigger are skipped with a warning.
    pub fn parse(text: &str) -> Self {
        let mut set = Self::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line_no = idx + 1;
            match serde_json::from_str::<Rule>(line) {
                Ok(rule) if rule.prompt_contains.trim().is_empty() => {
                    warn!(line = line_no, "Skipping rule with empty prompt_contains");
                    set.skipped += 1;
                }
                Ok(rule) => {
                    debug!(line = line_no, trigger = %rule.prompt_contains, "Loaded rule");
                    set.rules.push(rule);
                }
                Err(e) => {
                    warn!(line = line_no, error = %e, "Skipping malformed rule line");
                    set.skipped += 1;
                }
            }
        }

        set
    }

    pub fn add(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Lines dropped during the last parse.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The first rule whose trigger occurs in `prompt`.
    pub fn find(&self, prompt: &str) -> Option<&Rule> {
        let lowered = prompt.to_lowercase();
        self.rules.iter().find(|r| r.matches(&lowered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinecommand_core::ArgValue;

    const SAMPLE: &str = r#"
# Saved prompt shortcuts
{"prompt_contains": "red cube", "commands": [{"action": "AddCube", "args": {"size": 100}}, {"action": "CreateMaterial", "args": {"name": "Red", "color": [1, 0, 0]}}], "description": "Red cube preset"}

{"prompt_contains": "frame", "commands": [{"action": "FrameAll"}]}
"#;

    #[test]
    fn parses_rules_in_order_skipping_comments() {
        let set = RuleSet::parse(SAMPLE);
        assert_eq!(set.len(), 2);
        assert_eq!(set.skipped(), 0);

        let first = &set.rules()[0];
        assert_eq!(first.prompt_contains, "red cube");
        assert_eq!(first.description.as_deref(), Some("Red cube preset"));
        assert_eq!(first.commands.len(), 2);
        assert_eq!(first.commands[0].args["size"], ArgValue::Int(100));

        let second = &set.rules()[1];
        assert_eq!(second.commands[0].action, "FrameAll");
        assert!(second.commands[0].args.is_empty());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let text = r#"{"prompt_contains": "cube", "commands": []}
this is not json
{"commands": [{"action": "AddSphere"}]}
{"prompt_contains": "sphere", "commands": [{"action": "AddSphere"}]}"#;
        let set = RuleSet::parse(text);
        assert_eq!(set.len(), 2);
        assert_eq!(set.skipped(), 2);
        assert_eq!(set.rules()[1].prompt_contains, "sphere");
    }

    #[test]
    fn empty_trigger_is_rejected() {
        let set = RuleSet::parse(r#"{"prompt_contains": "  ", "commands": [{"action": "FrameAll"}]}"#);
        assert!(set.is_empty());
        assert_eq!(set.skipped(), 1);
    }

    #[test]
    fn find_is_case_insensitive_and_first_wins() {
        let mut set = RuleSet::new();
        set.add(Rule::new("Add A Cube", vec![Command::bare("AddCube")]));
        set.add(Rule::new("cube", vec![Command::bare("Other")]));

        let hit = set.find("ADD A CUBE please").unwrap();
        assert_eq!(hit.commands[0].action, "AddCube");
        assert!(set.find("add a sphere").is_none());
    }

    #[test]
    fn crlf_input_parses() {
        let set = RuleSet::parse("# c\r\n{\"prompt_contains\": \"x\", \"commands\": []}\r\n");
        assert_eq!(set.len(), 1);
    }
}
