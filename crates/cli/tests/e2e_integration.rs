//! End-to-end integration tests for the CineCommand translation pipeline.
//!
//! These tests exercise the full path from prompt to normalized commands:
//! rule files on disk, the provider boundary, response unwrapping,
//! extraction, and normalization.

use std::io::Write;
use std::sync::Arc;

use cinecommand_agent::{SessionLog, Translator};
use cinecommand_config::AppConfig;
use cinecommand_core::error::ProviderError;
use cinecommand_core::provider::{CompletionRequest, Provider};
use cinecommand_core::{ArgValue, Source};
use cinecommand_rules::{RuleBook, RuleStore};

// ── Mock Provider ────────────────────────────────────────────────────────

/// A mock provider that returns scripted responses in sequence.
struct ScriptedProvider {
    responses: Vec<Result<serde_json::Value, ProviderError>>,
    call_count: std::sync::Mutex<usize>,
}

impl ScriptedProvider {
    fn new(responses: Vec<Result<serde_json::Value, ProviderError>>) -> Self {
        Self {
            responses,
            call_count: std::sync::Mutex::new(0),
        }
    }

    fn text(response: &str) -> Self {
        Self::new(vec![Ok(text_response(response))])
    }

    fn calls(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<serde_json::Value, ProviderError> {
        let mut count = self.call_count.lock().unwrap();
        if *count >= self.responses.len() {
            panic!(
                "ScriptedProvider exhausted: call #{}, have {}",
                *count,
                self.responses.len()
            );
        }
        let resp = self.responses[*count].clone();
        *count += 1;
        resp
    }
}

fn text_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "content": [{"type": "text", "text": text}]
    })
}

fn rules_file(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

// ── E2E: LLM path ────────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_rules_disabled_ai_cube_gets_default_size() {
    let provider = Arc::new(ScriptedProvider::text(r#"{"action":"AddCube","args":{}}"#));
    let rules = Arc::new(RuleBook::empty().enabled(false));
    let translator = Translator::new(provider.clone(), rules);

    let result = translator.process_prompt("add a cube").await;

    assert_eq!(result.source, Source::Ai);
    assert_eq!(result.commands.len(), 1);
    assert_eq!(result.commands[0].action, "AddCube");
    assert_eq!(result.commands[0].args["size"], ArgValue::Int(200));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn e2e_red_cube_completion_three_commands() {
    let completion = r#"{"action": "AddCube", "args": {"size": 100, "name": "RedCube"}}
{"action": "CreateMaterial", "args": {"name": "Red", "color": "[1, 0, 0]"}}
{"action": "ApplyMaterial", "args": {"name": "Red", "to": "RedCube"}}"#;
    let provider = Arc::new(ScriptedProvider::text(completion));
    let translator = Translator::new(provider, Arc::new(RuleBook::empty()));

    let result = translator.process_prompt("make a red cube").await;

    let actions: Vec<&str> = result.commands.iter().map(|c| c.action.as_str()).collect();
    assert_eq!(actions, ["AddCube", "CreateMaterial", "ApplyMaterial"]);
    assert_eq!(result.commands[0].args["size"], ArgValue::Int(100));
    assert_eq!(
        result.commands[1].args["color"],
        ArgValue::List(vec![
            ArgValue::Float(1.0),
            ArgValue::Float(0.0),
            ArgValue::Float(0.0)
        ])
    );
}

#[tokio::test]
async fn e2e_fenced_answer_with_prose() {
    let completion = "Sure! Here are the commands:\n\n```json\n[\n  {\"action\": \"AddSphere\", \"args\": {}},\n  {\"action\": \"Duplicate\", \"args\": {\"count\": 3}}\n]\n```\n\nLet me know if you need anything else.";
    let provider = Arc::new(ScriptedProvider::text(completion));
    let translator = Translator::new(provider, Arc::new(RuleBook::empty()));

    let result = translator.process_prompt("three spheres").await;

    assert_eq!(result.source, Source::Ai);
    assert_eq!(result.commands.len(), 2);
    assert_eq!(result.commands[0].args["radius"], ArgValue::Int(100));
    let dup = &result.commands[1].args;
    assert_eq!(dup["count"], ArgValue::Int(3));
    assert_eq!(dup["axis"], ArgValue::from("X"));
    assert_eq!(dup["distance"], ArgValue::Int(100));
}

#[tokio::test]
async fn e2e_plain_language_answer_falls_back_to_keywords() {
    let provider = Arc::new(ScriptedProvider::text(
        "I will add a cube and a sphere to the scene.",
    ));
    let translator = Translator::new(provider, Arc::new(RuleBook::empty()));

    let result = translator.process_prompt("cube and sphere").await;

    let actions: Vec<&str> = result.commands.iter().map(|c| c.action.as_str()).collect();
    assert_eq!(actions, ["AddCube", "AddSphere"]);
    assert_eq!(result.commands[0].args["size"], ArgValue::Int(100));
}

#[tokio::test]
async fn e2e_provider_failure_is_error_envelope() {
    let provider = Arc::new(ScriptedProvider::new(vec![Err(ProviderError::Network(
        "connection refused".into(),
    ))]));
    let translator = Translator::new(provider, Arc::new(RuleBook::empty()));

    let result = translator.process_prompt("add a cube").await;

    assert_eq!(result.source, Source::Error);
    assert!(result.completion.starts_with("Error: "));
    assert!(result.completion.contains("connection refused"));
    assert!(result.commands.is_empty());

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["source"], "error");
}

// ── E2E: Rule path ───────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_rule_file_short_circuits_llm() {
    let file = rules_file(&[
        "# presets",
        r#"{"prompt_contains": "hero shot", "commands": [{"action": "AddCamera", "args": {"focal_length": 85}}, {"action": "FrameAll"}], "description": "Portrait camera"}"#,
        "not json at all",
    ]);
    let provider = Arc::new(ScriptedProvider::new(vec![]));
    let rules = Arc::new(RuleBook::open(file.path()));
    let translator = Translator::new(provider.clone(), rules);

    let result = translator.process_prompt("Set up a HERO SHOT please").await;

    assert_eq!(result.source, Source::Rule);
    assert_eq!(result.completion, "Executing predefined rule");
    assert_eq!(result.commands.len(), 2);
    assert_eq!(result.commands[0].args["focal_length"], ArgValue::Int(85));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn e2e_reload_picks_up_edited_rules() {
    let file = rules_file(&[r#"{"prompt_contains": "cube", "commands": [{"action": "AddCube"}]}"#]);
    let provider = Arc::new(ScriptedProvider::text(r#"{"action":"FrameAll"}"#));
    let rules = Arc::new(RuleBook::open(file.path()));
    let translator = Translator::new(provider.clone(), rules);

    assert_eq!(translator.process_prompt("cube").await.source, Source::Rule);

    std::fs::write(file.path(), "# all rules removed\n").unwrap();
    let outcome = translator.reload_rules().unwrap();
    assert!(outcome.found);
    assert_eq!(outcome.loaded, 0);

    let result = translator.process_prompt("cube").await;
    assert_eq!(result.source, Source::Ai);
    assert_eq!(result.commands[0].action, "FrameAll");
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn e2e_config_drives_rules_and_model() {
    let rules = rules_file(&[r#"{"prompt_contains": "cube", "commands": [{"action": "AddCube"}]}"#]);
    let mut config_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        config_file,
        "default_model = \"claude-3-sonnet-20240229\"\nmax_tokens = 500\n\n[rules]\nenabled = false\npath = {:?}",
        rules.path().display().to_string()
    )
    .unwrap();

    let config = AppConfig::load_from(config_file.path()).unwrap();
    let book = RuleBook::open(config.rules_path());
    book.set_enabled(config.rules.enabled);
    assert_eq!(book.len(), 1);

    let provider = Arc::new(ScriptedProvider::text(r#"{"action":"AddCube","args":{"size":10}}"#));
    let translator = Translator::from_config(&config, provider.clone(), Arc::new(book));
    assert_eq!(translator.model(), "claude-3-sonnet-20240229");

    // Rules are loaded but disabled, so the LLM answers
    let result = translator.process_prompt("cube").await;
    assert_eq!(result.source, Source::Ai);
    assert_eq!(result.commands[0].args["size"], ArgValue::Int(10));
    assert_eq!(provider.calls(), 1);
}

// ── E2E: Session ─────────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_session_log_tracks_mixed_prompts() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        Ok(text_response(r#"{"action":"AddSphere"}"#)),
        Err(ProviderError::RateLimited {
            retry_after_secs: 5,
        }),
    ]));
    let rules = Arc::new(RuleBook::from_text(
        r#"{"prompt_contains": "frame", "commands": [{"action": "FrameAll"}]}"#,
    ));
    let translator = Translator::new(provider, rules);
    let mut session = SessionLog::new();

    for prompt in ["frame all", "a sphere", "another sphere"] {
        let result = translator.process_prompt(prompt).await;
        session.record(prompt, &result);
    }
    session.end();

    let summary = session.summary();
    assert_eq!(summary.prompts, 3);
    assert_eq!(summary.rule_hits, 1);
    assert_eq!(summary.ai_responses, 1);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.commands, 2);
}
