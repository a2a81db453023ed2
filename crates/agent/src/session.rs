//! In-memory session log of prompts and their outcomes.

use chrono::{DateTime, Utc};
use cinecommand_core::{Command, ParseResult, Source};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a log entry records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntryKind {
    /// A prompt typed by the user.
    User { content: String },
    /// An LLM completion and the commands parsed from it.
    Ai {
        content: String,
        commands: Vec<Command>,
    },
    /// Commands issued without the LLM (rule hits).
    Action { commands: Vec<Command> },
    Error { content: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEntry {
    #[serde(flatten)]
    pub kind: EntryKind,
    pub timestamp: DateTime<Utc>,
}

/// Counters shown when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub prompts: usize,
    pub rule_hits: usize,
    pub ai_responses: usize,
    pub errors: usize,
    pub commands: usize,
}

/// Chronological record of one interactive session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLog {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    entries: Vec<SessionEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            ended_at: None,
            entries: Vec::new(),
        }
    }

    fn push(&mut self, kind: EntryKind) {
        self.entries.push(SessionEntry {
            kind,
            timestamp: Utc::now(),
        });
    }

    pub fn add_user_prompt(&mut self, prompt: impl Into<String>) {
        self.push(EntryKind::User {
            content: prompt.into(),
        });
    }

    pub fn add_ai_response(&mut self, completion: impl Into<String>, commands: Vec<Command>) {
        self.push(EntryKind::Ai {
            content: completion.into(),
            commands,
        });
    }

    pub fn add_action(&mut self, commands: Vec<Command>) {
        self.push(EntryKind::Action { commands });
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.push(EntryKind::Error {
            content: message.into(),
        });
    }

    /// Log a translation: the prompt, then its outcome.
    pub fn record(&mut self, prompt: &str, result: &ParseResult) {
        self.add_user_prompt(prompt);
        match result.source {
            Source::Rule => self.add_action(result.commands.clone()),
            Source::Ai => self.add_ai_response(&result.completion, result.commands.clone()),
            Source::Error => self.add_error(&result.completion),
        }
    }

    pub fn end(&mut self) {
        self.ended_at = Some(Utc::now());
    }

    pub fn entries(&self) -> &[SessionEntry] {
        &self.entries
    }

    pub fn summary(&self) -> SessionSummary {
        let mut summary = SessionSummary::default();
        for entry in &self.entries {
            match &entry.kind {
                EntryKind::User { .. } => summary.prompts += 1,
                EntryKind::Ai { commands, .. } => {
                    summary.ai_responses += 1;
                    summary.commands += commands.len();
                }
                EntryKind::Action { commands } => {
                    summary.rule_hits += 1;
                    summary.commands += commands.len();
                }
                EntryKind::Error { .. } => summary.errors += 1,
            }
        }
        summary
    }
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new()
    }
}
