//! The rule store: a swappable, reloadable rule table.
//!
//! Reload builds a complete new [`RuleSet`] and swaps the shared pointer, so
//! a match running on another thread keeps iterating the set it started with.

use crate::model::{Rule, RuleSet};
use cinecommand_core::{Command, RuleError};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// Summary of one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOutcome {
    /// Whether the source existed. A missing file loads as an empty set.
    pub found: bool,
    pub loaded: usize,
    pub skipped: usize,
}

/// Prompt rule lookup, injected into the translator.
pub trait RuleStore: Send + Sync {
    /// Re-read the source and replace the current set.
    ///
    /// On a read error the previous set stays active.
    fn reload(&self) -> Result<LoadOutcome, RuleError>;

    /// Commands of the first rule whose trigger occurs in `prompt`.
    ///
    /// `None` when nothing matches or matching is disabled.
    fn match_prompt(&self, prompt: &str) -> Option<Vec<Command>>;

    fn is_enabled(&self) -> bool;

    fn set_enabled(&self, enabled: bool);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the active rules, in match order.
    fn rules(&self) -> Vec<Rule>;
}

#[derive(Debug, Clone)]
enum RuleSource {
    File(PathBuf),
    Inline(String),
}

/// The standard [`RuleStore`], backed by a rule file or inline text.
pub struct RuleBook {
    source: RuleSource,
    current: RwLock<Arc<RuleSet>>,
    enabled: AtomicBool,
}

impl RuleBook {
    /// A book reading `path`. Nothing is loaded until [`RuleStore::reload`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_source(RuleSource::File(path.into()))
    }

    /// Open `path` and load it immediately.
    ///
    /// A read failure is logged and leaves the book empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let book = Self::new(path);
        if let Err(e) = book.reload() {
            warn!(error = %e, "Starting with an empty rule set");
        }
        book
    }

    /// A book over in-memory rule text, already loaded.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let book = Self::with_source(RuleSource::Inline(text.clone()));
        book.swap(RuleSet::parse(&text));
        book
    }

    /// A book with no rules.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    fn with_source(source: RuleSource) -> Self {
        Self {
            source,
            current: RwLock::new(Arc::new(RuleSet::new())),
            enabled: AtomicBool::new(true),
        }
    }

    /// Builder-style toggle for the enabled flag.
    pub fn enabled(self, enabled: bool) -> Self {
        self.set_enabled(enabled);
        self
    }

    /// The file this book reads, if any.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            RuleSource::File(p) => Some(p),
            RuleSource::Inline(_) => None,
        }
    }

    fn snapshot(&self) -> Arc<RuleSet> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    fn swap(&self, set: RuleSet) {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(set);
    }
}

impl RuleStore for RuleBook {
    fn reload(&self) -> Result<LoadOutcome, RuleError> {
        let (text, found) = match &self.source {
            RuleSource::Inline(text) => (text.clone(), true),
            RuleSource::File(path) => match std::fs::read_to_string(path) {
                Ok(text) => (text, true),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    info!(path = %path.display(), "No rules file, rule set is empty");
                    (String::new(), false)
                }
                Err(e) => {
                    return Err(RuleError::Io {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
            },
        };

        let set = RuleSet::parse(&text);
        let outcome = LoadOutcome {
            found,
            loaded: set.len(),
            skipped: set.skipped(),
        };
        self.swap(set);

        info!(loaded = outcome.loaded, skipped = outcome.skipped, "Rules reloaded");
        Ok(outcome)
    }

    fn match_prompt(&self, prompt: &str) -> Option<Vec<Command>> {
        if !self.is_enabled() {
            return None;
        }

        let set = self.snapshot();
        let rule = set.find(prompt)?;
        info!(trigger = %rule.prompt_contains, commands = rule.commands.len(), "Rule matched");
        Some(rule.commands.clone())
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    fn len(&self) -> usize {
        self.snapshot().len()
    }

    fn rules(&self) -> Vec<Rule> {
        self.snapshot().rules().to_vec()
    }
}
