//! Reading session inputs from disk and opening a session over them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use jsonmap_map::{Command, MapperOptions, MappingSession, Outcome};
use jsonmap_model::{MappingDocument, MappingRule};

/// Files that make up one session.
#[derive(Debug, Clone)]
pub struct SessionFiles {
    /// Source records: an array of objects or a single object.
    pub source: PathBuf,
    /// Target shape: an object.
    pub target: PathBuf,
    /// Saved rules, applied before any commands.
    pub rules: Option<PathBuf>,
    /// Gesture commands, replayed in order.
    pub commands: Option<PathBuf>,
}

pub fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse JSON in {}", path.display()))
}

/// Read a rules file: either `{"rules": [...]}` or a bare rule array.
pub fn read_rules(path: &Path) -> Result<Vec<MappingRule>> {
    let value = read_json(path)?;
    let rules = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value::<MappingDocument>(value).map(|document| document.rules)
    };
    rules.with_context(|| format!("parse rules in {}", path.display()))
}

pub fn read_commands(path: &Path) -> Result<Vec<Command>> {
    let value = read_json(path)?;
    serde_json::from_value(value).with_context(|| format!("parse commands in {}", path.display()))
}

/// Open a session and bring it to the state described by `files`.
///
/// Returns the outcome of every replayed command alongside the session.
pub fn open_session(
    files: &SessionFiles,
    options: MapperOptions,
) -> Result<(MappingSession, Vec<Outcome>)> {
    let source = read_json(&files.source)?;
    let target = read_json(&files.target)?;
    let mut session = MappingSession::from_json(source, target, options)
        .context("open mapping session")?;
    debug!(
        records = session.records().len(),
        source_rows = session.source_tree().flatten().len(),
        target_rows = session.target_tree().flatten().len(),
        "session opened"
    );

    if let Some(path) = &files.rules {
        let rules = read_rules(path)?;
        let total = rules.len();
        let appended = session.load_rules(rules);
        info!(path = %path.display(), total, appended, "rules loaded");
    }

    let outcomes = match &files.commands {
        Some(path) => {
            let commands = read_commands(path)?;
            let outcomes = session.dispatch_all(commands);
            for (index, outcome) in outcomes.iter().enumerate() {
                debug!(index, ?outcome, "command replayed");
            }
            outcomes
        }
        None => Vec::new(),
    };

    Ok((session, outcomes))
}
