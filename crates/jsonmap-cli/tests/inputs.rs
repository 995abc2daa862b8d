//! Integration tests for loading session files and rendering reports.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;

use jsonmap_cli::config::AppConfig;
use jsonmap_cli::inputs::{SessionFiles, open_session, read_commands, read_rules};
use jsonmap_cli::report::{links_table, rows_table};
use jsonmap_map::{Command, FanOutPolicy, MapperOptions, Outcome};
use jsonmap_model::{FieldPath, MappingRule};

fn temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("jsonmap_cli_{name}_{stamp}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn cleanup_dir(dir: &Path) {
    let _ = fs::remove_dir_all(dir);
}

fn write(dir: &Path, file: &str, contents: &str) -> PathBuf {
    let path = dir.join(file);
    fs::write(&path, contents).unwrap();
    path
}

fn people_files(dir: &Path) -> SessionFiles {
    SessionFiles {
        source: write(
            dir,
            "source.json",
            r#"[{"user": {"name": "Ann", "age": 5}}, {"user": {"name": "Bob", "age": 7}}]"#,
        ),
        target: write(
            dir,
            "target.json",
            r#"{"profile": {"fullName": "", "years": 0}}"#,
        ),
        rules: None,
        commands: None,
    }
}

#[test]
fn rules_file_accepts_document_and_list() {
    let dir = temp_dir("rules");
    let document = write(
        &dir,
        "document.json",
        r#"{"rules": [{"source": "user.name", "target": "profile.fullName"}]}"#,
    );
    let list = write(
        &dir,
        "list.json",
        r#"[{"source": "user.name", "target": "profile.fullName"}]"#,
    );
    let expected = vec![MappingRule::new("user.name", "profile.fullName")];
    assert_eq!(read_rules(&document).unwrap(), expected);
    assert_eq!(read_rules(&list).unwrap(), expected);
    cleanup_dir(&dir);
}

#[test]
fn rules_file_with_unknown_key_is_rejected() {
    let dir = temp_dir("rules_typo");
    let path = write(
        &dir,
        "rules.json",
        r#"{"rule": [{"source": "user.name", "target": "profile.fullName"}]}"#,
    );
    let err = read_rules(&path).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("parse rules in"));
    assert!(message.contains("unknown field `rule`"));
    cleanup_dir(&dir);
}

#[test]
fn commands_file_parses_gestures() {
    let dir = temp_dir("commands");
    let path = write(
        &dir,
        "commands.json",
        r#"[
            {"command": "begin_drag", "path": "user.age"},
            {"command": "hover", "path": "profile.years"},
            {"command": "drop", "path": "profile.years"},
            {"command": "cancel_at", "path": "user.age"}
        ]"#,
    );
    let commands = read_commands(&path).unwrap();
    assert_eq!(
        commands,
        vec![
            Command::BeginDrag(FieldPath::parse("user.age")),
            Command::Hover(Some(FieldPath::parse("profile.years"))),
            Command::Drop(FieldPath::parse("profile.years")),
            Command::CancelAt(FieldPath::parse("user.age")),
        ]
    );
    cleanup_dir(&dir);
}

#[test]
fn session_applies_rules_then_commands() {
    let dir = temp_dir("session");
    let mut files = people_files(&dir);
    files.rules = Some(write(
        &dir,
        "rules.json",
        r#"{"rules": [{"source": "user.name", "target": "profile.fullName"}]}"#,
    ));
    files.commands = Some(write(
        &dir,
        "commands.json",
        r#"[
            {"command": "begin_drag", "path": "user.age"},
            {"command": "drop", "path": "profile.years"}
        ]"#,
    ));

    let (session, outcomes) = open_session(&files, MapperOptions::default()).unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0], Outcome::DragStarted);
    assert!(outcomes[1].mutated());
    assert_eq!(
        session.payload(),
        vec![
            json!({"user": {"fullName": "Ann", "years": 5}}),
            json!({"user": {"fullName": "Bob", "years": 7}}),
        ]
    );
    cleanup_dir(&dir);
}

#[test]
fn malformed_source_names_the_file() {
    let dir = temp_dir("malformed");
    let mut files = people_files(&dir);
    files.source = write(&dir, "broken.json", "[1, 2");

    let err = open_session(&files, MapperOptions::default()).unwrap_err();
    assert!(format!("{err:#}").contains("broken.json"));
    cleanup_dir(&dir);
}

#[test]
fn non_object_target_is_rejected() {
    let dir = temp_dir("target");
    let mut files = people_files(&dir);
    files.target = write(&dir, "target.json", "[]");

    let err = open_session(&files, MapperOptions::default()).unwrap_err();
    assert!(format!("{err:#}").contains("target must be a JSON object, found array"));
    cleanup_dir(&dir);
}

#[test]
fn config_file_sets_fan_out() {
    let dir = temp_dir("config");
    let path = write(
        &dir,
        "config.json",
        r#"{"mapper": {"fan_out": "replace_existing"}}"#,
    );
    let config = AppConfig::load_or_default(Some(&path)).unwrap();
    assert_eq!(config.mapper.fan_out, FanOutPolicy::ReplaceExisting);
    assert_eq!(AppConfig::load_or_default(None).unwrap(), AppConfig::default());
    cleanup_dir(&dir);
}

#[test]
fn tables_list_rows_and_links() {
    let dir = temp_dir("tables");
    let mut files = people_files(&dir);
    files.rules = Some(write(
        &dir,
        "rules.json",
        r#"[{"source": "user.name", "target": "profile.fullName"}]"#,
    ));
    let (session, _) = open_session(&files, MapperOptions::default()).unwrap();

    let source = rows_table(session.source_tree()).to_string();
    assert!(source.contains("user.name"));
    assert!(source.contains("\"Ann\""));
    assert!(source.contains("profile.fullName [x]"));

    let target = rows_table(session.target_tree()).to_string();
    assert!(target.contains("profile.years"));

    let links = links_table(session.links()).to_string();
    assert!(links.contains("#FF0000"));
    assert!(links.contains("(325, 36)"));
    cleanup_dir(&dir);
}
