use std::fs;
use std::path::PathBuf;

use comments::config::CommentsConfig;
use comments::tooling::cli::{CliContext, Commands};
use comments::{ApiError, WriteMode};

use crate::support::{cli_in, plain_config, touch, tree};

fn set(path: &str, words: &[&str]) -> Commands {
    Commands::Set {
        path: PathBuf::from(path),
        comment: words.iter().map(|w| w.to_string()).collect(),
    }
}

fn list(dir: &str, filtered: bool) -> Commands {
    Commands::List {
        directory: PathBuf::from(dir),
        filtered,
        format: "text".to_string(),
        no_dots: false,
    }
}

#[test]
fn set_joins_words_and_confirms() {
    let temp = tree();
    let cli = cli_in(temp.path());

    let output = cli.execute(&set("test1.txt", &["two", "words"])).unwrap();
    assert_eq!(output, "\"two words\" was applied to \"test1.txt\" successfully.");
    assert_eq!(
        fs::read_to_string(temp.path().join(".comments/test1.txt.comment")).unwrap(),
        "two words\n"
    );
}

#[test]
fn set_on_missing_path_is_invalid() {
    let temp = tree();
    let cli = cli_in(temp.path());

    let err = cli.execute(&set("nope.txt", &["x"])).unwrap_err();
    assert!(matches!(err, ApiError::InvalidPath(_)));
    assert_eq!(err.to_string(), "Please specify a valid directory or file.");
    assert!(!temp.path().join(".comments").exists());
}

#[test]
fn list_shows_dot_rows_and_comments() {
    let temp = tree();
    let cli = cli_in(temp.path());
    cli.execute(&set("test1.txt", &["demo 1"])).unwrap();
    cli.execute(&set(".", &["root dir"])).unwrap();

    let output = cli.execute(&list(".", false)).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "./          root dir ");
    assert!(lines[1].starts_with("../"));
    assert_eq!(lines[2], "nested/     ");
    assert_eq!(lines[3], "test1.txt  demo 1 ");
    assert_eq!(lines[4], "test2.txt  ");
}

#[test]
fn filtered_list_hides_uncommented() {
    let temp = tree();
    let cli = cli_in(temp.path());
    cli.execute(&set("test2.txt", &["only"])).unwrap();

    let output = cli.execute(&list(".", true)).unwrap();
    assert_eq!(output, "test2.txt  only ");
}

#[test]
fn list_rejects_files_and_missing_directories() {
    let temp = tree();
    let cli = cli_in(temp.path());

    for dir in ["test1.txt", "missing"] {
        let err = cli.execute(&list(dir, false)).unwrap_err();
        assert_eq!(err.to_string(), "Please specify a valid directory.");
    }
}

#[test]
fn list_json_has_entries() {
    let temp = tree();
    let cli = cli_in(temp.path());
    cli.execute(&set("nested", &["dir demo"])).unwrap();

    let output = cli
        .execute(&Commands::List {
            directory: PathBuf::from("."),
            filtered: false,
            format: "json".to_string(),
            no_dots: true,
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let entries = parsed
        .get("entries")
        .and_then(|v| v.as_array())
        .expect("entries array should exist");
    assert_eq!(entries.len(), 3);
    let nested = entries
        .iter()
        .find(|e| e.get("name").and_then(|n| n.as_str()) == Some("nested"))
        .expect("nested should be listed");
    assert_eq!(nested.get("is_dir").and_then(|v| v.as_bool()), Some(true));
    assert_eq!(nested.get("comment").and_then(|v| v.as_str()), Some("dir demo"));
}

#[test]
fn list_rejects_unknown_format() {
    let temp = tree();
    let cli = cli_in(temp.path());
    let err = cli
        .execute(&Commands::List {
            directory: PathBuf::from("."),
            filtered: false,
            format: "yaml".to_string(),
            no_dots: false,
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(_)));
}

#[test]
fn remove_reports_deleted_then_not_found() {
    let temp = tree();
    let cli = cli_in(temp.path());
    cli.execute(&set("test1.txt", &["x"])).unwrap();

    let remove = Commands::Remove {
        path: PathBuf::from("test1.txt"),
    };
    assert_eq!(
        cli.execute(&remove).unwrap(),
        "test1.txt comment was deleted successfully."
    );
    assert_eq!(
        cli.execute(&remove).unwrap(),
        "No comment to be deleted for \"test1.txt\""
    );
    assert!(!temp.path().join(".comments").exists());
}

#[test]
fn remove_on_missing_path_is_invalid() {
    let temp = tree();
    let cli = cli_in(temp.path());
    let err = cli
        .execute(&Commands::Remove {
            path: PathBuf::from("gone"),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidPath(_)));
}

#[test]
fn prune_reports_orphans() {
    let temp = tree();
    let cli = cli_in(temp.path());
    cli.execute(&set("test1.txt", &["x"])).unwrap();
    fs::remove_file(temp.path().join("test1.txt")).unwrap();

    let dry = cli
        .execute(&Commands::Prune {
            directory: PathBuf::from("."),
            recursive: false,
            dry_run: true,
        })
        .unwrap();
    assert!(dry.starts_with("Would remove orphaned comment"));
    assert!(temp.path().join(".comments").exists());

    let real = cli
        .execute(&Commands::Prune {
            directory: PathBuf::from("."),
            recursive: false,
            dry_run: false,
        })
        .unwrap();
    assert_eq!(real.lines().count(), 2);
    assert!(!temp.path().join(".comments").exists());

    let again = cli
        .execute(&Commands::Prune {
            directory: PathBuf::from("."),
            recursive: true,
            dry_run: false,
        })
        .unwrap();
    assert_eq!(again, "Nothing to prune.");
}

#[test]
fn append_mode_accumulates_records() {
    let temp = tree();
    let mut config = plain_config();
    config.store.write_mode = WriteMode::Append;
    let cli = CliContext::with_config(temp.path().to_path_buf(), config).unwrap();

    cli.execute(&set("test1.txt", &["a"])).unwrap();
    cli.execute(&set("test1.txt", &["b"])).unwrap();
    assert_eq!(
        fs::read_to_string(temp.path().join(".comments/test1.txt.comment")).unwrap(),
        "a\nb\n"
    );
}

#[test]
fn case_matching_targets_on_disk_name() {
    let temp = tree();
    touch(&temp.path().join("ReadMe.md"));
    let mut config = plain_config();
    config.store.match_case = true;
    let cli = CliContext::with_config(temp.path().to_path_buf(), config).unwrap();

    cli.execute(&set("README.MD", &["folded"])).unwrap();
    assert!(temp.path().join(".comments/ReadMe.md.comment").is_file());
}

#[test]
fn zero_spacing_config_is_rejected() {
    let temp = tree();
    let mut config = CommentsConfig::default();
    config.display.spacing = 0;
    assert!(CliContext::with_config(temp.path().to_path_buf(), config).is_err());
}

#[test]
fn config_command_prints_toml() {
    let temp = tree();
    let cli = cli_in(temp.path());
    let output = cli.execute(&Commands::Config).unwrap();
    assert!(output.contains("[display]"));
    assert!(output.contains("spacing = 2"));
    assert!(output.contains("write_mode = \"overwrite\""));
}
