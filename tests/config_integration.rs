use std::path::PathBuf;

use marknote::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".marknoterc");
    let content = r#"
# comment
--preview

--fg yellow
   
--log-file=marknote.log
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.preview);
    assert_eq!(flags.fg.as_deref(), Some("yellow"));
    assert_eq!(flags.log_file, Some(PathBuf::from("marknote.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".marknoterc");
    let content = "--preview\n--dir /srv/notes\n--bg black\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "marknote".to_string(),
        "--dir".to_string(),
        "/home/me/notes".to_string(),
        "--fg=white".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.preview, "file flags should remain enabled");
    assert_eq!(effective.fg.as_deref(), Some("white"), "cli flags should be applied");
    assert_eq!(
        effective.dir,
        Some(PathBuf::from("/home/me/notes")),
        "cli should override dir"
    );
    assert_eq!(
        effective.bg.as_deref(),
        Some("black"),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_local_file_overrides_global_file() {
    let dir = tempfile::tempdir().unwrap();
    let global = dir.path().join("config");
    let local = dir.path().join(".marknoterc");
    std::fs::write(&global, "--fg red\n--bg black\n").unwrap();
    std::fs::write(&local, "--fg green\n").unwrap();

    let merged = load_config_flags(&global)
        .unwrap()
        .union(&load_config_flags(&local).unwrap());
    assert_eq!(merged.fg.as_deref(), Some("green"));
    assert_eq!(merged.bg.as_deref(), Some("black"));
}

#[test]
fn test_missing_config_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}
