use std::path::PathBuf;

use resumark::config::{ConfigFlags, load_config_flags, parse_flag_tokens, save_config_flags};
use resumark::services::PageFormat;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".resumarkrc");
    let content = r"
# comment
--guard-edits

--page-format letter

--log-file=resumark.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.guard_edits);
    assert_eq!(flags.page_format, Some(PageFormat::Letter));
    assert_eq!(flags.log_file, Some(PathBuf::from("resumark.log")));
}

#[test]
fn test_config_values_keep_their_spaces() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".resumarkrc");
    std::fs::write(
        &path,
        "--name Ada King Lovelace\n--improve-cmd llm -s 'tighten this'\n",
    )
    .unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert_eq!(flags.name.as_deref(), Some("Ada King Lovelace"));
    assert_eq!(flags.improve_cmd.as_deref(), Some("llm -s 'tighten this'"));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".resumarkrc");
    let content = "--guard-edits\n--page-format letter\n--out-dir exports\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "resumark".to_string(),
        "--page-format".to_string(),
        "a4".to_string(),
        "--margin-mm".to_string(),
        "10".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.guard_edits, "file flags should remain enabled");
    assert_eq!(effective.margin_mm, Some(10.0), "cli flags should be applied");
    assert_eq!(
        effective.page_format,
        Some(PageFormat::A4),
        "cli should override page format"
    );
    assert_eq!(
        effective.out_dir,
        Some(PathBuf::from("exports")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_saved_cli_flags_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resumark").join("config");
    let cli_args = vec![
        "resumark".to_string(),
        "--save".to_string(),
        "--name=Grace Hopper".to_string(),
        "--guard-edits".to_string(),
        "cv.md".to_string(),
    ];
    let flags = parse_flag_tokens(&cli_args);
    save_config_flags(&path, &flags).unwrap();

    let loaded = load_config_flags(&path).unwrap();
    assert_eq!(
        loaded,
        ConfigFlags {
            name: Some("Grace Hopper".to_string()),
            guard_edits: true,
            ..ConfigFlags::default()
        }
    );
}
