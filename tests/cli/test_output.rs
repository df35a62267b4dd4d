//! Tests for CLI output helpers and argument parsing

use clap::Parser;
use gdocs_index::cli::output::{format_duration, truncate_preview, PREVIEW_CHARS};
use gdocs_index::cli::{Cli, Commands, OutputFormat};

#[test]
fn test_preview_truncated_at_limit() {
    let text = "a".repeat(PREVIEW_CHARS + 10);
    let preview = truncate_preview(&text, PREVIEW_CHARS);
    assert!(preview.ends_with("... (truncated)"));
    assert_eq!(preview.chars().count(), PREVIEW_CHARS + "... (truncated)".len());
}

#[test]
fn test_preview_untouched_at_limit() {
    let text = "é".repeat(PREVIEW_CHARS);
    assert_eq!(truncate_preview(&text, PREVIEW_CHARS), text);
}

#[test]
fn test_format_duration_units() {
    assert_eq!(format_duration(0.012), "12ms");
    assert_eq!(format_duration(2.0), "2.00s");
}

#[test]
fn test_parse_index_folder_args() {
    let cli = Cli::try_parse_from([
        "gdocs-index",
        "--format",
        "json",
        "index-folder",
        "F1",
        "-i",
        "plan",
        "-e",
        "draft",
        "-e",
        "old",
        "--query",
        "budget",
        "-k",
        "3",
    ])
    .unwrap();

    assert_eq!(cli.format, OutputFormat::Json);
    match cli.command {
        Commands::IndexFolder(args) => {
            assert_eq!(args.folder, "F1");
            assert_eq!(args.include, vec!["plan"]);
            assert_eq!(args.exclude, vec!["draft", "old"]);
            assert_eq!(args.search.query.as_deref(), Some("budget"));
            assert_eq!(args.search.limit, Some(3));
            assert!(!args.search.literal);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_rejects_conflicting_validate_args() {
    let result = Cli::try_parse_from([
        "gdocs-index",
        "validate-credentials",
        "key.json",
        "--reader-config",
        "reader.json",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
