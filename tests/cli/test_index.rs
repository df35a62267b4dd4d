//! Tests for the index-documents and index-folder CLI commands
//!
//! - Indexing from a reader config file
//! - Indexing a folder with title rules and a follow-up query
//! - Error cases (invalid config, bad query)

use crate::cli::test_helpers::create_cli_fixture;
use crate::common::{planning_provider, write_reader_config};
use gdocs_index::cli::commands::index::{
    execute_documents, execute_folder, IndexDocumentsArgs, IndexFolderArgs,
};
use gdocs_index::cli::commands::SearchOpts;
use gdocs_index::cli::OutputFormat;

fn query(q: &str) -> SearchOpts {
    SearchOpts {
        query: Some(q.to_string()),
        limit: Some(3),
        literal: false,
    }
}

#[tokio::test]
async fn test_index_documents_human() {
    let provider = planning_provider();
    let fixture = create_cli_fixture(&provider);
    let config = write_reader_config(fixture.dir.path(), &["q1", "notes"], &[], &[]);

    let args = IndexDocumentsArgs {
        config,
        data_source: "cli-test".to_string(),
        quiet: true,
        search: query("revenue"),
    };

    let result = execute_documents(args, &fixture.services, OutputFormat::Human).await;
    assert!(result.is_ok(), "index-documents should succeed: {:?}", result.err());
    assert_eq!(provider.fetched(), vec!["q1", "notes"]);
}

#[tokio::test]
async fn test_index_documents_json_without_query() {
    let provider = planning_provider();
    let fixture = create_cli_fixture(&provider);
    let config = write_reader_config(fixture.dir.path(), &["q1", "q2"], &[], &["draft"]);

    let args = IndexDocumentsArgs {
        config,
        data_source: "cli".to_string(),
        quiet: true,
        search: SearchOpts::default(),
    };

    let result = execute_documents(args, &fixture.services, OutputFormat::Json).await;
    assert!(result.is_ok(), "index-documents should succeed: {:?}", result.err());
}

#[tokio::test]
async fn test_index_documents_invalid_config() {
    let fixture = create_cli_fixture(&planning_provider());
    let config = fixture.dir.path().join("reader.json");
    std::fs::write(&config, r#"{ "document_ids": ["q1"] }"#).unwrap();

    let args = IndexDocumentsArgs {
        config,
        data_source: "cli".to_string(),
        quiet: true,
        search: SearchOpts::default(),
    };

    let err = execute_documents(args, &fixture.services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("service_account_dict"));
}

#[tokio::test]
async fn test_index_folder_with_rules() {
    let provider = planning_provider();
    let fixture = create_cli_fixture(&provider);

    let args = IndexFolderArgs {
        folder: "https://drive.google.com/drive/folders/planning".to_string(),
        credentials: Some(fixture.credentials.clone()),
        include: vec!["report".to_string()],
        exclude: vec!["draft".to_string()],
        data_source: "cli".to_string(),
        quiet: true,
        search: query("churn"),
    };

    let result = execute_folder(args, &fixture.services, OutputFormat::Json).await;
    assert!(result.is_ok(), "index-folder should succeed: {:?}", result.err());
    assert_eq!(provider.listed(), vec!["planning"]);
    assert_eq!(provider.fetched(), vec!["q1"]);
}

#[tokio::test]
async fn test_index_folder_bad_query() {
    let fixture = create_cli_fixture(&planning_provider());

    let args = IndexFolderArgs {
        folder: "planning".to_string(),
        credentials: Some(fixture.credentials.clone()),
        include: vec![],
        exclude: vec![],
        data_source: "cli".to_string(),
        quiet: true,
        search: query("author:someone"),
    };

    let err = execute_folder(args, &fixture.services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("author"));
}
