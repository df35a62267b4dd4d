//! Tests for the list-folder CLI command

use crate::cli::test_helpers::create_cli_fixture;
use crate::common::planning_provider;
use gdocs_index::cli::commands::folder::{execute_list, ListFolderArgs};
use gdocs_index::cli::OutputFormat;

#[tokio::test]
async fn test_list_folder_human_and_json() {
    let provider = planning_provider();
    let fixture = create_cli_fixture(&provider);

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let args = ListFolderArgs {
            folder: "planning".to_string(),
            credentials: Some(fixture.credentials.clone()),
        };
        let result = execute_list(args, &fixture.services, format).await;
        assert!(result.is_ok(), "list-folder should succeed: {:?}", result.err());
    }

    assert_eq!(provider.listed(), vec!["planning", "planning"]);
    // Listing never fetches documents
    assert!(provider.fetched().is_empty());
}

#[tokio::test]
async fn test_list_empty_folder() {
    let fixture = create_cli_fixture(&planning_provider());
    let args = ListFolderArgs {
        folder: "empty-folder".to_string(),
        credentials: Some(fixture.credentials.clone()),
    };
    assert!(execute_list(args, &fixture.services, OutputFormat::Human)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_list_folder_invalid_id() {
    let fixture = create_cli_fixture(&planning_provider());
    let args = ListFolderArgs {
        folder: "https://example.com/nothing-here?x=1".to_string(),
        credentials: Some(fixture.credentials.clone()),
    };
    assert!(execute_list(args, &fixture.services, OutputFormat::Human)
        .await
        .is_err());
}
