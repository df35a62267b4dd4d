//! Tests for the validate-credentials CLI command

use crate::cli::test_helpers::create_cli_fixture;
use crate::common::{planning_provider, service_account_bundle, write_reader_config};
use gdocs_index::cli::commands::validate::{execute, ValidateArgs};
use gdocs_index::cli::OutputFormat;

#[tokio::test]
async fn test_validate_credentials_file() {
    let fixture = create_cli_fixture(&planning_provider());
    let args = ValidateArgs {
        credentials: Some(fixture.credentials.clone()),
        reader_config: None,
    };
    let result = execute(args, &fixture.services, OutputFormat::Json).await;
    assert!(result.is_ok(), "validate should succeed: {:?}", result.err());
}

#[tokio::test]
async fn test_validate_incomplete_bundle() {
    let fixture = create_cli_fixture(&planning_provider());
    let mut bundle = service_account_bundle();
    bundle.as_object_mut().unwrap().remove("private_key");
    bundle.as_object_mut().unwrap().remove("client_email");
    let path = fixture.dir.path().join("partial.json");
    std::fs::write(&path, bundle.to_string()).unwrap();

    let args = ValidateArgs {
        credentials: Some(path),
        reader_config: None,
    };
    let message = execute(args, &fixture.services, OutputFormat::Human)
        .await
        .unwrap_err()
        .to_string();
    assert!(message.contains("private_key"));
    assert!(message.contains("client_email"));
}

#[tokio::test]
async fn test_validate_reader_config() {
    let provider = planning_provider();
    let fixture = create_cli_fixture(&provider);
    let config = write_reader_config(fixture.dir.path(), &["a", "b"], &[], &[]);

    let args = ValidateArgs {
        credentials: None,
        reader_config: Some(config),
    };
    let result = execute(args, &fixture.services, OutputFormat::Human).await;
    assert!(result.is_ok(), "validate should succeed: {:?}", result.err());
    // Validation never calls the provider
    assert_eq!(provider.providers_created(), 0);
}
