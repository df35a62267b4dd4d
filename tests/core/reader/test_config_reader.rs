// Config-driven reader: validation, filtering and credential lifetime

use crate::common::{create_test_services, planning_provider, service_account_bundle, write_reader_config};
use gdocs_index::core::error::{GdocsError, ProviderError};
use gdocs_index::core::reader::{DocumentReader, ReaderConfig};
use gdocs_index::core::types::{META_DATA_SOURCE, META_DOC_ID, META_SOURCE_TYPE, SOURCE_GOOGLE_DOCS};
use serde_json::json;
use tempfile::TempDir;

fn config_value(ids: &[&str], inclusion: &[&str], exclusion: &[&str]) -> serde_json::Value {
    json!({
        "service_account_dict": service_account_bundle(),
        "document_ids": ids,
        "inclusion_rules": inclusion,
        "exclusion_rules": exclusion,
    })
}

#[tokio::test]
async fn test_config_reader_skips_missing_and_keeps_order() {
    let provider = planning_provider();
    let services = create_test_services(&provider);

    let config = ReaderConfig::from_value(&config_value(&["notes", "gone", "q1"], &[], &[])).unwrap();
    let documents = services
        .config_reader("ds-7", config)
        .unwrap()
        .get_documents()
        .await
        .unwrap();

    let ids: Vec<&str> = documents
        .iter()
        .map(|d| d.metadata.get(META_DOC_ID).unwrap().as_str())
        .collect();
    assert_eq!(ids, vec!["notes", "q1"]);
    for document in &documents {
        assert_eq!(document.metadata.get(META_DATA_SOURCE).unwrap(), "ds-7");
        assert_eq!(document.metadata.get(META_SOURCE_TYPE).unwrap(), SOURCE_GOOGLE_DOCS);
        assert_eq!(document.metadata.len(), 4);
    }
}

#[tokio::test]
async fn test_config_reader_title_rules() {
    let provider = planning_provider();
    let services = create_test_services(&provider);

    let config =
        ReaderConfig::from_value(&config_value(&["q1", "q2", "notes"], &["REPORT"], &["draft"]))
            .unwrap();
    let documents = services
        .config_reader("ds", config)
        .unwrap()
        .get_documents()
        .await
        .unwrap();

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].title(), "Q1 Report");
}

#[tokio::test]
async fn test_temp_credentials_removed_on_success_and_failure() {
    let provider = planning_provider().with_failure(
        "q2",
        ProviderError::Status {
            status: 500,
            body: "backend error".to_string(),
        },
    );
    let services = create_test_services(&provider);

    for _ in 0..2 {
        let config = ReaderConfig::from_value(&config_value(&["q1", "q2"], &[], &[])).unwrap();
        let documents = services
            .config_reader("ds", config)
            .unwrap()
            .get_documents()
            .await
            .unwrap();
        assert_eq!(documents.len(), 1);
    }

    let files = provider.credential_files();
    assert_eq!(files.len(), 2);
    assert_ne!(files[0], files[1]);
    for file in files {
        assert!(!file.exists(), "{file:?} should have been removed");
    }
}

#[test]
fn test_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_reader_config(
        dir.path(),
        &["https://docs.google.com/document/d/abc/edit", "def"],
        &["plan"],
        &[],
    );

    let config = ReaderConfig::from_file(&path).unwrap();
    assert_eq!(config.document_ids, vec!["abc", "def"]);
    assert_eq!(config.inclusion_rules, vec!["plan"]);
}

#[test]
fn test_config_file_not_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reader.json");
    std::fs::write(&path, "document_ids = []").unwrap();

    assert!(matches!(
        ReaderConfig::from_file(&path),
        Err(GdocsError::InvalidDataSourceConfig(_))
    ));
}

#[test]
fn test_config_missing_keys_all_reported() {
    let err = ReaderConfig::from_value(&json!({ "document_ids": ["a"] })).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("service_account_dict"));
    assert!(message.contains("inclusion_rules"));
    assert!(message.contains("exclusion_rules"));
    assert!(!message.contains("document_ids"));
}

#[test]
fn test_config_wrong_credential_type() {
    let mut value = config_value(&["a"], &[], &[]);
    value["service_account_dict"]["type"] = json!("authorized_user");
    assert!(matches!(
        ReaderConfig::from_value(&value),
        Err(GdocsError::InvalidDataSourceConfig(_))
    ));
}
