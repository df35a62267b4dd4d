// Folder reader over the in-memory provider

use crate::common::{create_test_services, credential_handle, planning_provider};
use gdocs_index::core::reader::DocumentReader;
use gdocs_index::core::rules::TitleRules;
use gdocs_index::core::types::{
    META_DATA_SOURCE, META_FILE_ID, META_FILE_NAME, META_SOURCE_TYPE, SOURCE_GOOGLE_DRIVE,
};

#[tokio::test]
async fn test_folder_documents_in_listing_order() {
    let provider = planning_provider();
    let services = create_test_services(&provider);

    let reader = services
        .folder_reader(
            "planning-ds",
            "https://drive.google.com/drive/folders/planning",
            credential_handle(),
            TitleRules::default(),
        )
        .unwrap();
    let documents = reader.get_documents().await.unwrap();

    let ids: Vec<&str> = documents
        .iter()
        .map(|d| d.metadata.get(META_FILE_ID).unwrap().as_str())
        .collect();
    assert_eq!(ids, vec!["q1", "q2", "notes"]);

    let meta = &documents[2].metadata;
    assert_eq!(meta.get(META_FILE_NAME).unwrap(), "Team notes");
    assert_eq!(meta.get(META_DATA_SOURCE).unwrap(), "planning-ds");
    assert_eq!(meta.get(META_SOURCE_TYPE).unwrap(), SOURCE_GOOGLE_DRIVE);
    assert_eq!(provider.listed(), vec!["planning"]);
}

#[tokio::test]
async fn test_folder_rules_exclusion_wins() {
    let provider = planning_provider();
    let services = create_test_services(&provider);

    let reader = services
        .folder_reader(
            "ds",
            "planning",
            credential_handle(),
            TitleRules::new(["report"], ["draft"]),
        )
        .unwrap();
    let documents = reader.get_documents().await.unwrap();

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].title(), "Q1 Report");
    // Filtered files are never fetched
    assert_eq!(provider.fetched(), vec!["q1"]);
}

#[tokio::test]
async fn test_unknown_folder_is_empty() {
    let services = create_test_services(&planning_provider());
    let reader = services
        .folder_reader("ds", "elsewhere", credential_handle(), TitleRules::default())
        .unwrap();
    assert!(reader.get_documents().await.unwrap().is_empty());
}
