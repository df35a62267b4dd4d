// Single-document reader through the service container

use crate::common::{create_test_services, credential_handle, planning_provider};
use gdocs_index::core::error::GdocsError;
use gdocs_index::core::reader::DocumentReader;
use gdocs_index::core::types::{META_DOC_ID, META_TITLE};

#[tokio::test]
async fn test_read_document_by_url() {
    let provider = planning_provider();
    let services = create_test_services(&provider);

    let reader = services
        .single_reader("https://docs.google.com/document/d/q1/edit", credential_handle())
        .unwrap();
    let documents = reader.get_documents().await.unwrap();

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].text, "Revenue grew twelve percent.Churn fell.");
    assert_eq!(documents[0].metadata.get(META_TITLE).unwrap(), "Q1 Report");
    assert_eq!(documents[0].metadata.get(META_DOC_ID).unwrap(), "q1");
    assert_eq!(provider.fetched(), vec!["q1"]);
}

#[tokio::test]
async fn test_read_missing_document() {
    let services = create_test_services(&planning_provider());
    let reader = services.single_reader("nope", credential_handle()).unwrap();

    let err = reader.read().await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, GdocsError::DocumentNotFound(_)));
}

#[test]
fn test_read_rejects_malformed_id() {
    let services = create_test_services(&planning_provider());
    let result = services.single_reader("has spaces in it", credential_handle());
    assert!(matches!(result, Err(GdocsError::InvalidId(_))));
}

#[tokio::test]
async fn test_document_fields_forwarded() {
    let provider = planning_provider();
    let mut config = gdocs_index::Config::default();
    config.google.document_fields = Some("title,body".to_string());
    let services =
        gdocs_index::Services::with_factory(config, std::sync::Arc::new(provider.clone()));

    services
        .single_reader("notes", credential_handle())
        .unwrap()
        .read()
        .await
        .unwrap();

    assert_eq!(provider.fields_seen(), vec![Some("title,body".to_string())]);
}
