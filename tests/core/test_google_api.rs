// End-to-end reads against a mock Google API
//
// A real RSA key signs the JWT assertion; the mock token endpoint
// returns a bearer token that the Docs and Drive mocks require.

use gdocs_index::core::config::Config;
use gdocs_index::core::credentials::{CredentialHandle, CredentialResolver};
use gdocs_index::core::provider::GoogleProviderFactory;
use gdocs_index::core::reader::{DocumentReader, ReaderConfig};
use gdocs_index::core::rules::TitleRules;
use gdocs_index::core::services::Services;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_KEY: &str = include_str!("../fixtures/test_rsa_key.pem");

fn bundle(server: &MockServer) -> Value {
    json!({
        "type": "service_account",
        "project_id": "demo",
        "private_key_id": "kid-1",
        "private_key": TEST_KEY,
        "client_email": "reader@demo.iam.gserviceaccount.com",
        "client_id": "1",
        "auth_uri": "https://accounts.google.com/o/oauth2/auth",
        "token_uri": format!("{}/token", server.uri()),
        "auth_provider_x509_cert_url": "https://www.googleapis.com/oauth2/v1/certs",
        "client_x509_cert_url": "https://www.googleapis.com/robot/v1/metadata/x509/reader",
        "universe_domain": "googleapis.com"
    })
}

fn handle(server: &MockServer) -> CredentialHandle {
    CredentialResolver::without_env()
        .resolve_from_dict(&bundle(server))
        .unwrap()
}

fn services(server: &MockServer) -> Services {
    let mut config = Config::default();
    config.google.docs_api_base = server.uri();
    config.google.drive_api_base = server.uri();
    let factory = GoogleProviderFactory::new(config.google.clone());
    Services::with_factory(config, Arc::new(factory))
}

fn paragraph_doc(title: &str, text: &str) -> Value {
    json!({
        "title": title,
        "body": { "content": [
            { "paragraph": { "elements": [ { "textRun": { "content": text } } ] } }
        ] }
    })
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains(
            "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
        ))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.mock",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .mount(server)
        .await;
}

async fn mount_doc(server: &MockServer, id: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/documents/{id}")))
        .and(header("authorization", "Bearer ya29.mock"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_single_document_with_token_exchange() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_doc(&server, "doc-1", 200, paragraph_doc("Handbook", "  Hello from the API.\n")).await;

    let document = services(&server)
        .single_reader("doc-1", handle(&server))
        .unwrap()
        .read()
        .await
        .unwrap();

    assert_eq!(document.text, "Hello from the API.");
    assert_eq!(document.title(), "Handbook");
}

#[tokio::test]
async fn test_config_reader_skips_forbidden_and_failing_documents() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_doc(&server, "ok", 200, paragraph_doc("Kept", "visible")).await;
    mount_doc(&server, "private", 403, json!({ "error": { "code": 403 } })).await;
    mount_doc(&server, "broken", 500, json!({ "error": { "code": 500 } })).await;

    let config = ReaderConfig::from_value(&json!({
        "service_account_dict": bundle(&server),
        "document_ids": ["private", "ok", "broken"],
        "inclusion_rules": [],
        "exclusion_rules": [],
    }))
    .unwrap();

    let documents = services(&server)
        .config_reader("ds", config)
        .unwrap()
        .get_documents()
        .await
        .unwrap();

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].text, "visible");
}

#[tokio::test]
async fn test_folder_listing_and_read() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .and(query_param(
            "q",
            "'F1' in parents and mimeType='application/vnd.google-apps.document'",
        ))
        .and(header("authorization", "Bearer ya29.mock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [
                { "id": "b", "name": "Beta plan" },
                { "id": "a", "name": "Alpha draft" }
            ]
        })))
        .mount(&server)
        .await;
    mount_doc(&server, "a", 200, paragraph_doc("Alpha draft", "first")).await;
    mount_doc(&server, "b", 200, paragraph_doc("Beta plan", "second")).await;

    let services = services(&server);
    let files = services.list_folder("F1", &handle(&server)).await.unwrap();
    let ids: Vec<&str> = files.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);

    let documents = services
        .folder_reader("ds", "F1", handle(&server), TitleRules::new(["plan", "draft"], ["alpha"]))
        .unwrap()
        .get_documents()
        .await
        .unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].text, "second");
}

#[tokio::test]
async fn test_token_endpoint_failure_skips_documents() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_grant"))
        .mount(&server)
        .await;

    let config = ReaderConfig::from_value(&json!({
        "service_account_dict": bundle(&server),
        "document_ids": ["a"],
        "inclusion_rules": [],
        "exclusion_rules": [],
    }))
    .unwrap();

    let documents = services(&server)
        .config_reader("ds", config)
        .unwrap()
        .get_documents()
        .await
        .unwrap();
    assert!(documents.is_empty());
}
