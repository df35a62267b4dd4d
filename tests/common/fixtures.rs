// Test fixtures for integration testing

use gdocs_index::core::provider::InMemoryProvider;
use gdocs_index::core::types::{DriveFile, StructuredDocument};
use std::path::{Path, PathBuf};

/// Fixture file in the Docs API response shape
#[allow(dead_code)]
pub const FIXTURE_JSON: &str = r#"{
  "documents": {
    "doc-roadmap": {
      "documentId": "doc-roadmap",
      "title": "Roadmap 2025",
      "revisionId": "ignored",
      "body": {
        "content": [
          { "sectionBreak": {} },
          { "paragraph": { "elements": [
            { "textRun": { "content": "Ship offline search in March.\n" } }
          ] } },
          { "paragraph": { "elements": [
            { "textRun": { "content": "Migrate billing " } },
            { "inlineObjectElement": { "inlineObjectId": "img-1" } },
            { "textRun": { "content": "to the new ledger.\n" } }
          ] } }
        ]
      }
    },
    "doc-draft": {
      "title": "Draft budget",
      "body": { "content": [
        { "paragraph": { "elements": [ { "textRun": { "content": "Hardware spend doubles.\n" } } ] } }
      ] }
    },
    "doc-blank": {
      "title": "Blank page",
      "body": { "content": [ { "paragraph": { "elements": [ { "textRun": { "content": "\n" } } ] } } ] }
    }
  },
  "folders": {
    "folder-1": [
      { "id": "doc-roadmap", "name": "Roadmap 2025" },
      { "id": "doc-draft", "name": "Draft budget" },
      { "id": "doc-blank", "name": "Blank page" },
      { "id": "doc-missing", "name": "Deleted notes" }
    ]
  }
}"#;

/// Write `FIXTURE_JSON` to `dir/fixture.json`
#[allow(dead_code)]
pub fn write_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("fixture.json");
    std::fs::write(&path, FIXTURE_JSON).expect("Failed to write fixture");
    path
}

/// Shorthand for a structured document
#[allow(dead_code)]
pub fn doc(title: &str, paragraphs: &[&[&str]]) -> StructuredDocument {
    StructuredDocument::from_paragraphs(title, paragraphs)
}

fn file(id: &str, name: &str) -> DriveFile {
    DriveFile {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// Provider with a planning folder and a few standalone documents
#[allow(dead_code)]
pub fn planning_provider() -> InMemoryProvider {
    InMemoryProvider::new()
        .with_document(
            "q1",
            doc(
                "Q1 Report",
                &[&["Revenue grew ", "twelve percent."], &["Churn fell."]],
            ),
        )
        .with_document("q2", doc("Q2 report (draft)", &[&["Numbers pending."]]))
        .with_document("notes", doc("Team notes", &[&["Offsite in Lisbon."]]))
        .with_document(
            "unicode",
            doc("Localisation", &[&["Привет мир. ", "こんにちは世界。 ", "🚀🎉 launch"]]),
        )
        .with_folder(
            "planning",
            vec![
                file("q1", "Q1 Report"),
                file("q2", "Q2 report (draft)"),
                file("notes", "Team notes"),
            ],
        )
}
