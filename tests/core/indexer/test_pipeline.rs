// Index builds through the service container

use crate::common::{create_test_services, planning_provider};
use gdocs_index::core::types::{TextDocument, META_DOC_ID, META_TITLE};
use std::collections::BTreeMap;

fn document(title: &str, id: &str, text: &str) -> TextDocument {
    let mut metadata = BTreeMap::new();
    metadata.insert(META_TITLE.to_string(), title.to_string());
    metadata.insert(META_DOC_ID.to_string(), id.to_string());
    TextDocument::new(text, metadata)
}

#[test]
fn test_chunk_metadata_copied_from_document() {
    let services = create_test_services(&planning_provider());
    let text = "word ".repeat(40);
    let chunks = services
        .chunker()
        .unwrap()
        .chunk_document(&document("Long", "d-long", &text));

    assert!(chunks.len() > 1);
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.chunk_index, i);
        assert_eq!(chunk.metadata.get(META_DOC_ID).unwrap(), "d-long");
        assert_eq!(chunk.metadata.get(META_TITLE).unwrap(), "Long");
    }
}

#[test]
fn test_build_index_stats() {
    let services = create_test_services(&planning_provider());
    let documents = vec![
        document("A", "a", &"alpha ".repeat(30)),
        document("B", "b", "beta"),
        document("Empty", "e", ""),
    ];

    let (index, stats) = services.build_index(&documents).unwrap();
    assert_eq!(stats.documents_indexed, 2);
    assert_eq!(stats.chunks_created, index.num_chunks());
    assert!(stats.chunks_created >= 3);
}
