//! Indexer layer tests
//!
//! UTF-8 safety for chunking documents with emoji, multi-byte
//! characters and mixed scripts.

mod test_multibyte;
mod test_pipeline;
