//! Destination for chunks produced by a reader.

use crate::core::error::{GdocsError, Result};
use crate::core::types::Chunk;

/// Anything that can take chunks off a reader's hands.
///
/// Backends that cannot accept chunks keep the default `add_chunks`,
/// which reports `IndexBackendUnsupported`. Readers log that as a
/// warning and carry on.
pub trait IndexBackend: Send {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Add chunks, returning how many were accepted
    fn add_chunks(&mut self, chunks: &[Chunk]) -> Result<usize> {
        let _ = chunks;
        Err(GdocsError::IndexBackendUnsupported(self.name().to_string()))
    }
}
