//! CLI test helpers
//!
//! Arc<Services> wrappers matching the CLI execute() signatures.

use crate::common::{create_test_services, write_credentials};
use gdocs_index::core::provider::InMemoryProvider;
use gdocs_index::core::services::Services;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Services plus a directory holding a credential file
pub struct CliFixture {
    pub services: Arc<Services>,
    pub credentials: PathBuf,
    pub dir: TempDir,
}

/// Create CLI test services over `provider`
pub fn create_cli_fixture(provider: &InMemoryProvider) -> CliFixture {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let credentials = write_credentials(dir.path());
    CliFixture {
        services: Arc::new(create_test_services(provider)),
        credentials,
        dir,
    }
}
