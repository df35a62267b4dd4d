// Common test utilities and fixtures

pub mod fixtures;

// Re-export commonly used items
// Note: not every test binary uses every helper
#[allow(unused_imports)]
pub use fixtures::{doc, planning_provider, write_fixture, FIXTURE_JSON};
#[allow(unused_imports)]
pub use helpers::{
    create_test_services, credential_handle, service_account_bundle, write_credentials,
    write_reader_config,
};
