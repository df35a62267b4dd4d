//! Validate-credentials command
//!
//! Checks a credential file (or, with `--reader-config`, a whole reader
//! config) without calling any remote API.

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::credentials::{CredentialHandle, CredentialResolver, CredentialSource};
use crate::core::reader::ReaderConfig;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Credential file (defaults to the configured default filename, then
    /// GOOGLE_APPLICATION_CREDENTIALS)
    pub credentials: Option<PathBuf>,

    /// Validate a reader config file instead
    #[arg(long, conflicts_with = "credentials")]
    pub reader_config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub source: String,
    pub client_email: String,
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_count: Option<usize>,
}

pub async fn execute(
    args: ValidateArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = match &args.reader_config {
        Some(path) => {
            let config = ReaderConfig::from_file(path)?;
            let handle =
                CredentialResolver::without_env().resolve_from_dict(&config.service_account_dict)?;
            describe(
                &handle,
                path.display().to_string(),
                Some(config.document_ids.len()),
            )
        }
        None => {
            let handle = services.resolve_credentials(args.credentials.as_deref())?;
            let source = match handle.source() {
                CredentialSource::File(path) => path.display().to_string(),
                CredentialSource::Inline => "inline".to_string(),
            };
            describe(&handle, source, None)
        }
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{} {}",
                colors::success("Valid credentials"),
                colors::dim(&format!("({})", response.source))
            );
            println!("  client_email: {}", response.client_email);
            println!("  project_id:   {}", response.project_id);
            if let Some(count) = response.document_count {
                println!("  documents:    {}", colors::number(&count.to_string()));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

fn describe(handle: &CredentialHandle, source: String, document_count: Option<usize>) -> ValidateResponse {
    ValidateResponse {
        valid: true,
        source,
        client_email: handle.client_email().to_string(),
        project_id: handle.key().project_id.clone(),
        document_count,
    }
}
