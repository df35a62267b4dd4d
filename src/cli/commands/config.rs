//! Config command - show current configuration

use crate::cli::output::print_header;
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config_file: String,
    #[serde(flatten)]
    pub config: Config,
}

pub async fn execute(
    _args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = ConfigResponse {
        config_file: XdgDirs::new().config_file().to_string_lossy().into_owned(),
        config: (*services.config).clone(),
    };
    let config = &response.config;

    match format {
        OutputFormat::Human => {
            print_header("Configuration:");
            println!("  config_file: {}", response.config_file);
            println!("  indexing:");
            println!("    chunk_size: {}", config.indexing.chunk_size);
            println!("    chunk_overlap: {}", config.indexing.chunk_overlap);
            println!("  google:");
            println!("    docs_api_base: {}", config.google.docs_api_base);
            println!("    drive_api_base: {}", config.google.drive_api_base);
            if let Some(uri) = &config.google.token_uri_override {
                println!("    token_uri_override: {uri}");
            }
            if let Some(fields) = &config.google.document_fields {
                println!("    document_fields: {fields}");
            }
            println!(
                "    default_credentials_filename: {}",
                config.google.default_credentials_filename
            );
            println!(
                "    request_timeout_sec: {}",
                config.google.request_timeout_sec
            );
            println!("  search:");
            println!("    default_k: {}", config.search.default_k);
            println!("    max_k: {}", config.search.max_k);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
