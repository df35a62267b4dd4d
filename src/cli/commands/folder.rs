//! List-folder command - show the Docs documents in a Drive folder

use crate::cli::output::{colors, print_warning};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::DriveFile;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ListFolderArgs {
    /// Drive folder id or URL
    pub folder: String,

    /// Service-account credential file
    #[arg(long, short = 'c')]
    pub credentials: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct ListFolderResponse {
    pub folder: String,
    pub count: usize,
    pub files: Vec<DriveFile>,
}

pub async fn execute_list(
    args: ListFolderArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let credentials = services.resolve_credentials(args.credentials.as_deref())?;
    let files = services.list_folder(&args.folder, &credentials).await?;

    let response = ListFolderResponse {
        folder: args.folder,
        count: files.len(),
        files,
    };

    match format {
        OutputFormat::Human => {
            if response.files.is_empty() {
                print_warning(&format!("No documents found in folder {}", response.folder));
            } else {
                println!(
                    "{} document(s) in {}:\n",
                    colors::number(&response.count.to_string()),
                    colors::id(&response.folder)
                );
                for file in &response.files {
                    println!("  {}  {}", colors::id(&file.id), colors::title(&file.name));
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
