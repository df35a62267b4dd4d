//! Read command - fetch one document and print its text

use crate::cli::output::{colors, truncate_preview, PREVIEW_CHARS};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::META_TITLE;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Document id or Google Docs URL
    pub document: String,

    /// Service-account credential file
    #[arg(long, short = 'c')]
    pub credentials: Option<PathBuf>,

    /// Print the whole text instead of a preview
    #[arg(long)]
    pub full: bool,
}

#[derive(Debug, Serialize)]
pub struct ReadResponse {
    pub document_id: String,
    pub title: String,
    pub characters: usize,
    pub text: String,
    pub truncated: bool,
}

pub async fn execute(
    args: ReadArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let credentials = services.resolve_credentials(args.credentials.as_deref())?;
    let reader = services.single_reader(&args.document, credentials)?;
    let document = reader.read().await?;

    let characters = document.text.chars().count();
    let text = if args.full {
        document.text.clone()
    } else {
        truncate_preview(&document.text, PREVIEW_CHARS)
    };

    let response = ReadResponse {
        document_id: reader.document_id().to_string(),
        title: document
            .metadata
            .get(META_TITLE)
            .cloned()
            .unwrap_or_default(),
        characters,
        truncated: !args.full && characters > PREVIEW_CHARS,
        text,
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{} {}",
                colors::title(&response.title),
                colors::id(&format!("({})", response.document_id))
            );
            println!(
                "{} characters\n",
                colors::number(&response.characters.to_string())
            );
            println!("{}", response.text);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
