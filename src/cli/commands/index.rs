//! Index commands - read documents into an in-memory index
//!
//! The index lives for the duration of the command; pass `--query` to
//! search it before it is dropped.

use crate::cli::commands::search::{print_results, SearchOpts};
use crate::cli::output::{colors, format_duration};
use crate::cli::OutputFormat;
use crate::core::index::DocumentIndex;
use crate::core::reader::{DocumentReader, ReaderConfig, TracingNotifier};
use crate::core::rules::TitleRules;
use crate::core::services::Services;
use crate::core::types::SearchResponse;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Args, Debug)]
pub struct IndexDocumentsArgs {
    /// Reader config file (JSON with service_account_dict, document_ids,
    /// inclusion_rules and exclusion_rules)
    pub config: PathBuf,

    /// Data source id recorded in chunk metadata
    #[arg(long, default_value = "cli")]
    pub data_source: String,

    /// Suppress progress output
    #[arg(long, short = 'Q')]
    pub quiet: bool,

    #[command(flatten)]
    pub search: SearchOpts,
}

#[derive(Args, Debug)]
pub struct IndexFolderArgs {
    /// Drive folder id or URL
    pub folder: String,

    /// Service-account credential file
    #[arg(long, short = 'c')]
    pub credentials: Option<PathBuf>,

    /// Keep only documents whose title contains one of these (repeatable)
    #[arg(long, short = 'i')]
    pub include: Vec<String>,

    /// Drop documents whose title contains one of these (repeatable)
    #[arg(long, short = 'e')]
    pub exclude: Vec<String>,

    /// Data source id recorded in chunk metadata
    #[arg(long, default_value = "cli")]
    pub data_source: String,

    /// Suppress progress output
    #[arg(long, short = 'Q')]
    pub quiet: bool,

    #[command(flatten)]
    pub search: SearchOpts,
}

/// Indexing result response
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub source: String,
    pub data_source: String,
    pub documents_read: usize,
    pub chunks_created: usize,
    pub indexed: bool,
    pub duration_secs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchResponse>,
}

/// Execute `index-documents`
pub async fn execute_documents(
    args: IndexDocumentsArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ReaderConfig::from_file(&args.config)?;
    let reader = services.config_reader(&args.data_source, config)?;

    if !args.quiet && format == OutputFormat::Human {
        eprintln!(
            "Indexing {} document(s) from {}...",
            colors::number(&reader.config().document_ids.len().to_string()),
            colors::label(&args.config.display().to_string())
        );
    }

    let source = args.config.to_string_lossy().into_owned();
    index_and_report(&reader, services, source, args.data_source, &args.search, format).await
}

/// Execute `index-folder`
pub async fn execute_folder(
    args: IndexFolderArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let credentials = services.resolve_credentials(args.credentials.as_deref())?;
    let rules = TitleRules::new(&args.include, &args.exclude);
    let reader = services.folder_reader(&args.data_source, &args.folder, credentials, rules)?;

    if !args.quiet && format == OutputFormat::Human {
        eprintln!("Indexing folder {}...", colors::id(&args.folder));
    }

    index_and_report(
        &reader,
        services,
        args.folder,
        args.data_source,
        &args.search,
        format,
    )
    .await
}

async fn index_and_report(
    reader: &dyn DocumentReader,
    services: &Services,
    source: String,
    data_source: String,
    search: &SearchOpts,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let mut index = DocumentIndex::create()?
        .with_limits(services.config.search.default_k, services.config.search.max_k);

    let report = reader
        .process(&mut index, Some(&TracingNotifier), &data_source)
        .await?;
    let duration_secs = start.elapsed().as_secs_f64();

    let response = IndexResponse {
        source,
        data_source,
        documents_read: report.documents,
        chunks_created: report.chunks,
        indexed: report.indexed,
        duration_secs,
        search: search.run(&index)?,
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{} {} document(s) ({} chunks) in {}",
                colors::success("Indexed"),
                colors::number(&response.documents_read.to_string()),
                colors::number(&response.chunks_created.to_string()),
                colors::number(&format_duration(response.duration_secs))
            );
            if let Some(results) = &response.search {
                print_results(results, format);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
