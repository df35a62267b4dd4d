//! CLI adapter for gdocs-index
//!
//! Command-line front end over `core/`. Commands read documents through
//! the same readers a library caller would use, optionally build an
//! in-memory index and run one query against it.
//!
//! ```text
//!   +------------------+
//!   |     core/        |
//!   |  (domain logic)  |
//!   +--------+---------+
//!            |
//!            v
//!   +------------------+
//!   |      cli/        |
//!   | (clap adapter)   |
//!   +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gdocs-index - read Google Docs into a searchable index
///
/// Fetch documents by id, by Drive folder or from a reader config file,
/// flatten them to text, chunk them and search them with BM25 ranking.
#[derive(Parser, Debug)]
#[command(name = "gdocs-index")]
#[command(version)]
#[command(about = "Read, chunk and search Google Docs", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Serve documents from a JSON fixture file instead of the Google APIs
    #[arg(long, global = true, env = "GDOCS_FIXTURE")]
    pub fixture: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read one document and print its text
    #[command(name = "read-document")]
    ReadDocument(commands::ReadArgs),

    /// Read the documents named in a reader config file and index them
    #[command(name = "index-documents")]
    IndexDocuments(commands::IndexDocumentsArgs),

    /// List the Docs documents in a Drive folder
    #[command(name = "list-folder")]
    ListFolder(commands::ListFolderArgs),

    /// Read every document in a Drive folder and index it
    #[command(name = "index-folder")]
    IndexFolder(commands::IndexFolderArgs),

    /// Check a credential bundle or a reader config file
    #[command(name = "validate-credentials")]
    ValidateCredentials(commands::ValidateArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  gdocs-index completions bash > ~/.local/share/bash-completion/completions/gdocs-index
    ///   zsh:   gdocs-index completions zsh > ~/.zfunc/_gdocs-index
    ///   fish:  gdocs-index completions fish > ~/.config/fish/completions/gdocs-index.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::provider::InMemoryProvider;
    use crate::core::services::Services;
    use std::sync::Arc;

    // Completions don't need services
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let config = Config::load()?;
    config.log_config();

    let services = match &cli.fixture {
        Some(path) => {
            tracing::info!("Serving documents from fixture {:?}", path);
            let provider = InMemoryProvider::from_fixture_file(path)?;
            Arc::new(Services::with_factory(config, Arc::new(provider)))
        }
        None => Arc::new(Services::new(config)),
    };

    match cli.command {
        Commands::ReadDocument(args) => commands::read::execute(args, &services, cli.format).await,
        Commands::IndexDocuments(args) => {
            commands::index::execute_documents(args, &services, cli.format).await
        }
        Commands::ListFolder(args) => {
            commands::folder::execute_list(args, &services, cli.format).await
        }
        Commands::IndexFolder(args) => {
            commands::index::execute_folder(args, &services, cli.format).await
        }
        Commands::ValidateCredentials(args) => {
            commands::validate::execute(args, &services, cli.format).await
        }
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format).await,
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
