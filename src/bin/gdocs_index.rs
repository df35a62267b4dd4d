//! gdocs-index CLI - read Google Docs into a searchable index
//!
//! # Examples
//!
//! ```bash
//! # Print one document
//! gdocs-index read-document https://docs.google.com/document/d/<id>/edit -c key.json
//!
//! # Index a folder and search it
//! gdocs-index index-folder <folder-id> -c key.json --exclude draft --query "roadmap"
//!
//! # Index the documents named in a reader config
//! gdocs-index index-documents reader.json --format json
//! ```
//!
//! Logs go to stderr. `RUST_LOG` overrides the default filter and
//! `GDOCS_LOG_FORMAT=json` switches to JSON log lines.

use clap::Parser;
use gdocs_index::cli::output::print_error;
use gdocs_index::cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging to stderr so stdout stays clean for `--format json`
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gdocs_index=info"));
    let json = std::env::var("GDOCS_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
