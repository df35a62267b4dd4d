//! Query options shared by the indexing commands

use crate::cli::output::{colors, excerpt};
use crate::cli::OutputFormat;
use crate::core::index::DocumentIndex;
use crate::core::types::SearchResponse;
use clap::Args;

/// Characters of chunk text shown per hit in human output
const EXCERPT_CHARS: usize = 160;

/// Run one query against the freshly built index
#[derive(Args, Debug, Clone, Default)]
pub struct SearchOpts {
    /// Query to run after indexing (supports AND, OR, -term and field:term)
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Maximum number of results (clamped to the configured max_k)
    #[arg(long, short = 'k')]
    pub limit: Option<usize>,

    /// Treat query syntax characters as plain text
    #[arg(long)]
    pub literal: bool,
}

impl SearchOpts {
    /// Run the query if one was given
    pub fn run(&self, index: &DocumentIndex) -> crate::core::error::Result<Option<SearchResponse>> {
        match &self.query {
            Some(query) => Ok(Some(index.search(query, self.limit, self.literal)?)),
            None => Ok(None),
        }
    }
}

pub fn print_results(response: &SearchResponse, format: OutputFormat) {
    if format == OutputFormat::Json {
        return;
    }

    if response.results.is_empty() {
        println!("No results found for '{}'", colors::label(&response.query));
        return;
    }

    println!(
        "\nFound {} result(s) for '{}':\n",
        colors::number(&response.count.to_string()),
        colors::label(&response.query)
    );

    for (i, result) in response.results.iter().enumerate() {
        println!(
            "[{}] {} {} {}",
            colors::rank(&(i + 1).to_string()),
            colors::title(&result.title),
            colors::id(&format!("{}#{}", result.doc_id, result.chunk_index)),
            colors::dim(&format!("(score: {:.2})", result.score))
        );
        println!("    {}", colors::dim(&excerpt(&result.text, EXCERPT_CHARS)));
    }
}
