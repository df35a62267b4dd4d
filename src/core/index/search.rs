//! BM25 search over a `DocumentIndex`.

use crate::core::error::{GdocsError, Result};
use crate::core::index::query::{preprocess_query, validate_query_fields};
use crate::core::index::DocumentIndex;
use crate::core::types::{SearchResponse, SearchResult};
use std::time::Instant;
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, EmptyQuery, Occur, PhraseQuery, Query, QueryParser, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Value};
use tantivy::tokenizer::{Token, TokenStream};
use tantivy::{ReloadPolicy, TantivyDocument, Term};

impl DocumentIndex {
    /// Run a BM25 query over chunk text and titles.
    ///
    /// `k` defaults to the index's `default_k` and is clamped to
    /// `[1, max_k]`. With `literal`, the query is not parsed: its tokens
    /// are matched as a phrase in `text` or `title`.
    pub fn search(&self, query: &str, k: Option<usize>, literal: bool) -> Result<SearchResponse> {
        let start = Instant::now();

        if query.trim().is_empty() {
            return Err(GdocsError::InvalidQuery(
                "Query cannot be empty".to_string(),
            ));
        }

        let limit = k.unwrap_or(self.default_k).clamp(1, self.max_k);
        let fields = *self.fields();

        let reader = self
            .index()
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| GdocsError::SearchFailed(format!("Failed to create reader: {e}")))?;
        let searcher = reader.searcher();

        let parsed = if literal {
            self.literal_query(query, &[fields.text, fields.title])?
        } else {
            validate_query_fields(query)?;
            let parser = QueryParser::for_index(self.index(), vec![fields.text, fields.title]);
            parser
                .parse_query(&preprocess_query(query))
                .map_err(|e| GdocsError::InvalidQuery(format!("Failed to parse query: {e}")))?
        };

        let top_docs = searcher
            .search(&parsed, &TopDocs::with_limit(limit))
            .map_err(|e| GdocsError::SearchFailed(format!("Search failed: {e}")))?;

        let mut results = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher.doc(address).map_err(|e| {
                GdocsError::SearchFailed(format!("Failed to retrieve chunk: {e}"))
            })?;

            results.push(SearchResult {
                score,
                text: stored_str(&doc, fields.text),
                title: stored_str(&doc, fields.title),
                doc_id: stored_str(&doc, fields.doc_id),
                chunk_index: doc
                    .get_first(fields.chunk_index)
                    .and_then(|v| v.as_u64())
                    .unwrap_or(0) as usize,
            });
        }

        let count = results.len();
        tracing::debug!(query, count, "search complete");

        Ok(SearchResponse {
            query: query.to_string(),
            results,
            count,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

impl DocumentIndex {
    /// Phrase (or single term) per field, OR-ed across fields. Input
    /// with no indexable tokens matches nothing.
    fn literal_query(&self, query: &str, fields: &[Field]) -> Result<Box<dyn Query>> {
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::with_capacity(fields.len());

        for &field in fields {
            let mut analyzer = self.index().tokenizer_for_field(field).map_err(|e| {
                GdocsError::SearchFailed(format!("Failed to load tokenizer: {e}"))
            })?;
            let mut stream = analyzer.token_stream(query);
            let mut terms = Vec::new();
            stream.process(&mut |token: &Token| {
                terms.push(Term::from_field_text(field, &token.text));
            });

            let clause: Box<dyn Query> = match terms.len() {
                0 => continue,
                1 => Box::new(TermQuery::new(terms.remove(0), IndexRecordOption::WithFreqs)),
                _ => Box::new(PhraseQuery::new(terms)),
            };
            clauses.push((Occur::Should, clause));
        }

        if clauses.is_empty() {
            return Ok(Box::new(EmptyQuery));
        }
        Ok(Box::new(BooleanQuery::new(clauses)))
    }
}

fn stored_str(doc: &TantivyDocument, field: Field) -> String {
    doc.get_first(field)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}
