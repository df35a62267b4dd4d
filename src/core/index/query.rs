//! Query preprocessing for the chunk index.
//!
//! Document text is prose, not code, so only a few syntax hazards need
//! handling before Tantivy's parser sees a query:
//! - Curly braces are escaped (`{x}` -> `\{x\}`)
//! - Colon tokens that do not name a field (`ISO:8601:2004`, `3:1`,
//!   `https://...`) are quoted so they are not read as field prefixes
//!
//! Literal searches bypass the parser entirely (see `search.rs`).

use crate::core::error::GdocsError;
use once_cell::sync::Lazy;
use regex::Regex;

static MULTI_COLON_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+:\w+:\w+").unwrap());

/// Fields a query may target explicitly
pub const SEARCHABLE_FIELDS: [&str; 2] = ["text", "title"];

static FIELD_PREFIX_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+):([^\s:])").unwrap());

/// Preprocess a query string for Tantivy.
///
/// # Examples
///
/// ```
/// use gdocs_index::core::index::preprocess_query;
///
/// assert_eq!(preprocess_query("{draft}"), "\\{draft\\}");
/// assert_eq!(preprocess_query("ISO:8601:2004"), "\"ISO:8601:2004\"");
/// assert_eq!(preprocess_query("title:report"), "title:report");
/// ```
pub fn preprocess_query(query: &str) -> String {
    let trimmed = query.trim();

    if trimmed.is_empty() {
        return String::new();
    }

    if trimmed.len() > 1 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        let inner = &trimmed[1..trimmed.len() - 1];
        return format!("\"{}\"", escape_braces(inner));
    }

    quote_colon_tokens(&escape_braces(trimmed))
}

/// Quote space-separated tokens whose colon prefix is not a searchable
/// field. Tokens that already start or end a phrase are left alone.
fn quote_colon_tokens(s: &str) -> String {
    s.split(' ')
        .map(|token| {
            let bare = token.trim_start_matches(['+', '-']);
            let Some((field, rest)) = bare.split_once(':') else {
                return token.to_string();
            };
            let is_field =
                SEARCHABLE_FIELDS.contains(&field) && !MULTI_COLON_PATTERN.is_match(bare);
            if is_field
                || field.is_empty()
                || rest.is_empty()
                || field.starts_with(['"', '('])
                || token.ends_with('"')
            {
                token.to_string()
            } else {
                let sign = &token[..token.len() - bare.len()];
                format!("{sign}\"{bare}\"")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_braces(s: &str) -> String {
    s.replace('{', "\\{").replace('}', "\\}")
}

/// Reject queries that target a field the index does not have.
///
/// `tittle:x` would otherwise fail deep inside the parser with an
/// unhelpful message.
pub fn validate_query_fields(query: &str) -> Result<(), GdocsError> {
    let trimmed = query.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') {
        return Ok(());
    }

    for cap in FIELD_PREFIX_PATTERN.captures_iter(trimmed) {
        let Some(whole) = cap.get(0) else { continue };
        let field = &cap[1];

        // Only a token start counts as a field prefix
        let preceded_by_space = trimmed[..whole.start()]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace);
        if !preceded_by_space {
            continue;
        }

        if SEARCHABLE_FIELDS.contains(&field)
            || matches!(field, "http" | "https" | "mailto")
            || field.chars().all(|c| c.is_ascii_digit())
            || MULTI_COLON_PATTERN.is_match(&trimmed[whole.start()..])
        {
            continue;
        }

        let hint = match suggest_field_alias(field) {
            Some(s) => format!(" (did you mean '{s}'?)"),
            None => String::new(),
        };
        return Err(GdocsError::InvalidQuery(format!(
            "unknown field '{field}'{hint}; valid fields: {}",
            SEARCHABLE_FIELDS.join(", ")
        )));
    }

    Ok(())
}

fn suggest_field_alias(field: &str) -> Option<&'static str> {
    match field.to_lowercase().as_str() {
        "name" | "heading" | "tittle" | "titel" => Some("title"),
        "body" | "content" | "contents" => Some("text"),
        _ => None,
    }
}
