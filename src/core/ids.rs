//! Document and folder identifier parsing.
//!
//! Users paste either a bare id or the URL from the browser bar; both
//! are accepted.

use crate::core::error::{GdocsError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static DOCUMENT_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/document(?:/u/\d+)?/d/([A-Za-z0-9_-]+)").unwrap());

static FOLDER_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/folders/([A-Za-z0-9_-]+)").unwrap());

static ID_QUERY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[?&]id=([A-Za-z0-9_-]+)").unwrap());

static BARE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

fn parse_with(input: &str, kind: &str, patterns: &[&Regex]) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(GdocsError::InvalidId(format!("{kind} id cannot be empty")));
    }

    if BARE_ID.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    patterns
        .iter()
        .find_map(|re| re.captures(trimmed))
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| GdocsError::InvalidId(format!("not a {kind} id or URL: {trimmed}")))
}

/// Accept a bare document id or a `.../document/d/<id>/...` URL
pub fn parse_document_id(input: &str) -> Result<String> {
    parse_with(input, "document", &[&*DOCUMENT_URL])
}

/// Accept a bare folder id, a `.../folders/<id>` URL or an `?id=<id>` URL
pub fn parse_folder_id(input: &str) -> Result<String> {
    parse_with(input, "folder", &[&*FOLDER_URL, &*ID_QUERY])
}
