//! Path-segment checks that run before any daemon call.

use crate::error::{ExplorerError, Result};

/// Length of a hex-encoded block hash or transaction id.
pub const HASH_HEX_LEN: usize = 64;

/// What a search term resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTarget {
    Block(String),
    Height { height: u64, term: String },
}

impl SearchTarget {
    /// Route the search redirects to; heights keep the term as typed.
    pub fn location(&self) -> String {
        match self {
            Self::Block(hash) => format!("/block/{hash}"),
            Self::Height { term, .. } => format!("/b/{term}"),
        }
    }
}

/// Accepts a 64-character hex hash, with or without a leading `/`.
pub fn parse_hash(segment: &str) -> Result<&str> {
    let hash = segment.strip_prefix('/').unwrap_or(segment);
    if hash.len() != HASH_HEX_LEN || hex::decode(hash).is_err() {
        return Err(ExplorerError::InvalidHash(hash.to_string()));
    }
    Ok(hash)
}

/// Accepts a non-negative height in base 10, or `0x`/`0o`/`0b` prefixed.
pub fn parse_height(segment: &str) -> Result<u64> {
    let raw = segment.strip_prefix('/').unwrap_or(segment);
    let invalid = || ExplorerError::InvalidHeight(raw.to_string());

    let unsigned = raw.strip_prefix('+').unwrap_or(raw);
    let (digits, radix) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (&unsigned[2..], 16),
        Some("0o") | Some("0O") => (&unsigned[2..], 8),
        Some("0b") | Some("0B") => (&unsigned[2..], 2),
        _ => (unsigned, 10),
    };

    // from_str_radix tolerates its own sign prefix; heights never carry one here.
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(invalid());
    }
    u64::from_str_radix(digits, radix).map_err(|_| invalid())
}

/// Resolves a search term: hash first, then height.
pub fn parse_search(term: &str) -> Result<SearchTarget> {
    let term = term.strip_prefix('/').unwrap_or(term).trim();
    if let Ok(hash) = parse_hash(term) {
        return Ok(SearchTarget::Block(hash.to_string()));
    }
    if let Ok(height) = parse_height(term) {
        return Ok(SearchTarget::Height {
            height,
            term: term.to_string(),
        });
    }
    Err(ExplorerError::UnknownSearchTerm(term.to_string()))
}
