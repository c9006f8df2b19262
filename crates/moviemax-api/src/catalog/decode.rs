//! JSON decoders for the detail and list endpoints.
//!
//! The detail decoder is strict: the user asked for one movie, so any
//! structural mismatch fails the whole call. The list decoder is lenient per
//! element: entries that do not fit [`CatalogEntry`] are dropped and the rest
//! of the page is kept in order.

use serde::Deserialize;
use serde::de::IgnoredAny;

use super::error::DecodeError;
use super::types::{CatalogEntry, MovieDetail};

/// Top-level shape of a paginated list response.
#[derive(Debug, Deserialize)]
struct CatalogPage {
    /// Page elements, each decoded independently.
    results: Vec<PageItem>,
}

/// One element of `results`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PageItem {
    /// Element with every required field present and correctly typed.
    Entry(WireEntry),
    /// Anything else.
    Skipped(IgnoredAny),
}

/// Wire shape of a list element.
///
/// `poster_path` must be a string here: an entry with a `null` or missing
/// poster is dropped from the page.
#[derive(Debug, Deserialize)]
struct WireEntry {
    id: u64,
    title: String,
    release_date: String,
    poster_path: String,
}

impl From<WireEntry> for CatalogEntry {
    fn from(wire: WireEntry) -> Self {
        Self {
            id: wire.id,
            title: wire.title,
            release_date: wire.release_date,
            poster_path: Some(wire.poster_path),
        }
    }
}

/// Decodes a detail-endpoint response.
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] if the payload is not JSON or any
/// required field is missing or mistyped.
pub fn decode_movie_detail(bytes: &[u8]) -> Result<MovieDetail, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decodes a list-endpoint response, dropping malformed entries.
///
/// # Errors
///
/// - [`DecodeError::Malformed`] if the payload is not valid JSON.
/// - [`DecodeError::InvalidStructure`] if the payload is JSON but has no
///   top-level `results` array.
pub fn decode_catalog_page(bytes: &[u8]) -> Result<Vec<CatalogEntry>, DecodeError> {
    let page: CatalogPage = serde_json::from_slice(bytes).map_err(|e| {
        if e.is_data() {
            DecodeError::InvalidStructure
        } else {
            DecodeError::Malformed(e)
        }
    })?;

    let total = page.results.len();
    let entries: Vec<CatalogEntry> = page
        .results
        .into_iter()
        .filter_map(|item| match item {
            PageItem::Entry(wire) => Some(CatalogEntry::from(wire)),
            PageItem::Skipped(_) => None,
        })
        .collect();

    let skipped = total.saturating_sub(entries.len());
    if skipped > 0 {
        tracing::debug!(skipped, kept = entries.len(), "dropped malformed catalog entries");
    }

    Ok(entries)
}
