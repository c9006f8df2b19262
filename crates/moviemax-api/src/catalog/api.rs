//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use bytes::Bytes;

use super::error::{CatalogError, TransportError};
use super::types::{CatalogEntry, MovieDetail};

/// Movie catalog API trait.
///
/// Abstracts the remote catalog so the list and detail managers can run
/// against in-memory fakes in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Fetches one page of the discover list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the payload has no
    /// `results` array. Malformed entries are dropped, not reported.
    async fn discover_page(&self, page: u32) -> Result<Vec<CatalogEntry>, CatalogError>;

    /// Fetches full details for one movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or strict JSON decoding fails.
    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetail, CatalogError>;

    /// Retrieves raw image bytes for an artwork path.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or returns no bytes.
    async fn image(&self, path: &str) -> Result<Bytes, TransportError>;
}
