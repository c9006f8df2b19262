//! Detail manager: loads one movie's full record.

use tracing::instrument;

use super::handler::ResultHandler;
use crate::catalog::{CatalogError, LocalCatalogApi, MovieDetail};

/// Fetches movie details by id.
///
/// Holds no per-request state, so calls for different ids may run
/// concurrently and each completes independently.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct DetailManager<'a, A> {
    api: &'a A,
    handler: Option<ResultHandler<MovieDetail>>,
}

impl<'a, A: LocalCatalogApi + Sync> DetailManager<'a, A> {
    /// Creates a detail manager over `api`.
    #[must_use]
    pub const fn new(api: &'a A) -> Self {
        Self { api, handler: None }
    }

    /// Installs the handler for [`Self::load_details`], replacing any previous one.
    pub fn set_handler(&mut self, handler: ResultHandler<MovieDetail>) {
        self.handler = Some(handler);
    }

    /// Fetches the record for `movie_id`.
    ///
    /// # Errors
    ///
    /// Returns the transport or decode error from the detail endpoint.
    #[instrument(skip(self))]
    pub async fn fetch_details(&self, movie_id: u64) -> Result<MovieDetail, CatalogError> {
        self.api.movie_details(movie_id).await.inspect_err(|err| {
            tracing::warn!(movie_id, error = %err, "movie details fetch failed");
        })
    }

    /// Fetches the record for `movie_id` and delivers the outcome to the handler.
    pub async fn load_details(&self, movie_id: u64) {
        let result = self.fetch_details(movie_id).await;
        match self.handler {
            Some(ref handler) => handler.dispatch(result),
            None => tracing::debug!(movie_id, "no detail handler installed, result dropped"),
        }
    }
}
