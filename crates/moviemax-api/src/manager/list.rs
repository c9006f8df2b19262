//! List manager: pages through the discover endpoint for one session.

use tracing::instrument;

use super::cursor::PageCursor;
use super::handler::ResultHandler;
use crate::catalog::{CatalogEntry, CatalogError, LocalCatalogApi};

/// Fetches successive list pages for one browsing session.
///
/// The cursor advances only when a page is fetched and decoded, so a failed
/// page can be retried by calling again. Fetching takes `&mut self`, which
/// rules out two overlapping requests on the same session.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ListManager<'a, A> {
    api: &'a A,
    cursor: PageCursor,
    handler: Option<ResultHandler<Vec<CatalogEntry>>>,
}

impl<'a, A: LocalCatalogApi + Sync> ListManager<'a, A> {
    /// Creates a session starting at the first page.
    #[must_use]
    pub const fn new(api: &'a A) -> Self {
        Self::with_cursor(api, PageCursor::new())
    }

    /// Creates a session resuming from `cursor`.
    #[must_use]
    pub const fn with_cursor(api: &'a A, cursor: PageCursor) -> Self {
        Self {
            api,
            cursor,
            handler: None,
        }
    }

    /// Current cursor position.
    #[must_use]
    pub const fn cursor(&self) -> PageCursor {
        self.cursor
    }

    /// Installs the handler for [`Self::load_next_page`], replacing any previous one.
    pub fn set_handler(&mut self, handler: ResultHandler<Vec<CatalogEntry>>) {
        self.handler = Some(handler);
    }

    /// Fetches the page at the cursor and returns only that page's entries.
    ///
    /// # Errors
    ///
    /// Returns the transport or decode error; the cursor is left unchanged.
    #[instrument(skip_all, fields(page = self.cursor.current()))]
    pub async fn fetch_next_page(&mut self) -> Result<Vec<CatalogEntry>, CatalogError> {
        let page = self.cursor.current();
        match self.api.discover_page(page).await {
            Ok(entries) => {
                self.cursor.advance();
                tracing::debug!(page, count = entries.len(), "catalog page loaded");
                Ok(entries)
            }
            Err(err) => {
                tracing::warn!(page, error = %err, "catalog page fetch failed");
                Err(err)
            }
        }
    }

    /// Fetches the next page and delivers the outcome to the handler.
    pub async fn load_next_page(&mut self) {
        let result = self.fetch_next_page().await;
        match self.handler {
            Some(ref handler) => handler.dispatch(result),
            None => tracing::debug!("no list handler installed, result dropped"),
        }
    }
}
