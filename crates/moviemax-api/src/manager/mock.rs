//! Scripted in-memory catalog API for manager tests.

#![allow(clippy::unwrap_used, clippy::new_without_default)]

use std::collections::HashMap;
use std::sync::Mutex;

use bytes::Bytes;

use crate::catalog::{CatalogEntry, CatalogError, LocalCatalogApi, MovieDetail, TransportError};

/// Mock API serving pre-configured pages and details.
///
/// A missing page or movie answers with a transport error.
pub struct MockCatalogApi {
    pages: HashMap<u32, Vec<CatalogEntry>>,
    details: HashMap<u64, MovieDetail>,
    /// Pages requested so far, in call order.
    pub requested_pages: Mutex<Vec<u32>>,
    /// Pages that fail once before succeeding.
    fail_once: Mutex<Vec<u32>>,
}

impl MockCatalogApi {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            details: HashMap::new(),
            requested_pages: Mutex::new(Vec::new()),
            fail_once: Mutex::new(Vec::new()),
        }
    }

    pub fn with_page(mut self, page: u32, entries: Vec<CatalogEntry>) -> Self {
        self.pages.insert(page, entries);
        self
    }

    pub fn with_detail(mut self, movie_id: u64, detail: MovieDetail) -> Self {
        self.details.insert(movie_id, detail);
        self
    }

    pub fn failing_once(self, page: u32) -> Self {
        self.fail_once.lock().unwrap().push(page);
        self
    }

    pub fn requested(&self) -> Vec<u32> {
        self.requested_pages.lock().unwrap().clone()
    }
}

fn unavailable(endpoint: String) -> CatalogError {
    TransportError::EmptyBody { endpoint }.into()
}

impl LocalCatalogApi for MockCatalogApi {
    async fn discover_page(&self, page: u32) -> Result<Vec<CatalogEntry>, CatalogError> {
        self.requested_pages.lock().unwrap().push(page);
        {
            let mut fail_once = self.fail_once.lock().unwrap();
            if let Some(pos) = fail_once.iter().position(|p| *p == page) {
                fail_once.remove(pos);
                return Err(unavailable(format!("discover/movie?page={page}")));
            }
        }
        self.pages
            .get(&page)
            .cloned()
            .ok_or_else(|| unavailable(format!("discover/movie?page={page}")))
    }

    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetail, CatalogError> {
        tokio::task::yield_now().await;
        self.details
            .get(&movie_id)
            .cloned()
            .ok_or_else(|| unavailable(format!("movie/{movie_id}")))
    }

    async fn image(&self, path: &str) -> Result<Bytes, TransportError> {
        Err(TransportError::EmptyBody {
            endpoint: String::from(path),
        })
    }
}

pub fn entry(id: u64, title: &str) -> CatalogEntry {
    CatalogEntry {
        id,
        title: String::from(title),
        release_date: String::from("2024-03-10"),
        poster_path: None,
    }
}

pub fn detail(title: &str) -> MovieDetail {
    MovieDetail {
        title: String::from(title),
        backdrop_path: None,
        vote_count: 1,
        vote_average: 7.0,
        overview: String::new(),
        revenue: 0,
        runtime_minutes: Some(90),
    }
}
