//! Movie catalog client library for moviemax.
//!
//! Fetches and decodes catalog list pages and movie details, pages through
//! results with a per-session cursor, and filters the loaded set by title.

/// HTTP client, records, and response decoders.
pub mod catalog;

/// List and detail request managers.
pub mod manager;

/// Working set and title search.
pub mod browse;
