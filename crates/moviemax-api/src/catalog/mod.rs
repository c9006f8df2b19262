//! Movie catalog client module.
//!
//! Handles HTTP requests to the catalog list and detail endpoints,
//! decodes responses into typed records, and retrieves artwork bytes.

mod api;
mod client;
mod decode;
mod error;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{CatalogClient, CatalogClientBuilder};
pub use decode::{decode_catalog_page, decode_movie_detail};
#[allow(clippy::module_name_repetitions)]
pub use error::{CatalogError, DecodeError, TransportError};
pub use types::{
    CatalogEntry, DURATION_NOT_AVAILABLE, IMAGE_BASE_URL, MovieDetail, REVENUE_NOT_AVAILABLE,
    format_duration, format_revenue, image_url,
};
