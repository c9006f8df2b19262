//! Catalog records and their derived presentation values.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use url::Url;

/// Fixed base for poster and backdrop artwork.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Marker shown when the runtime is unknown.
pub const DURATION_NOT_AVAILABLE: &str = "N/A";

/// Marker shown when the revenue is unreported (`0`).
pub const REVENUE_NOT_AVAILABLE: &str = "Not Available";

// --- Catalog Entry ---

/// A movie summary from a paginated list endpoint.
///
/// `id` is the identity key: two entries with the same `id` are the same movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Catalog movie ID.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Release date (`YYYY-MM-DD`, may be empty or unparsable).
    pub release_date: String,
    /// Relative poster path. Always set for entries decoded from a list
    /// page; `None` only for entries built without artwork.
    pub poster_path: Option<String>,
}

impl CatalogEntry {
    /// Calendar year of the release date, if it parses.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        NaiveDate::parse_from_str(&self.release_date, "%Y-%m-%d")
            .ok()
            .map(|date| date.year())
    }

    /// Fully-qualified poster URL.
    #[must_use]
    pub fn poster_url(&self) -> Option<Url> {
        self.poster_path.as_deref().and_then(image_url)
    }
}

// --- Movie Detail ---

/// Full record for a single movie from the detail endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieDetail {
    /// Original title.
    #[serde(rename = "original_title")]
    pub title: String,
    /// Relative backdrop path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Number of votes.
    pub vote_count: u64,
    /// Average rating (scale defined upstream).
    pub vote_average: f64,
    /// Plot overview (may be empty).
    pub overview: String,
    /// Revenue in dollars (`0` when unreported).
    pub revenue: u64,
    /// Runtime in minutes.
    #[serde(default, rename = "runtime")]
    pub runtime_minutes: Option<u32>,
}

impl MovieDetail {
    /// Fully-qualified backdrop URL.
    #[must_use]
    pub fn backdrop_url(&self) -> Option<Url> {
        self.backdrop_path.as_deref().and_then(image_url)
    }

    /// Runtime as `"{h}H {m}M"`, or `"N/A"`.
    #[must_use]
    pub fn formatted_duration(&self) -> String {
        format_duration(self.runtime_minutes)
    }

    /// Revenue in abbreviated dollar notation.
    #[must_use]
    pub fn formatted_revenue(&self) -> String {
        format_revenue(self.revenue)
    }
}

/// Joins an artwork path onto [`IMAGE_BASE_URL`].
///
/// Returns `None` if the result is not a valid URL.
#[must_use]
pub fn image_url(path: &str) -> Option<Url> {
    Url::parse(&format!(
        "{IMAGE_BASE_URL}/{}",
        path.trim_start_matches('/')
    ))
    .ok()
}

/// Formats a runtime in minutes as `"{h}H {m}M"`.
#[must_use]
pub fn format_duration(runtime_minutes: Option<u32>) -> String {
    runtime_minutes.map_or_else(
        || String::from(DURATION_NOT_AVAILABLE),
        |minutes| format!("{}H {}M", minutes / 60, minutes % 60),
    )
}

/// Formats revenue as `$1.5B`, `$2.3M`, `$5.0K` or `$42`.
///
/// Scaled amounts are rounded to one decimal place. `0` is the
/// "unreported" sentinel and renders as `Not Available`.
#[must_use]
#[allow(
    clippy::as_conversions,
    clippy::cast_precision_loss,
    clippy::arithmetic_side_effects
)]
pub fn format_revenue(revenue: u64) -> String {
    if revenue == 0 {
        return String::from(REVENUE_NOT_AVAILABLE);
    }

    let amount = revenue as f64;
    for (scale, suffix) in [(1e9, 'B'), (1e6, 'M'), (1e3, 'K')] {
        let scaled = amount / scale;
        if scaled >= 1.0 {
            let rounded = (scaled * 10.0).round() / 10.0;
            return format!("${rounded:.1}{suffix}");
        }
    }
    format!("${revenue}")
}
