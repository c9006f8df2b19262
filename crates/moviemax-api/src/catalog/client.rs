//! `CatalogClient` - movie catalog HTTP client implementation.

use anyhow::{Context, Result};
use bytes::Bytes;
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::LocalCatalogApi;
use super::decode::{decode_catalog_page, decode_movie_detail};
use super::error::{CatalogError, DecodeError, TransportError};
use super::types::{CatalogEntry, MovieDetail};

/// Default base URL for the catalog API (TMDB v3).
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default base URL for artwork.
const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500/";

/// List endpoint, relative to the base URL.
const DISCOVER_PATH: &str = "discover/movie";

/// Detail endpoint prefix, relative to the base URL.
const MOVIE_PATH: &str = "movie/";

/// Per-endpoint decoder injected into [`CatalogClient::get_decoded`].
type Decoder<T> = fn(&[u8]) -> std::result::Result<T, DecodeError>;

/// Movie catalog API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Base URL for artwork requests.
    image_base_url: Url,
    /// Static API key sent as the `api_key` query parameter.
    api_key: String,
    /// Optional `language` query parameter.
    language: Option<String>,
}

/// Builder for `CatalogClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClientBuilder {
    base_url: Option<Url>,
    image_base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
    language: Option<String>,
}

impl CatalogClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            image_base_url: None,
            api_key: None,
            user_agent: None,
            language: None,
        }
    }

    /// Overrides the API base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Overrides the artwork base URL.
    #[must_use]
    pub fn image_base_url(mut self, url: Url) -> Self {
        self.image_base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the response language (e.g. `en-US`).
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or empty.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<CatalogClient> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .context("api_key is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?,
        };
        let image_base_url = match self.image_base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_IMAGE_BASE_URL).context("invalid default image URL")?,
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(CatalogClient {
            http_client,
            base_url: with_trailing_slash(base_url),
            image_base_url: with_trailing_slash(image_base_url),
            api_key,
            language: self.language,
        })
    }
}

/// Appends `/` to the URL path so relative joins keep the last segment.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

impl CatalogClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::new()
    }

    /// Issues one GET request and returns the raw body bytes.
    ///
    /// Single attempt, no retry. The status code is not interpreted: a
    /// non-success status is logged and its body is returned like any other,
    /// leaving the decoder to reject it.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Request`] on connection or body read failure.
    /// - [`TransportError::EmptyBody`] if the response carries no bytes.
    #[instrument(skip_all)]
    pub async fn fetch(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> std::result::Result<Bytes, TransportError> {
        let endpoint = String::from(url.path());
        // The URL carries the API key in its query string.
        let request_error = |source: reqwest::Error| TransportError::Request {
            endpoint: endpoint.clone(),
            source: source.without_url(),
        };

        let request = self
            .http_client
            .get(url)
            .query(query)
            .build()
            .map_err(request_error)?;

        tracing::debug!(%endpoint, "catalog request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, %endpoint, "catalog request returned non-success status");
        }

        let body = response.bytes().await.map_err(request_error)?;
        if body.is_empty() {
            return Err(TransportError::EmptyBody { endpoint });
        }
        Ok(body)
    }

    /// Fetches `path` relative to the base URL and runs `decode` on the body.
    async fn get_decoded<T>(
        &self,
        path: &str,
        query: &[(&str, String)],
        decode: Decoder<T>,
    ) -> std::result::Result<T, CatalogError> {
        let url = self.base_url.join(path).map_err(TransportError::from)?;
        let body = self.fetch(url, query).await?;
        Ok(decode(&body)?)
    }

    /// Artwork URL for `path` on the configured image host.
    ///
    /// [`LocalCatalogApi::image`] downloads from the same URL.
    #[must_use]
    pub fn artwork_url(&self, path: &str) -> Option<Url> {
        self.join_image_path(path).ok()
    }

    fn join_image_path(&self, path: &str) -> std::result::Result<Url, url::ParseError> {
        self.image_base_url.join(path.trim_start_matches('/'))
    }

    /// Query parameters shared by every API request.
    fn base_query(&self, page: Option<u32>) -> Vec<(&'static str, String)> {
        let mut query = vec![("api_key", self.api_key.clone())];
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(ref language) = self.language {
            query.push(("language", language.clone()));
        }
        query
    }
}

impl LocalCatalogApi for CatalogClient {
    #[instrument(skip(self))]
    async fn discover_page(
        &self,
        page: u32,
    ) -> std::result::Result<Vec<CatalogEntry>, CatalogError> {
        let query = self.base_query(Some(page));
        self.get_decoded(DISCOVER_PATH, &query, decode_catalog_page)
            .await
    }

    #[instrument(skip(self))]
    async fn movie_details(
        &self,
        movie_id: u64,
    ) -> std::result::Result<MovieDetail, CatalogError> {
        let path = format!("{MOVIE_PATH}{movie_id}");
        let query = self.base_query(None);
        self.get_decoded(&path, &query, decode_movie_detail).await
    }

    #[instrument(skip_all)]
    async fn image(&self, path: &str) -> std::result::Result<Bytes, TransportError> {
        let url = self.join_image_path(path)?;
        self.fetch(url, &[]).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn client_for(mock_server: &wiremock::MockServer) -> CatalogClient {
        let base_url = format!("{}/3/", mock_server.uri());
        let image_base_url = format!("{}/t/p/w500/", mock_server.uri());
        CatalogClient::builder()
            .base_url(base_url.parse().unwrap())
            .image_base_url(image_base_url.parse().unwrap())
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_api_key() {
        // Arrange & Act
        let result = CatalogClient::builder().user_agent("test/0.0.0").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("api_key is required")
        );
    }

    #[test]
    fn test_builder_rejects_blank_api_key() {
        // Arrange & Act
        let result = CatalogClient::builder()
            .api_key("  ")
            .user_agent("test/0.0.0")
            .build();

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = CatalogClient::builder().api_key("test-key").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_builder_defaults() {
        // Arrange & Act
        let client = CatalogClient::builder()
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(client.image_base_url.as_str(), DEFAULT_IMAGE_BASE_URL);
        assert!(client.language.is_none());
    }

    #[test]
    fn test_builder_adds_trailing_slash() {
        // Arrange
        let custom_url = Url::parse("http://localhost:8080/3").unwrap();

        // Act
        let client = CatalogClient::builder()
            .base_url(custom_url)
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url.as_str(), "http://localhost:8080/3/");
        assert_eq!(
            client.base_url.join("movie/550").unwrap().as_str(),
            "http://localhost:8080/3/movie/550"
        );
    }

    #[test]
    fn test_base_query_order() {
        // Arrange
        let client = CatalogClient::builder()
            .api_key("k")
            .user_agent("test/0.0.0")
            .language("ja-JP")
            .build()
            .unwrap();

        // Act
        let query = client.base_query(Some(3));

        // Assert
        assert_eq!(
            query,
            vec![
                ("api_key", String::from("k")),
                ("page", String::from("3")),
                ("language", String::from("ja-JP")),
            ]
        );
    }

    #[tokio::test]
    async fn test_discover_page_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/catalog/discover_page_1.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/discover/movie"))
            .and(wiremock::matchers::query_param("api_key", "test-key"))
            .and(wiremock::matchers::query_param("page", "1"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let entries = client.discover_page(1).await.unwrap();

        // Assert
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].title, "Fight Club");
        assert_eq!(entries[2].id, 238);
    }

    #[tokio::test]
    async fn test_movie_details_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/catalog/movie_details_550.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/550"))
            .and(wiremock::matchers::query_param("api_key", "test-key"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let detail = client.movie_details(550).await.unwrap();

        // Assert
        assert_eq!(detail.title, "Fight Club");
        assert_eq!(detail.formatted_revenue(), "$100.9M");
    }

    #[tokio::test]
    async fn test_language_is_sent() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/catalog/discover_empty.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::query_param("language", "ja-JP"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = CatalogClient::builder()
            .base_url(format!("{}/3/", mock_server.uri()).parse().unwrap())
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .language("ja-JP")
            .build()
            .unwrap();

        // Act & Assert (mock expect(1) verifies the language parameter)
        assert!(client.discover_page(7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_error_status_body_is_decoded_not_rejected() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let error_body = include_str!("../../../../fixtures/catalog/error_invalid_key.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(401).set_body_string(error_body))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let list = client.discover_page(1).await;
        let detail = client.movie_details(550).await;

        // Assert
        assert!(matches!(
            list,
            Err(CatalogError::Decode(DecodeError::InvalidStructure))
        ));
        assert!(matches!(
            detail,
            Err(CatalogError::Decode(DecodeError::Malformed(_)))
        ));
    }

    #[tokio::test]
    async fn test_empty_body_is_transport_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let result = client.movie_details(550).await;

        // Assert
        assert!(matches!(
            result,
            Err(CatalogError::Transport(TransportError::EmptyBody { .. }))
        ));
    }

    #[test]
    fn test_artwork_url_uses_configured_image_base() {
        // Arrange
        let client = CatalogClient::builder()
            .image_base_url(Url::parse("http://images.local/w300").unwrap())
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let url = client.artwork_url("/poster.jpg").unwrap();

        // Assert
        assert_eq!(url.as_str(), "http://images.local/w300/poster.jpg");
    }

    #[test]
    fn test_artwork_url_defaults_to_public_image_host() {
        // Arrange
        let client = CatalogClient::builder()
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let url = client.artwork_url("poster.jpg").unwrap();

        // Assert
        assert_eq!(url.as_str(), "https://image.tmdb.org/t/p/w500/poster.jpg");
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Arrange
        let client = CatalogClient::builder()
            .base_url(Url::parse("http://127.0.0.1:1/3/").unwrap())
            .api_key("secret-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let err = client.discover_page(1).await.unwrap_err();

        // Assert
        assert!(err.is_transport());
        let mut chain = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(inner) = source {
            chain.push_str(&inner.to_string());
            source = inner.source();
        }
        assert!(!chain.contains("secret-key"));
    }

    #[tokio::test]
    async fn test_no_retry_on_failure_status() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(429).set_body_string("{}"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let result = client.discover_page(1).await;

        // Assert (mock expect(1) verifies a single attempt)
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_image_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let png = vec![0x89, b'P', b'N', b'G'];

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/t/p/w500/poster.png"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_bytes(png.clone()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let bytes = client.image("/poster.png").await.unwrap();

        // Assert
        assert_eq!(bytes.as_ref(), png.as_slice());
    }
}
