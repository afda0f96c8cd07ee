//! MusicBrainz HTTP client
//!
//! Handles communication with the MusicBrainz web service.
//! See: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! IMPORTANT: MusicBrainz requires a User-Agent header and rate limits to 1 req/sec.
//! One search issues exactly one request; there is no retry.

use reqwest::{StatusCode, Url};

use super::{adapter, dto};
use crate::search::domain::{LookupError, MetadataRecord, SearchQuery};
use crate::search::http;

pub const DEFAULT_BASE_URL: &str = "https://musicbrainz.org/ws/2";

/// MusicBrainz API client
pub struct MusicBrainzClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl MusicBrainzClient {
    /// Create a client against the given web service root
    pub fn new(base_url: impl Into<String>) -> Result<Self, LookupError> {
        Ok(Self {
            http_client: http::build_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Search recordings matching `query`
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<MetadataRecord>, LookupError> {
        let url = self.search_url(query)?;
        tracing::debug!(%url, "MusicBrainz recording search");

        let response: dto::SearchResponse = self.get_json(url).await?;
        tracing::debug!(
            count = ?response.count,
            returned = response.recordings.len(),
            "MusicBrainz search complete"
        );

        adapter::to_records(response, query.limit as usize)
    }

    /// Look up a single recording by its MusicBrainz ID
    pub async fn lookup_recording(&self, recording_id: &str) -> Result<MetadataRecord, LookupError> {
        let url = self.lookup_url(recording_id)?;
        let recording: dto::Recording = self.get_json(url).await?;
        adapter::to_record(recording)
    }

    /// `{base}/recording/?query=<expr>&limit=<n>&fmt=json`
    pub fn search_url(&self, query: &SearchQuery) -> Result<Url, LookupError> {
        let limit = query.limit.to_string();
        Url::parse_with_params(
            &format!("{}/recording/", self.base_url),
            [
                ("query", query.expression().as_str()),
                ("limit", limit.as_str()),
                ("fmt", "json"),
            ],
        )
        .map_err(|e| LookupError::Network(format!("invalid MusicBrainz URL: {e}")))
    }

    /// `{base}/recording/{id}?fmt=json&inc=artists+releases+tags`
    fn lookup_url(&self, recording_id: &str) -> Result<Url, LookupError> {
        // inc values are joined with a literal '+', which must not be percent-encoded
        let url = format!(
            "{}/recording/{}?fmt=json&inc=artists+releases+tags",
            self.base_url,
            urlencoding::encode(recording_id)
        );
        Url::parse(&url).map_err(|e| LookupError::Network(format!("invalid MusicBrainz URL: {e}")))
    }

    /// Send the HTTP request and parse the response
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, LookupError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(http::network_error)?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound("recording".to_string()));
        }

        // MusicBrainz answers 503 when its rate limiter kicks in
        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(LookupError::RateLimited);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LookupError::Auth(http::describe_status(status)));
        }

        if !status.is_success() {
            // Try to parse error response
            if let Ok(error) = response.json::<dto::ApiError>().await {
                return Err(LookupError::Api(error.error));
            }
            return Err(LookupError::Network(http::describe_status(status)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LookupError::MalformedResponse(e.to_string()))
    }
}
