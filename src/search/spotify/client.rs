//! Spotify track matching clients
//!
//! Two interchangeable ways to find a playable track for a recording:
//! - [`ProxyClient`]: asks the trusted backend (`{base}/{title}/{artist}`),
//!   which holds the user's token and forwards to Spotify.
//! - [`DirectClient`]: calls Spotify's `/v1/search` itself with the bearer
//!   token from the [`Session`].
//!
//! Neither retries nor refreshes an expired token; an expired token surfaces
//! as [`LookupError::Auth`].

use reqwest::{StatusCode, Url};

use super::{adapter, dto};
use crate::search::domain::{EnrichmentResult, LookupError};
use crate::search::http;
use crate::search::session::Session;

pub const DEFAULT_PROXY_BASE_URL: &str = "http://localhost:5000/search/api";
pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1/search";

/// Backend proxy client
pub struct ProxyClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LookupError> {
        Ok(Self {
            http_client: http::build_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Find the best matching track for a title/artist pair
    pub async fn find_track(
        &self,
        title: &str,
        artist: &str,
        local_id: &str,
    ) -> Result<EnrichmentResult, LookupError> {
        if is_dot_segment(title) || is_dot_segment(artist) {
            tracing::debug!(local_id, title, artist, "Not a usable path segment, skipping lookup");
            return Ok(EnrichmentResult::NotFound);
        }

        let url = self.track_url(title, artist)?;
        tracing::debug!(%url, local_id, "Proxy track search");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(http::network_error)?;

        parse_response(response).await
    }

    /// `{base}/{title}/{artist}` with both segments percent-encoded.
    ///
    /// `.` and `..` are refused: URL parsing collapses them even when
    /// percent-encoded, which would change the route.
    pub fn track_url(&self, title: &str, artist: &str) -> Result<Url, LookupError> {
        if let Some(segment) = [title, artist].into_iter().find(|s| is_dot_segment(s)) {
            return Err(LookupError::NotFound(format!(
                "{segment:?} cannot be sent as a path segment"
            )));
        }
        let url = format!(
            "{}/{}/{}",
            self.base_url,
            urlencoding::encode(title),
            urlencoding::encode(artist)
        );
        Url::parse(&url).map_err(|e| LookupError::Network(format!("invalid proxy URL: {e}")))
    }
}

fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

/// Direct Spotify Web API client
pub struct DirectClient {
    http_client: reqwest::Client,
    base_url: String,
    session: Session,
}

impl DirectClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> Result<Self, LookupError> {
        Ok(Self {
            http_client: http::build_client()?,
            base_url: base_url.into(),
            session,
        })
    }

    /// Find the best matching track for a title/artist pair
    pub async fn find_track(
        &self,
        title: &str,
        artist: &str,
        local_id: &str,
    ) -> Result<EnrichmentResult, LookupError> {
        let token = self
            .session
            .token()
            .ok_or_else(|| LookupError::Auth("no access token in session".to_string()))?;

        let url = self.search_url(title, artist)?;
        tracing::debug!(%url, local_id, "Spotify track search");

        let response = self
            .http_client
            .get(url)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(http::network_error)?;

        parse_response(response).await
    }

    /// `{base}?q={title} {artist}&type=track&limit=1`
    pub fn search_url(&self, title: &str, artist: &str) -> Result<Url, LookupError> {
        let q = format!("{title} {artist}");
        Url::parse_with_params(
            &self.base_url,
            [("q", q.as_str()), ("type", "track"), ("limit", "1")],
        )
        .map_err(|e| LookupError::Network(format!("invalid Spotify URL: {e}")))
    }
}

/// Map the HTTP status, then hand the body to the adapter
async fn parse_response(response: reqwest::Response) -> Result<EnrichmentResult, LookupError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        // Spotify includes an error object explaining why (e.g. token expired)
        let message = response
            .json::<dto::TrackSearchBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .map(|error| error.message)
            .unwrap_or_else(|| http::describe_status(status));
        return Err(LookupError::Auth(message));
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(LookupError::RateLimited);
    }

    if !status.is_success() {
        return Err(LookupError::Network(http::describe_status(status)));
    }

    let body = response
        .json::<dto::TrackSearchBody>()
        .await
        .map_err(|e| LookupError::MalformedResponse(e.to_string()))?;

    adapter::to_enrichment(body)
}
