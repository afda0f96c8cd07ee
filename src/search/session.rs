//! Page bootstrap and session state.
//!
//! The search page carries two inputs: the Spotify access token as the text
//! of `#token`, and a `has-token` class on `#hasToken` when the backend holds
//! a token on the user's behalf. Bootstrap reads them once, builds the
//! [`Session`] handed to the enrichment client, and decides whether the
//! search trigger starts enabled.

use std::fmt;
use std::path::Path;

use scraper::{Html, Selector};

use super::spotify::EnrichmentStrategy;
use crate::error::{Error, Result, ResultExt};

const TOKEN_SELECTOR: &str = "#token";
const HAS_TOKEN_SELECTOR: &str = "#hasToken.has-token";

/// Opaque bearer token for the streaming API
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token. Blank input yields `None`.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let raw = raw.as_ref().trim();
        (!raw.is_empty()).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Session-scoped state, written once at bootstrap and read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<AuthToken>,
    has_token_marker: bool,
}

impl Session {
    pub fn new(token: Option<AuthToken>, has_token_marker: bool) -> Self {
        Self {
            token,
            has_token_marker,
        }
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    pub fn has_token_marker(&self) -> bool {
        self.has_token_marker
    }
}

/// Raw inputs read off the search page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInputs {
    pub token: Option<String>,
    pub has_token: bool,
}

impl PageInputs {
    /// Extract the token text and has-token marker from page HTML.
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);

        let token = Selector::parse(TOKEN_SELECTOR)
            .ok()
            .and_then(|selector| {
                document
                    .select(&selector)
                    .next()
                    .map(|el| el.text().collect::<String>().trim().to_string())
            })
            .filter(|text| !text.is_empty());

        let has_token = Selector::parse(HAS_TOKEN_SELECTOR)
            .ok()
            .is_some_and(|selector| document.select(&selector).next().is_some());

        Self { token, has_token }
    }

    /// Read and parse a saved search page.
    pub fn from_file(path: &Path) -> Result<Self> {
        let html = std::fs::read_to_string(path)
            .with_context(format!("reading search page {}", path.display()))?;
        if html.trim().is_empty() {
            return Err(Error::page(format!("search page {} is empty", path.display())));
        }
        Ok(Self::from_html(&html))
    }

    /// Inputs for a run without a page, e.g. a token from config or env.
    ///
    /// `backend_has_token` stands in for the page's has-token marker; a
    /// token of our own implies it.
    pub fn from_token(token: Option<&str>, backend_has_token: bool) -> Self {
        let token = token.and_then(AuthToken::new).map(|t| t.0);
        Self {
            has_token: backend_has_token || token.is_some(),
            token,
        }
    }
}

/// Whether a click starts a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTrigger {
    enabled: bool,
}

impl SearchTrigger {
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(self) -> bool {
        self.enabled
    }
}

/// Result of the one-time page bootstrap
#[derive(Debug, Clone)]
pub struct Bootstrap {
    pub session: Session,
    pub trigger: SearchTrigger,
}

/// Build the session and gate the trigger.
///
/// The direct strategy needs the raw token in the browser; the proxy keeps
/// the token server-side, so only the marker matters there.
pub fn bootstrap(inputs: PageInputs, strategy: EnrichmentStrategy) -> Bootstrap {
    let token = inputs.token.as_deref().and_then(AuthToken::new);
    let session = Session::new(token, inputs.has_token);

    let enabled = match strategy {
        EnrichmentStrategy::Direct => session.token().is_some(),
        EnrichmentStrategy::Proxy => session.has_token_marker(),
    };

    tracing::info!(
        %strategy,
        token_present = session.token().is_some(),
        has_token_marker = session.has_token_marker(),
        enabled,
        "Bootstrapped search page"
    );

    Bootstrap {
        session,
        trigger: if enabled {
            SearchTrigger::enabled()
        } else {
            SearchTrigger::disabled()
        },
    }
}
