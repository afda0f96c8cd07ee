//! Result fragment rendering.
//!
//! Pure functions: the same `(record, enrichment)` pair always renders to the
//! same bytes. The "add to library" action is only declared here as a POST
//! form; submitting it is up to the browser and the backend.

use super::domain::{EnrichmentResult, MetadataRecord};

/// Spotify embed player base
pub const EMBED_BASE_URL: &str = "https://open.spotify.com/embed/track";

/// Backend route that adds a recording to the user's library
pub const ADD_RECORDING_PATH: &str = "/user/add-recording";

/// Track identifier sent when no streaming track matched
pub const NO_TRACK_SENTINEL: &str = "0";

const RELEASE_MISSING: &str = "<b>N/A</b>";
const TAGS_MISSING: &str = "N/A";
const NOT_FOUND_NOTICE: &str = "This song wasn't found on Spotify";

/// Render one search result.
pub fn render(record: &MetadataRecord, enrichment: &EnrichmentResult) -> String {
    let release = record
        .release_title
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| RELEASE_MISSING.to_string());

    let tags = if record.tags.is_empty() {
        TAGS_MISSING.to_string()
    } else {
        escape_html(&record.tags.join(","))
    };

    let player = match enrichment.track_id() {
        Some(track_id) => format!(
            "        <iframe src=\"{EMBED_BASE_URL}/{}\" width=\"100%\" height=\"80\" \
             frameBorder=\"0\" allowtransparency=\"true\" allow=\"encrypted-media\"></iframe>\n",
            urlencoding::encode(track_id)
        ),
        None => format!("        <strong>{NOT_FOUND_NOTICE}</strong>\n"),
    };

    let mut html = String::new();
    html.push_str("<div class=\"search-result\">\n");
    html.push_str("    <div class=\"result-info\">\n        <ul>\n");
    let info = [
        ("Title", escape_html(&record.title)),
        ("Artist", escape_html(&record.artist_name)),
        ("Release", release),
        ("Tags", tags),
    ];
    for (label, value) in info {
        html.push_str(&format!("            <li>{label}: {value}</li>\n"));
    }
    html.push_str("        </ul>\n    </div>\n");

    html.push_str("    <div class=\"player\">\n");
    html.push_str(&player);
    html.push_str("    </div>\n");

    html.push_str("    <aside class=\"search-result-options\">\n");
    html.push_str(&format!(
        "        <form action=\"{}\" method=\"POST\">\n",
        add_action(&record.id, enrichment)
    ));
    html.push_str(
        "            <button class=\"add-song btn btn-sm btn-outline-primary\">Add to library</button>\n",
    );
    html.push_str("        </form>\n    </aside>\n</div>\n");

    html
}

/// `/user/add-recording/{local_id}/{track_id or 0}`
pub fn add_action(local_id: &str, enrichment: &EnrichmentResult) -> String {
    let track = enrichment.track_id().unwrap_or(NO_TRACK_SENTINEL);
    format!(
        "{ADD_RECORDING_PATH}/{}/{}",
        urlencoding::encode(local_id),
        urlencoding::encode(track)
    )
}

/// Minimal user-visible notice for a failed search.
pub fn render_error(message: &str) -> String {
    format!(
        "<div class=\"search-error alert alert-danger\">Search failed: {}</div>\n",
        escape_html(message)
    )
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
