//! Recording search command.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::error::Result;
use crate::search::{
    self, EnrichmentStrategy, PageInputs, SearchAttribute, SearchQuery, SearchWidget,
    musicbrainz::MusicBrainzClient,
};

/// Command-line overrides; `None` falls back to the config file
pub struct SearchArgs<'a> {
    pub term: &'a str,
    pub attribute: Option<SearchAttribute>,
    pub limit: Option<u32>,
    pub strategy: Option<EnrichmentStrategy>,
    pub page: Option<&'a Path>,
    pub token: Option<&'a str>,
    /// Stand-in for the page's has-token marker
    pub has_token: bool,
    pub output: Option<&'a Path>,
}

/// Bootstrap, click the trigger once, and write the result area
pub fn cmd_search(rt: &Runtime, config: &Config, args: SearchArgs<'_>) -> anyhow::Result<()> {
    let strategy = args.strategy.unwrap_or(config.enrichment.strategy);
    let query = build_query(config, &args)?;

    let inputs = match args.page {
        Some(page) => PageInputs::from_file(page)?,
        None => PageInputs::from_token(
            args.token.or(config.credentials.access_token.as_deref()),
            args.has_token || config.credentials.backend_has_token,
        ),
    };
    let boot = search::bootstrap(inputs, strategy);

    let metadata = MusicBrainzClient::new(&config.metadata.base_url)
        .context("creating MusicBrainz client")?;
    let finder = search::build_track_finder(
        strategy,
        &config.enrichment.proxy_base_url,
        &config.enrichment.api_base_url,
        &boot.session,
    )
    .context("creating track finder")?;

    let widget = SearchWidget::new(
        Arc::new(metadata),
        finder,
        boot.trigger,
        config.widget_options(),
    );

    let outcome = rt.block_on(widget.click(query));

    // The result area is written even on failure so the error notice shows up
    let results = widget.results();
    tracing::debug!(
        fragments = results.fragment_count(),
        error = results.has_error(),
        "Writing result area"
    );
    write_output(&results.to_html(), args.output)?;

    match outcome {
        Ok(Some(summary)) => {
            eprintln!(
                "✓ {} results ({} playable, {} not on Spotify, {} lookup errors)",
                summary.rendered,
                summary.found,
                summary.not_found,
                summary.failed
            );
            Ok(())
        }
        Ok(None) => {
            match strategy {
                EnrichmentStrategy::Direct => {
                    eprintln!("✗ Search is disabled: no Spotify access token.");
                    eprintln!("  Use --page, --token, or set MUSOPHILE_ACCESS_TOKEN.");
                }
                EnrichmentStrategy::Proxy => {
                    eprintln!("✗ Search is disabled: the page has no has-token marker.");
                    eprintln!("  Log in to Spotify through the backend first, then pass");
                    eprintln!("  --page, --has-token, or set credentials.backend_has_token.");
                }
            }
            anyhow::bail!("search trigger disabled")
        }
        Err(e) => Err(e).context("search failed"),
    }
}

/// Command-line values over config defaults
fn build_query(config: &Config, args: &SearchArgs<'_>) -> Result<SearchQuery> {
    let query = SearchQuery::new(
        args.attribute.unwrap_or(config.search.default_attribute),
        args.term,
        args.limit.unwrap_or(config.search.default_limit),
    )?;
    Ok(query)
}

fn write_output(html: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, html)
            .with_context(|| format!("writing results to {}", path.display())),
        None => {
            print!("{html}");
            Ok(())
        }
    }
}
