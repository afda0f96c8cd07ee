//! Config inspection command.

use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use crate::error::{Error, ResultExt};

/// Print where the config lives and what is in effect
pub fn cmd_config(config: &Config, explicit: Option<&Path>, init: bool) -> anyhow::Result<()> {
    let path: Option<PathBuf> = explicit.map(Path::to_path_buf).or_else(config::config_path);

    if init {
        if let Some(existing) = path.as_deref().filter(|p| p.exists()) {
            println!("Config already exists at {}", existing.display());
            return Ok(());
        }
        let written = match explicit {
            Some(p) => config::save_to(&Config::default(), p).map(|()| p.to_path_buf()),
            None => config::save(&Config::default()),
        }
        .map_err(Error::from)
        .with_context("writing default config")?;
        println!("✓ Wrote default config to {}", written.display());
        return Ok(());
    }

    match path {
        Some(ref p) if p.exists() => println!("Config file: {}", p.display()),
        Some(ref p) => println!("Config file: {} (not created, using defaults)", p.display()),
        None => println!("Config file: unavailable (no config directory)"),
    }
    print!("{}", summarize(config));
    Ok(())
}

fn summarize(config: &Config) -> String {
    let token = if config.credentials.access_token.is_some() {
        "set"
    } else {
        "not set"
    };
    format!(
        "\nMetadata:\n  base_url:       {}\n\
         \nEnrichment:\n  strategy:       {}\n  proxy_base_url: {}\n  api_base_url:   {}\n  concurrency:    {}\n\
         \nSearch:\n  default type:   {}\n  default limit:  {}\n  max limit:      {}\n\
         \nCredentials:\n  access_token:   {}\n  backend token:  {}\n",
        config.metadata.base_url,
        config.enrichment.strategy,
        config.enrichment.proxy_base_url,
        config.enrichment.api_base_url,
        config.enrichment.concurrency,
        config.search.default_attribute,
        config.search.default_limit,
        config.search.max_limit,
        token,
        config.credentials.backend_has_token,
    )
}
