//! Single-recording lookup command.

use tokio::runtime::Runtime;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::search::traits::MetadataApi;
use crate::search::{LookupError, MetadataRecord, QueryError, musicbrainz::MusicBrainzClient};

/// Look up a recording by MusicBrainz ID and print its fields
pub fn cmd_show(rt: &Runtime, config: &Config, mbid: &str) -> anyhow::Result<()> {
    let client = MusicBrainzClient::new(&config.metadata.base_url)?;

    match rt.block_on(lookup(&client, mbid)) {
        Ok(record) => {
            print!("{}", describe(&record));
            Ok(())
        }
        Err(Error::Lookup(LookupError::NotFound(_))) => {
            println!("✗ No recording with ID {mbid} on MusicBrainz.");
            anyhow::bail!("recording not found")
        }
        Err(e) => Err(e.into()),
    }
}

async fn lookup(api: &dyn MetadataApi, mbid: &str) -> Result<MetadataRecord> {
    let mbid = mbid.trim();
    if mbid.is_empty() {
        return Err(QueryError::EmptyTerm.into());
    }
    Ok(api.lookup_recording(mbid).await?)
}

/// Plain-text listing of a record, with the same N/A markers as the widget
fn describe(record: &MetadataRecord) -> String {
    let release = record.release_title.as_deref().unwrap_or("N/A");
    let tags = if record.tags.is_empty() {
        "N/A".to_string()
    } else {
        record.tags.join(", ")
    };

    format!(
        "  Title:   {}\n  Artist:  {}\n  Release: {}\n  Tags:    {}\n\n  MusicBrainz: https://musicbrainz.org/recording/{}\n",
        record.title, record.artist_name, release, tags, record.id
    )
}
