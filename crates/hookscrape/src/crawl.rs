//! Listing traversal: initial characters -> artists -> songs -> sections.
//!
//! Each level is fetched cache-first, one page at a time; a listing with
//! PAGE_FULL links continues onto the next page. Estimated request counts
//! for a full crawl run in the low tens of thousands, which is why every
//! page lands in the cache before anything is parsed.

use std::collections::HashSet;

use anyhow::Result;
use tracing::{info, warn};

use crate::cache::Cache;
use crate::fetch::Fetcher;
use crate::pages::{self, LinkPatterns, PAGE_FULL};

pub async fn run(cache: &Cache, characters: &str) -> Result<()> {
    let fetcher = Fetcher::new(cache)?;
    let patterns = LinkPatterns::new();
    let mut sections = 0usize;

    for character in characters.chars() {
        let artists = artist_ids(&fetcher, &patterns, character).await?;
        info!(character = %character, artists = artists.len(), "explored character");

        for artist in &artists {
            let songs = song_ids(&fetcher, &patterns, artist).await?;
            for song in &songs {
                match section_ids(&fetcher, &patterns, artist, song).await {
                    Ok(ids) => {
                        for id in ids {
                            match fetcher
                                .text(&pages::section_xml_key(id), &pages::section_xml_url(id))
                                .await
                            {
                                Ok(_) => sections += 1,
                                Err(err) => {
                                    warn!(section = id, error = %err, "section fetch failed")
                                }
                            }
                        }
                    }
                    Err(err) => {
                        warn!(artist = %artist, song = %song, error = %err, "song page fetch failed")
                    }
                }
            }
        }
    }

    info!(sections, "crawl finished");
    Ok(())
}

/// All artist ids listed under one initial character, following pagination.
async fn artist_ids(
    fetcher: &Fetcher<'_>,
    patterns: &LinkPatterns,
    character: char,
) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    let mut page = 1;
    loop {
        let html = fetcher
            .text(
                &pages::artist_list_key(character, page),
                &pages::artist_list_url(character, page),
            )
            .await?;
        let links = patterns.artist_ids(&html);
        let full_page = links.len() >= PAGE_FULL;
        for id in links {
            if seen.insert(id.clone()) {
                ids.push(id);
            }
        }
        if !full_page {
            break;
        }
        page += 1;
    }
    Ok(ids)
}

/// All song ids for one artist, following pagination.
async fn song_ids(
    fetcher: &Fetcher<'_>,
    patterns: &LinkPatterns,
    artist: &str,
) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    let mut page = 1;
    loop {
        let html = fetcher
            .text(
                &pages::song_list_key(artist, page),
                &pages::song_list_url(artist, page),
            )
            .await?;
        let links = patterns.song_ids(&html);
        let full_page = links.len() >= PAGE_FULL;
        for id in links {
            if seen.insert(id.clone()) {
                ids.push(id);
            }
        }
        if !full_page {
            break;
        }
        page += 1;
    }
    Ok(ids)
}

/// Section ids on one song page. Song pages do not paginate.
async fn section_ids(
    fetcher: &Fetcher<'_>,
    patterns: &LinkPatterns,
    artist: &str,
    song: &str,
) -> Result<Vec<u64>> {
    let html = fetcher
        .text(
            &pages::section_list_key(artist, song),
            &pages::section_list_url(artist, song),
        )
        .await?;
    let mut ids = patterns.section_ids(&html);
    ids.dedup();
    Ok(ids)
}
