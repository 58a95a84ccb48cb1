//! Page catalog: where each hooktheory page lives, the cache key it is
//! stored under, and how to pull ids out of its HTML.

use regex::Regex;

/// A listing page with this many links probably continues on the next page.
pub const PAGE_FULL: usize = 100;

/// Compiled link patterns for the three listing levels.
pub struct LinkPatterns {
    artist: Regex,
    song: Regex,
    section: Regex,
}

impl LinkPatterns {
    pub fn new() -> Self {
        LinkPatterns {
            artist: Regex::new(r"/theorytab/artists/[a-z0-9-]/([A-Za-z0-9-]+)").unwrap(),
            song: Regex::new(r"/theorytab/view/[a-z0-9-]+/([A-Za-z0-9-]+)").unwrap(),
            section: Regex::new(r"/theorytab/fork/id/([0-9]+)").unwrap(),
        }
    }

    /// Artist ids linked from an artist-listing page, in page order.
    pub fn artist_ids(&self, html: &str) -> Vec<String> {
        capture_all(&self.artist, html)
    }

    /// Song ids linked from a song-listing page, in page order.
    pub fn song_ids(&self, html: &str) -> Vec<String> {
        capture_all(&self.song, html)
    }

    /// Numeric section ids linked from a song page.
    pub fn section_ids(&self, html: &str) -> Vec<u64> {
        capture_all(&self.section, html)
            .into_iter()
            .filter_map(|id| id.parse().ok())
            .collect()
    }
}

impl Default for LinkPatterns {
    fn default() -> Self {
        Self::new()
    }
}

fn capture_all(pattern: &Regex, html: &str) -> Vec<String> {
    pattern
        .captures_iter(html)
        .map(|c| c[1].to_string())
        .collect()
}

pub fn artist_list_url(character: char, page: u32) -> String {
    format!(
        "https://www.hooktheory.com/theorytab/artists/{}?page={}",
        character, page
    )
}

pub fn artist_list_key(character: char, page: u32) -> String {
    format!("character/{}-{}.html", character, page)
}

pub fn song_list_url(artist: &str, page: u32) -> String {
    format!(
        "https://www.hooktheory.com/theorytab/artists/a/{}?page={}",
        artist, page
    )
}

pub fn song_list_key(artist: &str, page: u32) -> String {
    format!("artist/{}-{}.html", artist, page)
}

pub fn section_list_url(artist: &str, song: &str) -> String {
    format!("https://www.hooktheory.com/theorytab/view/{}/{}", artist, song)
}

pub fn section_list_key(artist: &str, song: &str) -> String {
    format!("song/{}-{}.html", artist, song)
}

pub fn section_xml_url(id: u64) -> String {
    format!("https://www.hooktheory.com/songs/getXmlByPk?pk={}", id)
}

pub fn section_xml_key(id: u64) -> String {
    format!("section/{}.xml", id)
}
