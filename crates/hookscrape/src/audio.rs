//! Backing-audio downloads.
//!
//! Reads a clips file, dedups the video ids, and hands each one to
//! yt-dlp. A failed download is logged and skipped; the next clip run
//! will pick it up again.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::{info, warn};

use theorytab::Clip;

use crate::cache::Cache;

pub async fn run(cache: &Cache, clips_file: &Path) -> Result<()> {
    let ids = video_ids(clips_file)?;
    info!(videos = ids.len(), "videos referenced by clips");

    let mut downloaded = 0usize;
    let mut cached = 0usize;
    let mut failed = 0usize;
    for id in ids {
        if cache.has_stem("youtube", &id) {
            cached += 1;
            continue;
        }
        match download(cache, &id).await {
            Ok(()) => downloaded += 1,
            Err(err) => {
                warn!(video = %id, error = %err, "download failed");
                failed += 1;
            }
        }
    }

    info!(downloaded, cached, failed, "audio pass finished");
    Ok(())
}

/// Unique video ids in a JSON-lines clips file.
fn video_ids(clips_file: &Path) -> Result<BTreeSet<String>> {
    let text = fs::read_to_string(clips_file)
        .with_context(|| format!("reading {}", clips_file.display()))?;

    let mut ids = BTreeSet::new();
    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        let clip: Clip = serde_json::from_str(line).context("malformed clip record")?;
        ids.insert(clip.audio_source.video_id);
    }
    Ok(ids)
}

async fn download(cache: &Cache, id: &str) -> Result<()> {
    let dir = cache.path("youtube");
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let template = dir.join(format!("{}.%(ext)s", id));

    let status = Command::new("yt-dlp")
        .arg("--extract-audio")
        .arg("--format")
        .arg("bestaudio")
        .arg("--output")
        .arg(&template)
        .arg(format!("https://www.youtube.com/watch?v={}", id))
        .status()
        .await
        .context("launching yt-dlp")?;
    anyhow::ensure!(status.success(), "yt-dlp exited with {}", status);
    Ok(())
}
