//! Deterministic key -> path cache for raw pages, section XML, and audio.
//!
//! Keys are relative paths like `section/42.xml`; the layout is shared
//! with the downloader so audio lands next to the pages it came from.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub struct Cache {
    root: PathBuf,
    fresh: bool,
}

impl Cache {
    /// Open a cache rooted at `root`, defaulting to `~/.hookscrape/cache`.
    /// With `fresh` set, reads always miss so everything is redownloaded.
    pub fn new(root: Option<PathBuf>, fresh: bool) -> Result<Self> {
        let root = match root {
            Some(path) => path,
            None => default_cache_path().context("no home directory for the default cache")?,
        };
        Ok(Cache { root, fresh })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Cached text for `key`, unless `--fresh` asked to redownload.
    pub fn get(&self, key: &str) -> Option<String> {
        if self.fresh {
            return None;
        }
        fs::read_to_string(self.path(key)).ok()
    }

    pub fn put(&self, key: &str, text: &str) -> Result<()> {
        let path = self.path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating cache directory {}", parent.display()))?;
        }
        fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Every cached file under a subdirectory, sorted by name.
    pub fn files_under(&self, dir: &str) -> Result<Vec<PathBuf>> {
        let dir = self.root.join(dir);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => return Ok(Vec::new()),
        };
        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        Ok(files)
    }

    /// Whether any cached file under `dir` has the given stem. Audio files
    /// keep whatever container extension the downloader chose.
    pub fn has_stem(&self, dir: &str, stem: &str) -> bool {
        if self.fresh {
            return false;
        }
        self.files_under(dir)
            .map(|files| {
                files
                    .iter()
                    .any(|p| p.file_stem().and_then(|s| s.to_str()) == Some(stem))
            })
            .unwrap_or(false)
    }
}

fn default_cache_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".hookscrape").join("cache"))
}
