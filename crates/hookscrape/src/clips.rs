//! Clip export: run the parser over cached section XML.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use theorytab::Level;

use crate::cache::Cache;

/// Parse every cached section file and write clips as JSON lines.
pub fn export(cache: &Cache, out: &Path) -> Result<()> {
    let files = cache.files_under("section")?;
    info!(sections = files.len(), "parsing cached sections");

    let mut writer: Box<dyn Write> = if out.as_os_str() == "-" {
        Box::new(io::stdout())
    } else {
        Box::new(
            fs::File::create(out).with_context(|| format!("creating {}", out.display()))?,
        )
    };

    let mut written = 0usize;
    let mut documents_without_clips = 0usize;
    for path in files {
        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) => {
                warn!(file = %path.display(), error = %err, "unreadable cache file");
                continue;
            }
        };

        let result = theorytab::parse(&source, &display_name(&path));
        log_diagnostics(&result.diagnostics);
        if result.value.is_empty() {
            documents_without_clips += 1;
        }
        for clip in &result.value {
            serde_json::to_writer(&mut writer, clip)?;
            writer.write_all(b"\n")?;
            written += 1;
        }
    }
    writer.flush()?;

    info!(written, documents_without_clips, "clips exported");
    Ok(())
}

/// Parse one theorytab file and print its clips as pretty JSON.
pub fn parse_one(file: &Path) -> Result<()> {
    let source =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let result = theorytab::parse(&source, &display_name(file));
    log_diagnostics(&result.diagnostics);
    println!("{}", serde_json::to_string_pretty(&result.value)?);
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn log_diagnostics(diagnostics: &[theorytab::Diagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic.level {
            Level::Error => {
                error!(source = %diagnostic.source, reason = %diagnostic.reason, "parse error")
            }
            Level::Warning => {
                warn!(source = %diagnostic.source, reason = %diagnostic.reason, "parse warning")
            }
        }
    }
}
