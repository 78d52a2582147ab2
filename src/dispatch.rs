//! Query dispatch: URL resolution, preview output, browser launch.
//!
//! The dispatcher consumes the record sequence the parser built. Engine
//! validation (including the `--engine` override) happens up front, before
//! any side effect; browser launches themselves are best-effort, so one
//! failed open never aborts the remaining queries.

use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::engines::{self, Engine};
use crate::error::{DorkError, Result};
use crate::parser::QueryRecord;

/// Capability to open a URL in the user's browser.
///
/// The single seam between the core and the OS; tests substitute a
/// recording fake so no real browser is spawned.
pub trait UrlOpener {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// Opens URLs with the system default browser.
pub struct SystemBrowser;

impl UrlOpener for SystemBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        webbrowser::open(url)
    }
}

/// Run-time options for a dispatch pass.
#[derive(Debug, Clone, Default)]
pub struct DispatchOptions {
    /// Only dispatch the first N records
    pub limit: Option<usize>,
    /// Override every record's engine for this run
    pub engine_override: Option<String>,
    /// Print URLs instead of opening them
    pub preview: bool,
    /// Print bare URLs only, one per line (for piping)
    pub urls_only: bool,
    /// Also write the URLs to this file
    pub output: Option<PathBuf>,
    /// Seconds between browser opens
    pub delay: f64,
    /// Script name shown in the banner
    pub label: String,
    /// Command-line variable overrides, echoed in the banner
    pub variables: Vec<(String, String)>,
}

/// A record with its effective engine and final URL.
#[derive(Debug)]
pub struct ResolvedQuery<'a> {
    pub record: &'a QueryRecord,
    pub engine: &'static Engine,
    pub url: String,
}

/// Apply limit and engine override, then build the URL for each record.
///
/// An unknown override engine is a hard configuration error raised before
/// any URL is opened.
pub fn resolve<'a>(
    records: &'a [QueryRecord],
    limit: Option<usize>,
    engine_override: Option<&str>,
) -> Result<Vec<ResolvedQuery<'a>>> {
    let override_engine = match engine_override {
        Some(name) => {
            let ident = name.to_ascii_lowercase();
            Some(engines::lookup(&ident).ok_or_else(|| {
                DorkError::config(format!(
                    "unknown engine '{ident}' (run --engines for the list)"
                ))
            })?)
        }
        None => None,
    };

    let take = limit.unwrap_or(records.len());
    Ok(records
        .iter()
        .take(take)
        .map(|record| {
            let engine = override_engine.unwrap_or(record.engine);
            ResolvedQuery {
                record,
                engine,
                url: engine.build_url(&record.text),
            }
        })
        .collect())
}

/// Dispatch records according to the options.
///
/// `out` receives all normal output (the "emit this line" capability);
/// diagnostics for failed opens go to stderr.
pub fn run(
    records: &[QueryRecord],
    opts: &DispatchOptions,
    opener: &dyn UrlOpener,
    out: &mut dyn Write,
) -> Result<()> {
    let resolved = resolve(records, opts.limit, opts.engine_override.as_deref())?;
    debug!(queries = resolved.len(), preview = opts.preview, "dispatching");

    // URLs-only mode: bare output for piping, nothing else
    if opts.urls_only {
        for q in &resolved {
            writeln!(out, "{}", q.url)?;
        }
        return Ok(());
    }

    if let Some(path) = &opts.output {
        let mut content = String::new();
        for q in &resolved {
            content.push_str(&q.url);
            content.push('\n');
        }
        std::fs::write(path, content).map_err(|e| DorkError::file(path, e))?;
        writeln!(out, "Wrote {} URLs to {}", resolved.len(), path.display())?;

        if !opts.preview {
            open_all(&resolved, opts.delay, opener);
            writeln!(out, "Opened {} searches in your browser.", resolved.len())?;
        }
        return Ok(());
    }

    // Normal mode: numbered listing, then open unless previewing
    writeln!(out)?;
    writeln!(out, "  DorkScript: {}", opts.label)?;
    writeln!(out, "  {}", "=".repeat(60))?;
    if !opts.variables.is_empty() {
        let vars: Vec<String> = opts
            .variables
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        writeln!(out, "  Variables: {}", vars.join(", "))?;
    }
    writeln!(out, "  Queries: {}", resolved.len())?;
    writeln!(out)?;

    for (i, q) in resolved.iter().enumerate() {
        writeln!(out, "  [{}] {}", i + 1, display_query(&q.record.text))?;
        writeln!(out, "      @{}", q.engine.name)?;
        if opts.preview {
            writeln!(out, "      {}", q.url)?;
        }
        writeln!(out)?;
    }

    if opts.preview {
        writeln!(out, "  (Preview mode - no browsers opened)")?;
    } else {
        open_all(&resolved, opts.delay, opener);
        writeln!(out, "  Opened {} searches in your browser.", resolved.len())?;
    }
    writeln!(out)?;

    Ok(())
}

/// Open every URL in order, sleeping `delay` seconds between opens.
///
/// A failed launch is reported and skipped; the rest of the sequence still
/// runs.
fn open_all(resolved: &[ResolvedQuery<'_>], delay: f64, opener: &dyn UrlOpener) {
    for (i, q) in resolved.iter().enumerate() {
        if let Err(e) = opener.open(&q.url) {
            warn!(url = %q.url, error = %e, "browser launch failed");
            eprintln!("Warning: failed to open {}: {}", q.url, e);
        }
        if delay > 0.0 && i + 1 < resolved.len() {
            thread::sleep(Duration::from_secs_f64(delay));
        }
    }
}

/// Truncate long queries for the listing.
fn display_query(text: &str) -> String {
    if text.chars().count() < 55 {
        text.to_string()
    } else {
        let head: String = text.chars().take(52).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_query_truncation() {
        let short = "site:example.com";
        assert_eq!(display_query(short), short);

        let long = "a".repeat(80);
        let shown = display_query(&long);
        assert_eq!(shown.chars().count(), 55);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn test_resolve_rejects_unknown_override() {
        let err = resolve(&[], None, Some("askjeeves")).unwrap_err();
        assert!(matches!(err, DorkError::Config(_)));
    }
}
