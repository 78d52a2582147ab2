//! Built-in self tests, run via `--selftest`.
//!
//! A handful of end-to-end checks over real files in a scratch directory,
//! independent of the cargo test harness, so a packaged binary can verify
//! itself on the machine it runs on.

use std::fs;
use std::path::Path;

use anyhow::{Context, bail};

use crate::engines;
use crate::error::{DorkError, Result};
use crate::parser::Parser;

type Check = fn() -> anyhow::Result<()>;

/// Run every check, reporting failures on stderr.
pub fn run() -> Result<()> {
    let checks: &[(&str, Check)] = &[
        ("inline comments", check_inline_comments),
        ("include variables", check_include_variables),
        ("engine scoping", check_engine_scoping),
        ("fofa base64", check_fofa_base64),
        ("archive raw", check_archive_raw),
    ];

    let mut failures = 0;
    for (name, check) in checks {
        if let Err(e) = check() {
            eprintln!("Selftest failed: {name}: {e:#}");
            failures += 1;
        }
    }

    if failures == 0 {
        println!("Selftest ok.");
        Ok(())
    } else {
        Err(DorkError::config(format!(
            "{failures} self-test check(s) failed"
        )))
    }
}

fn check_inline_comments() -> anyhow::Result<()> {
    let records = Parser::new().parse_source(
        "site:example.com \"sensitive\"  # comment\n",
        "selftest.dork",
        Path::new("."),
    )?;
    if records.len() != 1 || records[0].text != "site:example.com \"sensitive\"" {
        bail!("unexpected records: {records:?}");
    }
    Ok(())
}

fn check_include_variables() -> anyhow::Result<()> {
    let dir = tempfile::tempdir().context("creating scratch directory")?;
    fs::write(dir.path().join("included.dork"), "@var TARGET = included.com\n")
        .context("writing included.dork")?;
    let parent = dir.path().join("parent.dork");
    fs::write(&parent, "@include included.dork\nsite:$TARGET\n")
        .context("writing parent.dork")?;

    let records = Parser::new().parse_file(&parent)?;
    if records.len() != 1 || records[0].text != "site:included.com" {
        bail!("unexpected records: {records:?}");
    }
    Ok(())
}

fn check_engine_scoping() -> anyhow::Result<()> {
    let records = Parser::new().parse_source(
        "@engine github\nlanguage:rust cve\n",
        "selftest.dork",
        Path::new("."),
    )?;
    if records.len() != 1 || records[0].engine.name != "github" {
        bail!("unexpected records: {records:?}");
    }
    Ok(())
}

fn check_fofa_base64() -> anyhow::Result<()> {
    let engine = engines::lookup("fofa").context("fofa missing from table")?;
    let url = engine.build_url("test");
    let expected = format!("{}dGVzdA==", engine.template);
    if url != expected {
        bail!("got {url}, expected {expected}");
    }
    Ok(())
}

fn check_archive_raw() -> anyhow::Result<()> {
    let engine = engines::lookup("archive").context("archive missing from table")?;
    let url = engine.build_url("example.com/admin");
    let expected = format!("{}example.com/admin", engine.template);
    if url != expected {
        bail!("got {url}, expected {expected}");
    }
    Ok(())
}
