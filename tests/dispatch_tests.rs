// Integration tests for dispatch: limiting, engine overrides, preview and
// urls-only output, URL export, and best-effort browser launching.

use std::cell::RefCell;
use std::io;
use std::path::Path;

use dorkscript::dispatch::{self, DispatchOptions, UrlOpener};
use dorkscript::{Parser, QueryRecord};

/// Records every open attempt; optionally fails on URLs containing a marker.
struct RecordingOpener {
    calls: RefCell<Vec<String>>,
    fail_marker: Option<&'static str>,
}

impl RecordingOpener {
    fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_marker: None,
        }
    }

    fn failing_on(marker: &'static str) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_marker: Some(marker),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl UrlOpener for RecordingOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        self.calls.borrow_mut().push(url.to_string());
        if self.fail_marker.is_some_and(|m| url.contains(m)) {
            return Err(io::Error::other("no browser available"));
        }
        Ok(())
    }
}

fn records(source: &str) -> Vec<QueryRecord> {
    Parser::new()
        .parse_source(source, "test.dork", Path::new("."))
        .unwrap()
}

fn base_opts() -> DispatchOptions {
    DispatchOptions {
        label: "test.dork".to_string(),
        ..Default::default()
    }
}

const FIVE_QUERIES: &str = "one\ntwo\nthree\nfour\nfive\n";

#[test]
fn limit_dispatches_first_n_in_file_order() {
    let records = records(FIVE_QUERIES);
    let opener = RecordingOpener::new();
    let mut out = Vec::new();

    let opts = DispatchOptions {
        limit: Some(2),
        ..base_opts()
    };
    dispatch::run(&records, &opts, &opener, &mut out).unwrap();

    let calls = opener.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], "https://www.google.com/search?q=one");
    assert_eq!(calls[1], "https://www.google.com/search?q=two");
}

#[test]
fn engine_override_beats_per_line_directives() {
    let records = records("@engine github\none\n@engine shodan\ntwo\n");
    let opener = RecordingOpener::new();
    let mut out = Vec::new();

    let opts = DispatchOptions {
        engine_override: Some("ddg".to_string()),
        ..base_opts()
    };
    dispatch::run(&records, &opts, &opener, &mut out).unwrap();

    for url in opener.calls() {
        assert!(url.starts_with("https://duckduckgo.com/?q="), "got {url}");
    }
}

#[test]
fn unknown_override_fails_before_any_open() {
    let records = records(FIVE_QUERIES);
    let opener = RecordingOpener::new();
    let mut out = Vec::new();

    let opts = DispatchOptions {
        engine_override: Some("askjeeves".to_string()),
        ..base_opts()
    };
    let err = dispatch::run(&records, &opts, &opener, &mut out).unwrap_err();

    assert!(matches!(err, dorkscript::DorkError::Config(_)));
    assert!(opener.calls().is_empty());
    assert!(out.is_empty());
}

#[test]
fn preview_opens_nothing_and_is_deterministic() {
    let records = records("@var T = example.com\nsite:$T secrets\n");
    let opts = DispatchOptions {
        preview: true,
        ..base_opts()
    };

    let opener = RecordingOpener::new();
    let mut first = Vec::new();
    dispatch::run(&records, &opts, &opener, &mut first).unwrap();
    let mut second = Vec::new();
    dispatch::run(&records, &opts, &opener, &mut second).unwrap();

    assert!(opener.calls().is_empty());
    assert_eq!(first, second);
    let text = String::from_utf8(first).unwrap();
    assert!(text.contains("https://www.google.com/search?q=site%3Aexample.com%20secrets"));
}

#[test]
fn urls_only_prints_bare_urls() {
    let records = records("one\ntwo\n");
    let opener = RecordingOpener::new();
    let mut out = Vec::new();

    let opts = DispatchOptions {
        urls_only: true,
        ..base_opts()
    };
    dispatch::run(&records, &opts, &opener, &mut out).unwrap();

    assert!(opener.calls().is_empty());
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "https://www.google.com/search?q=one\nhttps://www.google.com/search?q=two\n"
    );
}

#[test]
fn failed_open_does_not_stop_later_records() {
    let records = records("one\ntwo\nthree\n");
    let opener = RecordingOpener::failing_on("two");
    let mut out = Vec::new();

    dispatch::run(&records, &base_opts(), &opener, &mut out).unwrap();

    // All three were attempted despite the middle failure
    assert_eq!(opener.calls().len(), 3);
    assert!(opener.calls()[2].ends_with("three"));
}

#[test]
fn output_file_receives_urls() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("urls.txt");
    let records = records("one\ntwo\n");
    let opener = RecordingOpener::new();
    let mut out = Vec::new();

    let opts = DispatchOptions {
        output: Some(path.clone()),
        preview: true,
        ..base_opts()
    };
    dispatch::run(&records, &opts, &opener, &mut out).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "https://www.google.com/search?q=one\nhttps://www.google.com/search?q=two\n"
    );
    // Preview mode: exported but never opened
    assert!(opener.calls().is_empty());
}

#[test]
fn output_file_still_opens_browser_without_preview() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("urls.txt");
    let records = records("one\n");
    let opener = RecordingOpener::new();
    let mut out = Vec::new();

    let opts = DispatchOptions {
        output: Some(path),
        ..base_opts()
    };
    dispatch::run(&records, &opts, &opener, &mut out).unwrap();

    assert_eq!(opener.calls().len(), 1);
}
