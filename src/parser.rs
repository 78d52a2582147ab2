//! Line-oriented parser for `.dork` files.
//!
//! The grammar is small: full-line and inline `#` comments, `@engine`,
//! `@var`, and `@include` directives, and everything else is a query line.
//! Parsing is all-or-nothing; the complete record sequence (including all
//! included files) is built before the dispatcher runs, so a malformed
//! script never produces partial browser side effects.
//!
//! Parser state (current engine, variable table, visited includes) lives in
//! an explicit [`Parser`] value rather than process-wide globals, which
//! keeps the whole thing reentrant and testable as a function from text to
//! records.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::engines::{self, Engine};
use crate::error::{DorkError, Result};

/// One resolved query, paired with the engine it will be issued against.
///
/// `text` is post-substitution but pre-encoding; `original` is the line as
/// written (after comment stripping), kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
    pub engine: &'static Engine,
    pub text: String,
    pub file: String,
    pub line: usize,
    pub original: String,
}

/// Parser state threaded through line processing.
///
/// Variables accumulate left-to-right and are shared across `@include`
/// boundaries; the engine cursor is per-file. Names pinned from the command
/// line (`NAME=value` arguments) are locked against `@var` redefinition.
#[derive(Debug, Default)]
pub struct Parser {
    variables: HashMap<String, String>,
    pinned: HashSet<String>,
    visited: HashSet<PathBuf>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with command-line variable overrides already applied.
    pub fn with_overrides(overrides: Vec<(String, String)>) -> Self {
        let mut parser = Self::new();
        for (name, value) in overrides {
            parser.pinned.insert(name.clone());
            parser.variables.insert(name, value);
        }
        parser
    }

    /// Parse a `.dork` file, following `@include` directives.
    ///
    /// Each file is parsed at most once per run; a circular include chain
    /// terminates with every file's records emitted exactly once.
    pub fn parse_file(&mut self, path: &Path) -> Result<Vec<QueryRecord>> {
        let canonical = fs::canonicalize(path).map_err(|e| DorkError::file(path, e))?;
        if !self.visited.insert(canonical.clone()) {
            debug!(path = %path.display(), "skipping already-included file");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&canonical).map_err(|e| DorkError::file(path, e))?;
        let file_label = canonical
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let base_dir = canonical.parent().unwrap_or_else(|| Path::new("."));

        self.parse_source(&content, &file_label, base_dir)
    }

    /// Parse script text directly.
    ///
    /// `file` labels diagnostics; `base_dir` anchors relative `@include`
    /// paths.
    pub fn parse_source(
        &mut self,
        source: &str,
        file: &str,
        base_dir: &Path,
    ) -> Result<Vec<QueryRecord>> {
        let mut records = Vec::new();
        let mut current_engine = engines::default_engine();

        for (idx, raw_line) in source.lines().enumerate() {
            let lineno = idx + 1;
            let line = raw_line.trim();

            // Empty lines and full-line comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = strip_inline_comment(line);
            if line.is_empty() {
                continue;
            }

            if line.starts_with('@') {
                let (head, rest) = match line.split_once(char::is_whitespace) {
                    Some((head, rest)) => (head, rest.trim()),
                    None => (line, ""),
                };
                match head {
                    "@engine" => {
                        current_engine = self.parse_engine_directive(rest, file, lineno)?;
                    }
                    "@var" => {
                        self.parse_var_directive(rest, file, lineno)?;
                    }
                    "@include" => {
                        let included = self.parse_include_directive(rest, base_dir, file, lineno)?;
                        records.extend(included);
                    }
                    other => {
                        return Err(DorkError::parse(
                            file,
                            lineno,
                            format!("unknown directive '{other}'"),
                        ));
                    }
                }
                continue;
            }

            // A query line: substitute variables and record it
            let text = self.substitute(line, file, lineno)?;
            records.push(QueryRecord {
                engine: current_engine,
                text,
                file: file.to_string(),
                line: lineno,
                original: line.to_string(),
            });
        }

        Ok(records)
    }

    fn parse_engine_directive(
        &self,
        rest: &str,
        file: &str,
        lineno: usize,
    ) -> Result<&'static Engine> {
        if rest.is_empty() {
            return Err(DorkError::parse(file, lineno, "@engine expects an engine name"));
        }
        let ident = rest.to_ascii_lowercase();
        match engines::lookup(&ident) {
            Some(engine) => {
                debug!(engine = engine.name, line = lineno, "engine directive");
                Ok(engine)
            }
            None => Err(DorkError::config(format!(
                "{file}:{lineno}: unknown engine '{ident}' (run --engines for the list)"
            ))),
        }
    }

    fn parse_var_directive(&mut self, rest: &str, file: &str, lineno: usize) -> Result<()> {
        let (name, value) = rest.split_once('=').ok_or_else(|| {
            DorkError::parse(file, lineno, "malformed @var (expected NAME = VALUE)")
        })?;
        let name = name.trim();
        if !is_identifier(name) {
            return Err(DorkError::parse(
                file,
                lineno,
                format!("invalid variable name '{name}'"),
            ));
        }
        if self.pinned.contains(name) {
            debug!(name, line = lineno, "@var shadowed by command-line override");
            return Ok(());
        }
        self.variables.insert(name.to_string(), value.trim().to_string());
        Ok(())
    }

    fn parse_include_directive(
        &mut self,
        rest: &str,
        base_dir: &Path,
        file: &str,
        lineno: usize,
    ) -> Result<Vec<QueryRecord>> {
        if rest.is_empty() {
            return Err(DorkError::parse(file, lineno, "@include expects a file path"));
        }
        let raw = rest.trim_matches(|c| c == '"' || c == '\'');
        let path = PathBuf::from(raw);
        let path = if path.is_absolute() {
            path
        } else {
            base_dir.join(path)
        };
        debug!(path = %path.display(), line = lineno, "include directive");
        self.parse_file(&path)
    }

    /// Replace `$NAME` and `${NAME}` references with their values.
    ///
    /// Values are inserted literally (never re-scanned), so a value holding
    /// a `$` cannot trigger a second substitution. A `$` not followed by an
    /// identifier, such as `$1` or a trailing `$`, stays literal.
    fn substitute(&self, line: &str, file: &str, lineno: usize) -> Result<String> {
        let mut out = String::with_capacity(line.len());
        let mut rest = line;

        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            rest = &rest[pos..];

            if let Some(brace) = rest.strip_prefix("${") {
                let Some(end) = brace.find('}') else {
                    return Err(DorkError::parse(
                        file,
                        lineno,
                        "unterminated '${' variable reference",
                    ));
                };
                let name = &brace[..end];
                if is_identifier(name) {
                    out.push_str(self.resolve(name, file, lineno)?);
                    rest = &brace[end + 1..];
                } else {
                    out.push('$');
                    rest = &rest[1..];
                }
            } else {
                let len = identifier_len(&rest[1..]);
                if len > 0 {
                    let name = &rest[1..1 + len];
                    out.push_str(self.resolve(name, file, lineno)?);
                    rest = &rest[1 + len..];
                } else {
                    out.push('$');
                    rest = &rest[1..];
                }
            }
        }
        out.push_str(rest);
        Ok(out)
    }

    fn resolve(&self, name: &str, file: &str, lineno: usize) -> Result<&str> {
        self.variables.get(name).map(String::as_str).ok_or_else(|| {
            DorkError::parse(file, lineno, format!("undefined variable '{name}'"))
        })
    }
}

/// Strip a trailing inline comment.
///
/// A `#` starts a comment only when preceded by whitespace and outside
/// single or double quotes; `site:example.com#frag` and `"a # b"` keep
/// their `#` literally.
fn strip_inline_comment(line: &str) -> &str {
    let mut in_single = false;
    let mut in_double = false;
    let mut prev: Option<char> = None;

    for (i, ch) in line.char_indices() {
        match ch {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '#' if !in_single && !in_double => {
                if prev.is_none_or(char::is_whitespace) {
                    return line[..i].trim_end();
                }
            }
            _ => {}
        }
        prev = Some(ch);
    }
    line
}

/// Bare variable names: `[A-Za-z_][A-Za-z0-9_]*`.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Length in bytes of the identifier prefix of `s`, 0 if none.
fn identifier_len(s: &str) -> usize {
    let mut len = 0;
    for (i, c) in s.char_indices() {
        let valid = if i == 0 {
            c.is_ascii_alphabetic() || c == '_'
        } else {
            c.is_ascii_alphanumeric() || c == '_'
        };
        if !valid {
            break;
        }
        len = i + c.len_utf8();
    }
    len
}
