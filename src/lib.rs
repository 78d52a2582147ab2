//! DorkScript library
//!
//! Parses plain-text `.dork` query scripts (comments, `@engine`, `@var`,
//! `@include` directives, variable substitution) into an ordered record
//! sequence and builds the search URL for each record. Opening URLs in a
//! browser is hidden behind the [`dispatch::UrlOpener`] trait so everything
//! up to the side effect is testable in-process.

pub mod cli;
pub mod dispatch;
pub mod engines;
pub mod error;
pub mod parser;
pub mod selftest;

// Re-export main types for convenience
pub use dispatch::{DispatchOptions, ResolvedQuery, SystemBrowser, UrlOpener};
pub use engines::{DEFAULT_ENGINE, Engine, EngineCategory, QueryEncoding};
pub use error::{DorkError, Result};
pub use parser::{Parser, QueryRecord};
