//! dork - run `.dork` search query files in your browser.

use std::path::PathBuf;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use dorkscript::cli::Cli;
use dorkscript::dispatch::{self, DispatchOptions, SystemBrowser};
use dorkscript::engines::{self, EngineCategory};
use dorkscript::error::{DorkError, Result};
use dorkscript::parser::Parser;
use dorkscript::selftest;

/// Initialize the tracing subscriber; RUST_LOG overrides the default level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse_args();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.engines {
        print_engine_catalog();
        return Ok(());
    }
    if cli.selftest {
        return selftest::run();
    }

    // Reject a bad --engine before touching the script at all
    if let Some(name) = &cli.engine {
        let ident = name.to_ascii_lowercase();
        if engines::lookup(&ident).is_none() {
            return Err(DorkError::config(format!(
                "unknown engine '{ident}' (run --engines for the list)"
            )));
        }
    }

    let (script, vars) = cli.script_and_vars()?;
    let script: PathBuf =
        script.ok_or_else(|| DorkError::config("no .dork file specified (see --help)"))?;
    debug!(script = %script.display(), "parsing");

    let mut parser = Parser::with_overrides(vars.clone());
    let records = parser.parse_file(&script)?;

    if records.is_empty() {
        if !cli.urls {
            eprintln!("No queries found in file.");
        }
        return Ok(());
    }

    let opts = DispatchOptions {
        limit: cli.limit,
        engine_override: cli.engine.clone(),
        preview: cli.preview,
        urls_only: cli.urls,
        output: cli.output.clone(),
        delay: cli.delay,
        label: script
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| script.display().to_string()),
        variables: vars,
    };

    let mut stdout = std::io::stdout();
    dispatch::run(&records, &opts, &SystemBrowser, &mut stdout)
}

/// Print the engine catalog grouped by category.
fn print_engine_catalog() {
    use strum::IntoEnumIterator;

    let engines = engines::all();
    println!();
    println!("  DorkScript - {} search engines", engines.len());
    println!("  {}", "=".repeat(60));
    for category in EngineCategory::iter() {
        let names: Vec<&str> = engines
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.name)
            .collect();
        if names.is_empty() {
            continue;
        }
        println!();
        println!("  {category}:");
        for name in names {
            println!("    {name}");
        }
    }
    println!();
}
