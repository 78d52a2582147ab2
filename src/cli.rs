//! Command-line interface for the `dork` binary.

use clap::Parser;
use std::path::PathBuf;

use crate::error::{DorkError, Result};

/// DorkScript - version control for search strategies
#[derive(Parser, Debug)]
#[command(name = "dork")]
#[command(about = "Run .dork search query files in your browser")]
#[command(version)]
pub struct Cli {
    /// Path to the .dork file, plus optional NAME=value variable overrides
    #[arg(value_name = "FILE [VAR=VALUE...]")]
    pub args: Vec<String>,

    /// Only run the first N queries
    #[arg(short = 'n', long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// Show queries and URLs without opening a browser
    #[arg(short, long)]
    pub preview: bool,

    /// Override the engine for all queries
    #[arg(short, long, value_name = "ENGINE")]
    pub engine: Option<String>,

    /// Seconds between browser opens
    #[arg(short, long, default_value_t = 0.5, value_name = "SECONDS")]
    pub delay: f64,

    /// Write URLs to a file (still opens the browser unless --preview)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print only the URLs, one per line (for piping, no browser)
    #[arg(short, long)]
    pub urls: bool,

    /// List all recognized engines and exit
    #[arg(long)]
    pub engines: bool,

    /// Run the built-in self tests and exit
    #[arg(long)]
    pub selftest: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }

    /// Split positional arguments into the script path and variable
    /// overrides.
    ///
    /// A positional containing `=` is a `NAME=value` override (matching
    /// `@var` names in the script); the single remaining argument is the
    /// script path. Order does not matter.
    pub fn script_and_vars(&self) -> Result<(Option<PathBuf>, Vec<(String, String)>)> {
        let mut script: Option<PathBuf> = None;
        let mut vars = Vec::new();

        for arg in &self.args {
            match arg.split_once('=') {
                Some((name, value)) if !name.is_empty() => {
                    vars.push((name.to_string(), value.to_string()));
                }
                _ => {
                    if script.is_some() {
                        return Err(DorkError::config(format!(
                            "unexpected positional argument '{arg}'"
                        )));
                    }
                    script = Some(PathBuf::from(arg));
                }
            }
        }

        Ok((script, vars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_file_only() {
        let cli = Cli::try_parse_from(["dork", "recon.dork"]).unwrap();
        let (script, vars) = cli.script_and_vars().unwrap();
        assert_eq!(script.unwrap().to_str().unwrap(), "recon.dork");
        assert!(vars.is_empty());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "dork", "recon.dork", "-n", "3", "-p", "-e", "bing", "-d", "0",
        ])
        .unwrap();
        assert_eq!(cli.limit, Some(3));
        assert!(cli.preview);
        assert_eq!(cli.engine.as_deref(), Some("bing"));
        assert_eq!(cli.delay, 0.0);
    }

    #[test]
    fn test_cli_variable_overrides_any_order() {
        let cli =
            Cli::try_parse_from(["dork", "TARGET=real.com", "recon.dork", "ENV=prod"]).unwrap();
        let (script, vars) = cli.script_and_vars().unwrap();
        assert_eq!(script.unwrap().to_str().unwrap(), "recon.dork");
        assert_eq!(
            vars,
            vec![
                ("TARGET".to_string(), "real.com".to_string()),
                ("ENV".to_string(), "prod".to_string()),
            ]
        );
    }

    #[test]
    fn test_cli_two_scripts_rejected() {
        let cli = Cli::try_parse_from(["dork", "a.dork", "b.dork"]).unwrap();
        assert!(cli.script_and_vars().is_err());
    }

    #[test]
    fn test_cli_engines_mode_needs_no_file() {
        let cli = Cli::try_parse_from(["dork", "--engines"]).unwrap();
        assert!(cli.engines);
        let (script, _) = cli.script_and_vars().unwrap();
        assert!(script.is_none());
    }

    #[test]
    fn test_cli_limit_rejects_non_integer() {
        assert!(Cli::try_parse_from(["dork", "f.dork", "-n", "lots"]).is_err());
    }
}
