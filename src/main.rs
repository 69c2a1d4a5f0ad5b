//! exarch CLI - Semantic search for Elixir codebases
//!
//! Orchestrates the pipeline:
//!
//! 1. Validation: reject unknown modes and empty terms up front
//! 2. File Discovery: find `.ex`/`.exs` files respecting .gitignore
//! 3. Search: parse each file with tree-sitter and run the chosen mode
//! 4. Rendering: print `<line>:<text>` grouped under file headings

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use exarch::config::Config;
use exarch::discovery::find_source_files;
use exarch::rendering::ResultRenderer;
use exarch::{language, scan, Queries, SearchRequest};

/// Semantic search for Elixir codebases
///
/// Searches the syntax tree rather than raw text. Remote calls are matched
/// on their alias-resolved name, so `TestApp.Repo.get` finds `Repo.get(...)`
/// after `alias TestApp.Repo`.
///
/// Examples:
///   exarch fncall Repo.update          # Calls to Repo.update
///   exarch str "not found"             # Strings outside documentation
///   exarch doc "deprecated" -r apps/   # Documentation text
#[derive(Parser, Debug)]
#[command(name = "exarch")]
#[command(version)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Search mode: fncall, str or doc
    #[arg(value_name = "SEARCH_MODE")]
    pub mode: String,

    /// Text to search for (case-sensitive substring)
    #[arg(value_name = "SEARCH")]
    pub term: String,

    /// Directory or file to search
    ///
    /// exarch.toml is looked up here and in parent directories.
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Filter files by extension (can be repeated)
    ///
    /// Replaces the configured extensions. Examples:
    ///   -e ex          # Library code only
    ///   -e exs         # Scripts and tests
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Disable colored output
    ///
    /// Color is also off when stdout is not a terminal.
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output
    ///
    /// Enables debug logging on stderr. RUST_LOG takes precedence.
    #[arg(short, long)]
    pub verbose: bool,

    /// Print a summary of files scanned and results to stderr
    #[arg(long)]
    pub stats: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();

    if let Err(e) = result {
        eprintln!("Failed to initialize tracing: {}", e);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let start = Instant::now();

    let request = SearchRequest::parse(&cli.mode, &cli.term)?;

    let root = cli.root.canonicalize().with_context(|| {
        format!("Failed to resolve root path '{}'", cli.root.display())
    })?;

    let config_dir = if root.is_file() {
        root.parent().map(PathBuf::from).unwrap_or_else(|| root.clone())
    } else {
        root.clone()
    };
    let mut config = Config::load(&config_dir);
    if !cli.extensions.is_empty() {
        config.extensions = cli.extensions.clone();
    }

    tracing::debug!("exarch v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("root: {}", root.display());
    tracing::debug!("{}", config.display_summary());

    let files = find_source_files(&root, &config)?;
    tracing::debug!("found {} files ({:.2?})", files.len(), start.elapsed());

    let language = language();
    let queries = Queries::compile(&language)?;
    let report = scan(&files, &config_dir, &language, &queries, &request)?;

    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let renderer = ResultRenderer::new(use_color);
    print!("{}", renderer.render(&report));

    if cli.stats {
        let stats_color = !cli.no_color && std::io::stderr().is_terminal();
        eprintln!(
            "{}",
            ResultRenderer::new(stats_color).render_stats(&report, start.elapsed())
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_minimal() {
        let cli = Cli::parse_from(["exarch", "fncall", "Repo.get"]);
        assert_eq!(cli.mode, "fncall");
        assert_eq!(cli.term, "Repo.get");
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(cli.extensions.is_empty());
        assert!(!cli.no_color);
        assert!(!cli.verbose);
        assert!(!cli.stats);
    }

    #[test]
    fn test_cli_parse_flags() {
        let cli = Cli::parse_from([
            "exarch", "doc", "user", "--root", "apps/web", "-e", "ex", "--ext", "exs",
            "--no-color", "-v", "--stats",
        ]);
        assert_eq!(cli.root, PathBuf::from("apps/web"));
        assert_eq!(cli.extensions, vec!["ex", "exs"]);
        assert!(cli.no_color && cli.verbose && cli.stats);
    }

    #[test]
    fn test_cli_requires_mode_and_term() {
        assert!(Cli::try_parse_from(["exarch"]).is_err());
        assert!(Cli::try_parse_from(["exarch", "fncall"]).is_err());
    }

    #[test]
    fn test_run_rejects_bad_requests() {
        let cli = Cli::parse_from(["exarch", "grep", "Repo", "--root", "/nonexistent/xyz"]);
        let err = run(&cli).unwrap_err();
        assert!(err.to_string().contains("invalid search mode"));

        let cli = Cli::parse_from(["exarch", "fncall", "", "--no-color"]);
        assert!(run(&cli).is_err());
    }

    #[test]
    fn test_run_on_fixture() -> Result<()> {
        let root = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata");
        let cli = Cli::parse_from(["exarch", "fncall", "Repo", "--root", root, "--no-color"]);
        run(&cli)
    }
}
