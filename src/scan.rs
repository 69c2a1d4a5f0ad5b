//! Multi-file scan: read, parse and search every discovered file.
//!
//! Files are searched in parallel. Each rayon worker builds its own
//! [`Searcher`] (tree-sitter parsers are not thread-safe) while the compiled
//! queries are shared. Results come back in the order of `files`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tree_sitter::Language;

use crate::extraction::Queries;
use crate::search::{SearchMode, SearchResult, Searcher};

/// Results for one file that had at least one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatches {
    pub path: PathBuf,
    /// Path relative to the scan root, for display
    pub rel_path: String,
    pub results: Vec<SearchResult>,
}

/// A file that could not be read or parsed. The scan continues past it.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: anyhow::Error,
}

/// Everything a scan produced.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub files: Vec<FileMatches>,
    pub failures: Vec<FileFailure>,
    pub files_scanned: usize,
}

impl ScanReport {
    pub fn result_count(&self) -> usize {
        self.files.iter().map(|f| f.results.len()).sum()
    }
}

/// A validated search request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub mode: SearchMode,
    pub term: String,
}

impl SearchRequest {
    /// Build a request from raw CLI values. Rejects unknown modes and empty
    /// terms before any file is touched.
    pub fn parse(mode: &str, term: &str) -> Result<Self> {
        let mode = mode.parse::<SearchMode>()?;
        if term.is_empty() {
            anyhow::bail!("Can't use empty search terms");
        }
        Ok(Self {
            mode,
            term: term.to_string(),
        })
    }
}

/// Search `files` and collect per-file results and failures.
///
/// Only setup problems (an incompatible grammar) fail the whole scan;
/// per-file read and parse errors land in [`ScanReport::failures`].
pub fn scan(
    files: &[PathBuf],
    root: &Path,
    language: &Language,
    queries: &Queries,
    request: &SearchRequest,
) -> Result<ScanReport> {
    // Surface grammar problems once instead of per worker.
    Searcher::new(language, queries)?;

    let outcomes: Vec<(PathBuf, Result<Vec<SearchResult>>)> = files
        .par_iter()
        .map_init(
            || Searcher::new(language, queries),
            |searcher, path| {
                let outcome = match searcher {
                    Ok(searcher) => search_file(searcher, path, request),
                    Err(e) => Err(anyhow::anyhow!("parser setup failed: {}", e)),
                };
                (path.clone(), outcome)
            },
        )
        .collect();

    let mut report = ScanReport {
        files_scanned: files.len(),
        ..Default::default()
    };

    for (path, outcome) in outcomes {
        match outcome {
            Ok(results) if results.is_empty() => {}
            Ok(results) => {
                tracing::debug!("{}: {} results", path.display(), results.len());
                report.files.push(FileMatches {
                    rel_path: relative_display(&path, root),
                    path,
                    results,
                });
            }
            Err(error) => {
                tracing::warn!("skipping {}: {:#}", path.display(), error);
                report.failures.push(FileFailure { path, error });
            }
        }
    }

    Ok(report)
}

fn search_file(
    searcher: &mut Searcher<'_>,
    path: &Path,
    request: &SearchRequest,
) -> Result<Vec<SearchResult>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    searcher
        .search_source(request.mode, &source, &request.term)
        .with_context(|| format!("failed to search {}", path.display()))
}

/// Root-relative path with forward slashes; the path itself when it is not
/// under `root` (or is `root`, for single-file scans).
fn relative_display(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().replace('\\', "/"),
        _ => path.to_string_lossy().to_string(),
    }
}
