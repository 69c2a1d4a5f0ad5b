//! Git-aware discovery of Elixir source files.
//!
//! - Respects .gitignore automatically via the `ignore` crate
//! - Applies exarch.toml include/exclude patterns to root-relative paths
//! - Keeps only configured extensions (`.ex`/`.exs` by default)
//! - Returns sorted results so output order is stable between runs

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use anyhow::Result;
use ignore::WalkBuilder;

use crate::config::Config;

/// Find source files under `root`, respecting .gitignore and `config`.
///
/// A file given as `root` is returned on its own when it passes the
/// extension and include/exclude filters.
///
/// ## Returns
/// Sorted vector of paths to source files.
pub fn find_source_files(root: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let extensions = config.effective_extensions();

    // Handle single file case early
    if root.is_file() {
        if has_extension(root, &extensions) && config.should_include(root) {
            return Ok(vec![root.to_path_buf()]);
        }
        return Ok(vec![]);
    }

    if !root.is_dir() {
        anyhow::bail!("Path does not exist: {}", root.display());
    }

    let walker = WalkBuilder::new(root)
        .hidden(false)          // let .gitignore decide
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .require_git(false)     // work outside git checkouts
        .follow_links(false)
        .threads(0)
        .build_parallel();

    let files = Mutex::new(Vec::new());

    walker.run(|| {
        Box::new(|entry_result| {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("skipping unreadable entry: {}", e);
                    return ignore::WalkState::Continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || !has_extension(path, &extensions) {
                return ignore::WalkState::Continue;
            }

            let rel_path = path.strip_prefix(root).unwrap_or(path);
            if !config.should_include(rel_path) {
                return ignore::WalkState::Continue;
            }

            if let Ok(mut files) = files.lock() {
                files.push(path.to_path_buf());
            }

            ignore::WalkState::Continue
        })
    });

    let mut files = files.into_inner()
        .map_err(|_| anyhow::anyhow!("Failed to unwrap mutex"))?;
    files.sort();

    Ok(files)
}

/// Case-insensitive extension check against the configured list.
fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}
