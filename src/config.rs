//! Configuration loading from `exarch.toml`.
//!
//! Looked up in the search root, then in each parent directory, so a
//! config at the top of an umbrella project applies to every app under it.
//!
//! ## Example
//!
//! ```toml
//! include = ["lib/**", "test/**"]
//! extend-exclude = ["**/priv/**"]
//! extensions = ["ex", "exs", "heex"]
//! ```

use std::path::{Path, PathBuf};
use serde::Deserialize;

/// Config file names, in lookup order.
pub const CONFIG_FILES: &[&str] = &["exarch.toml", ".exarch.toml"];

/// Default exclude patterns (build output and fetched dependencies).
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "**/_build/**",
    "**/deps/**",
    "**/.elixir_ls/**",
    "**/cover/**",
    "**/.git/**",
    "**/node_modules/**",
];

/// Elixir source extensions searched by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ex", "exs"];

/// Exarch configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Source file for this config (for display).
    pub source: Option<PathBuf>,

    /// Glob patterns for files to include. If empty, include all source files.
    pub include: Vec<String>,

    /// Glob patterns for files to exclude. Replaces defaults if set.
    pub exclude: Vec<String>,

    /// Additional exclude patterns (extends defaults).
    pub extend_exclude: Vec<String>,

    /// File extensions to search. Empty means the defaults.
    pub extensions: Vec<String>,
}

/// Raw config as deserialized from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    extend_exclude: Option<Vec<String>>,
    extensions: Option<Vec<String>>,
}

impl Config {
    /// Load configuration for the given directory.
    ///
    /// Search order:
    /// 1. exarch.toml / .exarch.toml in directory
    /// 2. The same names in each parent directory
    /// 3. Default config if nothing found
    ///
    /// A file that fails to parse is skipped with a warning.
    pub fn load(directory: &Path) -> Self {
        for dir in directory.ancestors() {
            for name in CONFIG_FILES {
                let path = dir.join(name);
                if !path.is_file() {
                    continue;
                }
                match Self::load_file(&path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("ignoring config {}: {:#}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    /// Load a specific config file.
    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let raw: RawConfig = toml::from_str(&content)?;
        Ok(Self::from_raw(raw, path.to_path_buf()))
    }

    fn from_raw(raw: RawConfig, source: PathBuf) -> Self {
        Self {
            source: Some(source),
            include: raw.include.unwrap_or_default(),
            exclude: raw.exclude.unwrap_or_default(),
            extend_exclude: raw.extend_exclude.unwrap_or_default(),
            extensions: raw.extensions.unwrap_or_default(),
        }
    }

    /// Exclude globs in force: `exclude` when set, else the defaults plus
    /// `extend-exclude`.
    pub fn effective_excludes(&self) -> Vec<String> {
        if !self.exclude.is_empty() {
            // an explicit `exclude` drops _build, deps and the rest
            self.exclude.clone()
        } else {
            let mut patterns: Vec<String> = DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect();
            patterns.extend(self.extend_exclude.clone());
            patterns
        }
    }

    /// Get effective extensions, lowercased and without leading dots.
    pub fn effective_extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
        } else {
            self.extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect()
        }
    }

    /// True when `include` is empty or one of its globs matches `path`.
    pub fn matches_include(&self, path: &Path) -> bool {
        self.include.is_empty() || any_glob(&self.include, path)
    }

    /// True when an effective exclude glob matches `path`.
    pub fn matches_exclude(&self, path: &Path) -> bool {
        any_glob(&self.effective_excludes(), path)
    }

    /// Whether discovery keeps `path` (root-relative).
    pub fn should_include(&self, path: &Path) -> bool {
        self.matches_include(path) && !self.matches_exclude(path)
    }

    /// One-line summary logged at debug level.
    pub fn display_summary(&self) -> String {
        let source = match &self.source {
            Some(path) => path.display().to_string(),
            None => "(defaults)".to_string(),
        };
        let mut parts = vec![
            format!("config: {}", source),
            format!("extensions: {}", self.effective_extensions().join(", ")),
        ];
        if !self.include.is_empty() {
            parts.push(format!("include: {}", self.include.join(", ")));
        }
        parts.push(format!("exclude: {}", self.effective_excludes().join(", ")));
        parts.join("; ")
    }
}

fn any_glob(patterns: &[String], path: &Path) -> bool {
    let path = path.to_string_lossy();
    patterns.iter().any(|pattern| glob_match::glob_match(pattern, &path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_excludes() {
        let config = Config::default();
        assert!(config.matches_exclude(Path::new("app/_build/dev/lib/a.ex")));
        assert!(config.matches_exclude(Path::new("app/deps/phoenix/lib/phoenix.ex")));
        assert!(config.matches_exclude(Path::new("project/.git/config")));
        assert!(!config.matches_exclude(Path::new("lib/app/users.ex")));
    }

    #[test]
    fn test_include_patterns() {
        let config = Config {
            include: vec!["lib/**".to_string(), "test/**".to_string()],
            ..Default::default()
        };
        assert!(config.matches_include(Path::new("lib/app.ex")));
        assert!(config.matches_include(Path::new("test/app_test.exs")));
        assert!(!config.matches_include(Path::new("priv/repo/seeds.exs")));
    }

    #[test]
    fn test_extend_exclude() {
        let config = Config {
            extend_exclude: vec!["**/priv/**".to_string()],
            ..Default::default()
        };
        // build output and deps stay excluded
        assert!(config.matches_exclude(Path::new("deps/foo/lib/foo.ex")));
        // and priv/ joins them
        assert!(config.matches_exclude(Path::new("apps/web/priv/repo/seeds.exs")));
    }

    #[test]
    fn test_custom_exclude_replaces_defaults() {
        let config = Config {
            exclude: vec!["**/generated/**".to_string()],
            ..Default::default()
        };
        assert!(!config.matches_exclude(Path::new("deps/foo/lib/foo.ex")));
        assert!(config.matches_exclude(Path::new("lib/generated/schema.ex")));
    }

    #[test]
    fn test_display_summary() {
        let config = Config {
            include: vec!["lib/**".to_string()],
            exclude: vec!["**/priv/**".to_string()],
            ..Default::default()
        };
        assert_eq!(
            config.display_summary(),
            "config: (defaults); extensions: ex, exs; include: lib/**; exclude: **/priv/**"
        );
        assert!(Config::default().display_summary().contains("**/_build/**, **/deps/**"));
    }

    #[test]
    fn test_effective_extensions() {
        assert_eq!(Config::default().effective_extensions(), vec!["ex", "exs"]);
        let config = Config {
            extensions: vec![".EX".to_string(), "heex".to_string()],
            ..Default::default()
        };
        assert_eq!(config.effective_extensions(), vec!["ex", "heex"]);
    }

    #[test]
    fn test_load_walks_up() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let nested = temp.path().join("apps/web/lib");
        fs::create_dir_all(&nested)?;
        fs::write(
            temp.path().join("exarch.toml"),
            "include = [\"lib/**\"]\nextend-exclude = [\"**/priv/**\"]\n",
        )?;

        let config = Config::load(&nested);
        assert_eq!(config.source, Some(temp.path().join("exarch.toml")));
        assert_eq!(config.include, vec!["lib/**"]);
        assert_eq!(config.extend_exclude, vec!["**/priv/**"]);
        Ok(())
    }

    #[test]
    fn test_hidden_config_name() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        fs::write(temp.path().join(".exarch.toml"), "extensions = [\"exs\"]\n")?;

        let config = Config::load(temp.path());
        assert_eq!(config.effective_extensions(), vec!["exs"]);
        Ok(())
    }

    #[test]
    fn test_invalid_config_falls_back() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("exarch.toml");
        fs::write(&path, "include = 3\n")?;

        assert!(Config::load_file(&path).is_err());
        // an unreadable config next to the root does not stop a search
        let config = Config::load(temp.path());
        assert_ne!(config.source, Some(path));
        Ok(())
    }
}
