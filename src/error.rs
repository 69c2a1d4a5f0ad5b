//! Error types for the search core.
//!
//! The core reports failures through [`SearchError`]. The driver layers
//! (discovery, scan, CLI) use `anyhow` and attach file context on top.

/// A specialized Result type for search core operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors raised while preparing or running a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The parser produced no tree for the given source.
    #[error("failed to parse source: {0}")]
    Parse(String),

    /// One of the embedded query definitions does not compile against the
    /// grammar. Never depends on user input.
    #[error("invalid {query} query: {source}")]
    QueryCompile {
        query: &'static str,
        #[source]
        source: tree_sitter::QueryError,
    },

    /// The grammar was built for an incompatible tree-sitter ABI.
    #[error("incompatible Elixir grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The caller asked for a search mode that does not exist.
    #[error("invalid search mode '{0}', expected one of: fncall, str, doc")]
    InvalidSearchMode(String),
}

impl SearchError {
    /// Whether this error means the binary itself is broken, as opposed to
    /// a bad input file or argument.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::QueryCompile { .. } | Self::Language(_))
    }
}
