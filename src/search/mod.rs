//! Semantic search over a single parsed Elixir file.
//!
//! Three modes share one parsed tree:
//!
//! ```text
//!            ┌─ Call ──────────► aliases → resolve prefixes → match `Module.function`
//! source ──► tree
//!            ├─ Code ──────────► literals → not documentation → match lines
//!            └─ Documentation ─► literals → documentation     → match lines
//! ```
//!
//! Every result is an owned `(line, text)` pair in source order, printed as
//! `<line>:<text>`.

mod alias;
mod calls;
mod docs;
mod text;

use std::fmt;
use std::str::FromStr;

use tree_sitter::{Language, Tree};

use crate::error::{Result, SearchError};
use crate::extraction::{ElixirSyntax, Queries};

pub use alias::{extract_aliases, Alias};
pub use calls::{extract_calls, match_calls, resolve_path, QualifiedCall};
pub use docs::{is_documentation, DOC_ATTRIBUTES};
pub use text::{match_text, TextKind, TextMatch};

/// What to search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Remote function calls, resolved through aliases
    Call,
    /// String literals outside documentation
    Code,
    /// Documentation attribute text
    Documentation,
}

impl SearchMode {
    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Call => "fncall",
            Self::Code => "str",
            Self::Documentation => "doc",
        }
    }
}

impl FromStr for SearchMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fncall" | "call" => Ok(Self::Call),
            "str" | "code" => Ok(Self::Code),
            "doc" | "documentation" => Ok(Self::Documentation),
            other => Err(SearchError::InvalidSearchMode(other.to_string())),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single reported location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// 1-based source line
    pub line: usize,
    pub text: String,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.text)
    }
}

impl From<QualifiedCall> for SearchResult {
    fn from(call: QualifiedCall) -> Self {
        Self {
            line: call.line,
            text: call.text,
        }
    }
}

impl From<TextMatch> for SearchResult {
    fn from(found: TextMatch) -> Self {
        Self {
            line: found.line,
            text: found.text,
        }
    }
}

/// Remote calls whose resolved `Module.function` contains `term`.
pub fn search_function_calls(
    queries: &Queries,
    tree: &Tree,
    source: &str,
    term: &str,
) -> Vec<SearchResult> {
    let aliases = extract_aliases(&queries.alias, tree, source);
    let calls = extract_calls(&queries.remote_call, tree, source, &aliases);
    match_calls(calls, term).into_iter().map(SearchResult::from).collect()
}

/// Literal lines of the given kind containing `term`.
pub fn search_text(
    queries: &Queries,
    tree: &Tree,
    source: &str,
    term: &str,
    kind: TextKind,
) -> Vec<SearchResult> {
    match_text(&queries.text, tree, source, term, kind)
        .into_iter()
        .map(SearchResult::from)
        .collect()
}

/// Parses and searches files. Owns its parser and borrows the shared
/// compiled queries, so one `Searcher` per thread.
pub struct Searcher<'q> {
    queries: &'q Queries,
    syntax: ElixirSyntax,
}

impl<'q> Searcher<'q> {
    pub fn new(language: &Language, queries: &'q Queries) -> Result<Self> {
        Ok(Self {
            queries,
            syntax: ElixirSyntax::new(language)?,
        })
    }

    /// Parse `source` and search it. `term` must be non-empty.
    pub fn search_source(
        &mut self,
        mode: SearchMode,
        source: &str,
        term: &str,
    ) -> Result<Vec<SearchResult>> {
        let tree = self.syntax.parse(source)?;
        Ok(self.search_tree(mode, &tree, source, term))
    }

    /// Search an already parsed tree.
    pub fn search_tree(
        &self,
        mode: SearchMode,
        tree: &Tree,
        source: &str,
        term: &str,
    ) -> Vec<SearchResult> {
        match mode {
            SearchMode::Call => search_function_calls(self.queries, tree, source, term),
            SearchMode::Code => search_text(self.queries, tree, source, term, TextKind::Code),
            SearchMode::Documentation => {
                search_text(self.queries, tree, source, term, TextKind::Documentation)
            }
        }
    }
}
