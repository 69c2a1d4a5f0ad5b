//! Tree-sitter binding for Elixir sources.
//!
//! Search never holds a process-wide parser. The caller obtains the grammar
//! handle with [`language`], compiles the embedded queries once with
//! [`Queries::compile`], and creates one [`ElixirSyntax`] per worker.

use tree_sitter::{Language, Parser as TsParser, Query, QueryError, QueryErrorKind, Tree};

use crate::error::{Result, SearchError};

/// Embedded query files - compiled into the binary
mod sources {
    pub const ALIAS: &str = include_str!("../../queries/alias.scm");
    pub const REMOTE_CALL: &str = include_str!("../../queries/remote_call.scm");
    pub const TEXT: &str = include_str!("../../queries/text.scm");
}

/// The Elixir grammar handle.
pub fn language() -> Language {
    tree_sitter_elixir::LANGUAGE.into()
}

/// Alias declarations. `@arguments` is the argument list of `alias`.
pub struct AliasQuery {
    pub query: Query,
    pub arguments: u32,
}

/// Remote calls of the form `Prefix.function(...)`.
pub struct RemoteCallQuery {
    pub query: Query,
    pub call: u32,
    pub module: u32,
    pub function: u32,
}

/// String, charlist and sigil literals.
pub struct TextQuery {
    pub query: Query,
    pub text: u32,
}

/// All compiled queries used by a search. Compiled once and shared
/// read-only between workers.
pub struct Queries {
    pub alias: AliasQuery,
    pub remote_call: RemoteCallQuery,
    pub text: TextQuery,
}

impl Queries {
    /// Compile every embedded query against `language`.
    ///
    /// Fails with [`SearchError::QueryCompile`] when a query is malformed or
    /// lacks a capture the extractors read.
    pub fn compile(language: &Language) -> Result<Self> {
        let alias = compile("alias", language, sources::ALIAS)?;
        let remote_call = compile("remote_call", language, sources::REMOTE_CALL)?;
        let text = compile("text", language, sources::TEXT)?;

        Ok(Self {
            alias: AliasQuery {
                arguments: capture_index("alias", &alias, "arguments")?,
                query: alias,
            },
            remote_call: RemoteCallQuery {
                call: capture_index("remote_call", &remote_call, "call")?,
                module: capture_index("remote_call", &remote_call, "module")?,
                function: capture_index("remote_call", &remote_call, "function")?,
                query: remote_call,
            },
            text: TextQuery {
                text: capture_index("text", &text, "text")?,
                query: text,
            },
        })
    }
}

fn compile(name: &'static str, language: &Language, source: &str) -> Result<Query> {
    Query::new(language, source).map_err(|source| SearchError::QueryCompile {
        query: name,
        source,
    })
}

fn capture_index(name: &'static str, query: &Query, capture: &str) -> Result<u32> {
    query
        .capture_index_for_name(capture)
        .ok_or_else(|| SearchError::QueryCompile {
            query: name,
            source: QueryError {
                row: 0,
                column: 0,
                offset: 0,
                message: format!("missing capture @{}", capture),
                kind: QueryErrorKind::Capture,
            },
        })
}

/// A parser configured for Elixir.
///
/// Tree-sitter parsers are not thread-safe, so each worker owns one.
pub struct ElixirSyntax {
    parser: TsParser,
}

impl ElixirSyntax {
    pub fn new(language: &Language) -> Result<Self> {
        let mut parser = TsParser::new();
        parser.set_language(language)?;
        Ok(Self { parser })
    }

    /// Parse a whole source file.
    ///
    /// The grammar recovers from syntax errors, so a tree with `ERROR` nodes
    /// is still returned and searched.
    pub fn parse(&mut self, source: &str) -> Result<Tree> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| SearchError::Parse("parser returned no tree".into()))?;

        if tree.root_node().has_error() {
            tracing::debug!("source contains syntax errors, searching recovered tree");
        }

        Ok(tree)
    }
}
