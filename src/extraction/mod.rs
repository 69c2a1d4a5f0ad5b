//! Parsing Elixir sources and running the embedded `.scm` queries.
//!
//! This module handles:
//! - Building tree-sitter parsers for the Elixir grammar
//! - Compiling the alias, remote-call and text-literal queries
//! - Exposing nodes through the [`SyntaxNode`] capability
//!
//! # Query Format
//!
//! The `.scm` files under `queries/` name every capture the extractors read:
//! - `@arguments` - argument list of an `alias` call
//! - `@call`, `@module`, `@function` - a remote call and its two halves
//! - `@text` - a string, charlist or sigil literal

mod node;
mod treesitter;

pub use node::{SourceNode, SyntaxNode};
pub use treesitter::{language, AliasQuery, ElixirSyntax, Queries, RemoteCallQuery, TextQuery};
