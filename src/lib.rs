//! exarch - Semantic search for Elixir codebases
//!
//! Parses Elixir with tree-sitter and searches the syntax tree instead of
//! raw text, so a query can tell a remote call from a string, and a string
//! from documentation.
//!
//! # Architecture
//!
//! ```text
//! File Discovery → Parsing → Mode Search → Rendering
//!       ↓             ↓           ↓            ↓
//!    ignore      tree-sitter   aliases +     ANSI
//!    crate        + .scm       literals     headings
//! ```
//!
//! # Search modes
//!
//! - `fncall`: remote calls like `Repo.get!(User, id)`, matched on the
//!   alias-resolved `Module.function` name
//! - `str`: lines of string, charlist and sigil literals outside docs
//! - `doc`: lines of `@doc` and `@moduledoc` text
//!
//! Files are parsed in parallel via rayon, one parser per worker.

pub mod config;
pub mod discovery;
pub mod error;
pub mod extraction;
pub mod rendering;
pub mod scan;
pub mod search;

pub use config::Config;
pub use error::{Result, SearchError};
pub use extraction::{language, ElixirSyntax, Queries};
pub use scan::{scan, FileFailure, FileMatches, ScanReport, SearchRequest};
pub use search::{SearchMode, SearchResult, Searcher};
