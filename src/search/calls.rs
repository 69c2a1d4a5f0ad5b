//! Remote call resolution and matching.
//!
//! A remote call `Prefix.function(...)` only names its module through
//! whatever the file has in scope. The prefix is resolved against the file's
//! alias table so a search for `App.Accounts.User.changeset` finds
//! `User.changeset(attrs)` written under `alias App.Accounts.User`.

use streaming_iterator::StreamingIterator;
use tree_sitter::{QueryCursor, Tree};

use crate::extraction::{RemoteCallQuery, SourceNode, SyntaxNode};
use super::alias::Alias;

/// A remote call site with its module prefix resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedCall {
    /// Resolved module path, or the literal prefix when nothing matched
    pub module_path: String,
    pub function_name: String,
    /// Source text of the whole call
    pub text: String,
    /// 1-based line the call starts on
    pub line: usize,
}

impl QualifiedCall {
    /// Canonical `Module.function` form used for matching.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.module_path, self.function_name)
    }
}

/// Resolve a call prefix to a full module path.
///
/// Resolution order, first hit wins:
/// 1. an alias whose short name is exactly `prefix`
/// 2. the first alias whose path ends with all of `prefix`'s segments
/// 3. `prefix` itself
pub fn resolve_path(prefix: &str, aliases: &[Alias]) -> String {
    if let Some(alias) = aliases.iter().find(|a| a.short_name == prefix) {
        return alias.module_path.clone();
    }

    aliases
        .iter()
        .find(|alias| ends_with_segments(&alias.module_path, prefix))
        .map(|alias| alias.module_path.clone())
        .unwrap_or_else(|| prefix.to_string())
}

/// Segment-wise suffix test, compared from the innermost segment outward.
fn ends_with_segments(module_path: &str, prefix: &str) -> bool {
    let mut path_segments = module_path.rsplit('.');
    prefix
        .rsplit('.')
        .all(|segment| path_segments.next() == Some(segment))
}

/// Collect every remote call in a parsed file, in source order.
pub fn extract_calls(
    query: &RemoteCallQuery,
    tree: &Tree,
    source: &str,
    aliases: &[Alias],
) -> Vec<QualifiedCall> {
    let mut calls = Vec::new();
    let mut cursor = QueryCursor::new();

    let mut matches = cursor.matches(&query.query, tree.root_node(), source.as_bytes());
    while let Some(m) = matches.next() {
        let mut call: Option<SourceNode> = None;
        let mut module: Option<SourceNode> = None;
        let mut function: Option<SourceNode> = None;

        for capture in m.captures {
            let node = SourceNode::new(capture.node, source);
            if capture.index == query.call {
                call = Some(node);
            } else if capture.index == query.module {
                module = Some(node);
            } else if capture.index == query.function {
                function = Some(node);
            }
        }

        if let (Some(call), Some(module), Some(function)) = (call, module, function) {
            calls.push(QualifiedCall {
                module_path: resolve_path(module.text(), aliases),
                function_name: function.to_text(),
                text: call.to_text(),
                line: call.start_line(),
            });
        }
    }

    calls
}

/// Keep calls whose `Module.function` form contains `term`.
pub fn match_calls(calls: Vec<QualifiedCall>, term: &str) -> Vec<QualifiedCall> {
    calls
        .into_iter()
        .filter(|call| call.qualified_name().contains(term))
        .collect()
}
