//! Line-wise search inside string-like literals.
//!
//! A literal nested in another literal's interpolation (`"a #{"b"}"`) is
//! searched as part of the outer literal only.

use streaming_iterator::StreamingIterator;
use tree_sitter::{QueryCursor, Tree};

use crate::extraction::{SourceNode, SyntaxNode, TextQuery};
use super::docs::is_documentation;

/// Which literals a text search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// Literals in ordinary code
    Code,
    /// Arguments of `@doc` / `@moduledoc`
    Documentation,
}

impl TextKind {
    fn wants(self, documentation: bool) -> bool {
        documentation == (self == Self::Documentation)
    }
}

/// One line of a literal that contains the search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch {
    pub text: String,
    /// 1-based source line of this line of the literal
    pub line: usize,
}

/// Find every literal line of the requested kind containing `term`.
///
/// Each literal is classified once and the result applies to all of its
/// lines. A literal starting on line `n` reports its `i`-th line as `n + i`.
pub fn match_text(
    query: &TextQuery,
    tree: &Tree,
    source: &str,
    term: &str,
    kind: TextKind,
) -> Vec<TextMatch> {
    let mut found = Vec::new();
    let mut cursor = QueryCursor::new();

    let mut matches = cursor.matches(&query.query, tree.root_node(), source.as_bytes());
    while let Some(m) = matches.next() {
        for capture in m.captures.iter().filter(|c| c.index == query.text) {
            let literal = SourceNode::new(capture.node, source);
            if inside_interpolation(&literal) || !kind.wants(is_documentation(&literal)) {
                continue;
            }

            let start = literal.start_line();
            for (offset, line) in literal.text().split('\n').enumerate() {
                let line = line.strip_suffix('\r').unwrap_or(line);
                if line.contains(term) {
                    found.push(TextMatch {
                        text: line.to_string(),
                        line: start + offset,
                    });
                }
            }
        }
    }

    found
}

fn inside_interpolation(literal: &SourceNode<'_, '_>) -> bool {
    let mut current = literal.parent();
    while let Some(node) = current {
        if node.kind() == "interpolation" {
            return true;
        }
        current = node.parent();
    }
    false
}
