//! Alias table extraction.
//!
//! Every `alias` declaration in a file becomes one or more [`Alias`]
//! entries. Grouped declarations like `alias App.Accounts.{User, Admin}` are
//! split into one entry per sub-module.
//!
//! Renames (`alias App.Repo, as: Store`) are not followed: the entry keeps
//! the last path segment as its short name.

use streaming_iterator::StreamingIterator;
use tree_sitter::{QueryCursor, Tree};

use crate::extraction::{AliasQuery, SourceNode, SyntaxNode};

/// One short name binding from an `alias` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    /// Full dotted module path, e.g. `App.Accounts.User`
    pub module_path: String,
    /// Name the module is referred to by, e.g. `User`
    pub short_name: String,
    /// Text of the whole declaration
    pub declaration: String,
    /// 1-based line of the declaration
    pub line: usize,
}

/// Collect the alias table of a parsed file, in source order.
pub fn extract_aliases(query: &AliasQuery, tree: &Tree, source: &str) -> Vec<Alias> {
    let mut aliases = Vec::new();
    let mut cursor = QueryCursor::new();

    let mut matches = cursor.matches(&query.query, tree.root_node(), source.as_bytes());
    while let Some(m) = matches.next() {
        for capture in m.captures.iter().filter(|c| c.index == query.arguments) {
            aliases.extend(from_arguments(SourceNode::new(capture.node, source)));
        }
    }

    aliases
}

fn from_arguments(arguments: SourceNode<'_, '_>) -> Vec<Alias> {
    let Some(first) = arguments.named_child(0) else {
        return Vec::new();
    };

    match first.kind() {
        "alias" => {
            let declaration = arguments.parent().unwrap_or(arguments);
            vec![single(&first, &declaration)]
        }
        "dot" => dotted(&first),
        _ => Vec::new(),
    }
}

fn single(path: &SourceNode<'_, '_>, declaration: &SourceNode<'_, '_>) -> Alias {
    let module_path = path.to_text();
    Alias {
        short_name: last_segment(&module_path).to_string(),
        module_path,
        declaration: declaration.to_text(),
        line: path.start_line(),
    }
}

/// `Prefix.{A, B}` yields one alias per tuple member; `__MODULE__.Child`
/// is a single alias spelled through a dot.
fn dotted(dot: &SourceNode<'_, '_>) -> Vec<Alias> {
    // dot -> arguments -> alias call
    let declaration = dot
        .parent()
        .and_then(|arguments| arguments.parent())
        .unwrap_or(*dot);

    let (Some(left), Some(right)) = (dot.field("left"), dot.field("right")) else {
        return Vec::new();
    };

    match right.kind() {
        "tuple" => right
            .named_children()
            .into_iter()
            .filter(|child| child.kind() == "alias")
            .map(|child| Alias {
                module_path: format!("{}.{}", left.text(), child.text()),
                short_name: child.to_text(),
                declaration: declaration.to_text(),
                line: dot.start_line(),
            })
            .collect(),
        "alias" => vec![single(dot, &declaration)],
        _ => Vec::new(),
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}
