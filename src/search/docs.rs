//! Documentation classifier.
//!
//! `@doc "..."` parses as an attribute whose operand is a call named `doc`
//! with the literal as its argument:
//!
//! ```text
//! (unary_operator
//!   operand: (call
//!     target: (identifier)       ; "doc"
//!     (arguments (string))))     ; the literal
//! ```
//!
//! so a literal is documentation when its grandparent's `target` is one of
//! the documentation attribute names.

use crate::extraction::SyntaxNode;

/// Attribute names whose argument is documentation text.
pub const DOC_ATTRIBUTES: &[&str] = &["doc", "moduledoc"];

/// Whether a literal node is the argument of a documentation attribute.
///
/// A node without a parent or grandparent is code.
pub fn is_documentation<N: SyntaxNode>(literal: &N) -> bool {
    literal
        .parent()
        .and_then(|parent| parent.parent())
        .and_then(|grandparent| grandparent.field("target"))
        .is_some_and(|target| DOC_ATTRIBUTES.contains(&target.text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Hand-built tree for exercising the classifier without a parser.
    struct Arena {
        nodes: Vec<FakeNode>,
    }

    struct FakeNode {
        text: &'static str,
        parent: Option<usize>,
        fields: HashMap<&'static str, usize>,
    }

    #[derive(Clone, Copy)]
    struct Handle<'a> {
        arena: &'a Arena,
        index: usize,
    }

    impl<'a> SyntaxNode for Handle<'a> {
        fn parent(&self) -> Option<Self> {
            self.arena.nodes[self.index].parent.map(|index| Handle {
                arena: self.arena,
                index,
            })
        }

        fn field(&self, name: &str) -> Option<Self> {
            self.arena.nodes[self.index]
                .fields
                .get(name)
                .map(|&index| Handle {
                    arena: self.arena,
                    index,
                })
        }

        fn text(&self) -> &str {
            self.arena.nodes[self.index].text
        }
    }

    /// call(target) -> arguments -> literal, with the literal at index 3.
    fn attribute_arena(target: &'static str) -> Arena {
        let call = FakeNode {
            text: "call",
            parent: None,
            fields: HashMap::from([("target", 1)]),
        };
        let ident = FakeNode {
            text: target,
            parent: Some(0),
            fields: HashMap::new(),
        };
        let arguments = FakeNode {
            text: "\"text\"",
            parent: Some(0),
            fields: HashMap::new(),
        };
        let literal = FakeNode {
            text: "\"text\"",
            parent: Some(2),
            fields: HashMap::new(),
        };
        Arena {
            nodes: vec![call, ident, arguments, literal],
        }
    }

    #[test]
    fn test_doc_attributes_are_documentation() {
        for name in ["doc", "moduledoc"] {
            let arena = attribute_arena(name);
            assert!(is_documentation(&Handle { arena: &arena, index: 3 }), "{}", name);
        }
    }

    #[test]
    fn test_other_targets_are_code() {
        for name in ["typedoc", "IO.puts", "Doc", "docs"] {
            let arena = attribute_arena(name);
            assert!(!is_documentation(&Handle { arena: &arena, index: 3 }), "{}", name);
        }
    }

    #[test]
    fn test_missing_ancestors_are_code() {
        let arena = attribute_arena("doc");
        // the call itself has no parent; the arguments node has no grandparent
        assert!(!is_documentation(&Handle { arena: &arena, index: 0 }));
        assert!(!is_documentation(&Handle { arena: &arena, index: 2 }));
    }

    #[test]
    fn test_grandparent_without_target_is_code() {
        let mut arena = attribute_arena("doc");
        arena.nodes[0].fields.clear();
        assert!(!is_documentation(&Handle { arena: &arena, index: 3 }));
    }
}
