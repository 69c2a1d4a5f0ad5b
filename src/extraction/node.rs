//! Structural node capability used by the ancestor-walking classifiers.

use tree_sitter::Node;

/// The minimum a syntax node must offer for structural classification:
/// its parent, a named child field, and its source text.
pub trait SyntaxNode: Sized {
    fn parent(&self) -> Option<Self>;
    fn field(&self, name: &str) -> Option<Self>;
    fn text(&self) -> &str;
}

/// A tree-sitter node paired with the source it was parsed from.
#[derive(Debug, Clone, Copy)]
pub struct SourceNode<'tree, 'src> {
    node: Node<'tree>,
    source: &'src str,
}

impl<'tree, 'src> SourceNode<'tree, 'src> {
    pub fn new(node: Node<'tree>, source: &'src str) -> Self {
        Self { node, source }
    }

    pub fn node(&self) -> Node<'tree> {
        self.node
    }

    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }

    pub fn named_child(&self, index: usize) -> Option<Self> {
        self.node
            .named_child(index)
            .map(|node| Self::new(node, self.source))
    }

    pub fn named_children(&self) -> Vec<Self> {
        let mut walk = self.node.walk();
        self.node
            .named_children(&mut walk)
            .map(|node| Self::new(node, self.source))
            .collect()
    }

    /// 1-based line the node starts on.
    pub fn start_line(&self) -> usize {
        self.node.start_position().row + 1
    }

    /// Owned copy of the node's text.
    pub fn to_text(&self) -> String {
        self.text().to_string()
    }
}

impl SyntaxNode for SourceNode<'_, '_> {
    fn parent(&self) -> Option<Self> {
        self.node.parent().map(|node| Self::new(node, self.source))
    }

    fn field(&self, name: &str) -> Option<Self> {
        self.node
            .child_by_field_name(name)
            .map(|node| Self::new(node, self.source))
    }

    fn text(&self) -> &str {
        self.node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{language, ElixirSyntax};

    #[test]
    fn test_source_node_navigation() -> anyhow::Result<()> {
        let source = "Repo.get!(User, id)";
        let mut syntax = ElixirSyntax::new(&language())?;
        let tree = syntax.parse(source)?;

        let call = tree
            .root_node()
            .named_child(0)
            .map(|node| SourceNode::new(node, source))
            .ok_or_else(|| anyhow::anyhow!("no call node"))?;

        assert_eq!(call.text(), source);
        assert_eq!(call.start_line(), 1);

        let target = call.field("target").ok_or_else(|| anyhow::anyhow!("no target"))?;
        assert_eq!(target.text(), "Repo.get!");
        assert_eq!(target.field("left").map(|n| n.to_text()), Some("Repo".into()));
        assert_eq!(target.field("right").map(|n| n.to_text()), Some("get!".into()));
        assert_eq!(target.parent().map(|n| n.to_text()), Some(source.into()));
        assert!(call.field("no_such_field").is_none());
        Ok(())
    }
}
