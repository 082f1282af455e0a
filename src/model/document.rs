//! Document tree: the root container of block nodes

use super::node::{Element, Node, Text};
use super::path::Path;
use super::selection::Point;

/// Text of the seed paragraph every new session starts with
pub const INITIAL_TEXT: &str = "A line of text in a paragraph.";

/// The document tree. Paths index into `children` from the root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// The fixed startup value: one paragraph holding one text leaf
    pub fn initial() -> Self {
        Self::new(vec![Element::paragraph(vec![Node::text(INITIAL_TEXT)]).into()])
    }

    /// Resolve a path to a node
    pub fn node(&self, path: &Path) -> Option<&Node> {
        let (&first, rest) = path.split_first()?;
        let mut node = self.children.get(first)?;
        for &index in rest {
            node = node.children().get(index)?;
        }
        Some(node)
    }

    /// Resolve a path to a node, mutably
    pub fn node_mut(&mut self, path: &Path) -> Option<&mut Node> {
        let (&first, rest) = path.split_first()?;
        let mut node = self.children.get_mut(first)?;
        for &index in rest {
            node = match node {
                Node::Element(el) => el.children.get_mut(index)?,
                Node::Text(_) => return None,
            };
        }
        Some(node)
    }

    /// The children list that holds the node at `path`
    pub(crate) fn siblings_mut(&mut self, path: &Path) -> Option<&mut Vec<Node>> {
        let parent = path.parent()?;
        if parent.is_root() {
            return Some(&mut self.children);
        }
        match self.node_mut(&parent)? {
            Node::Element(el) => Some(&mut el.children),
            Node::Text(_) => None,
        }
    }

    pub fn text(&self, path: &Path) -> Option<&Text> {
        self.node(path)?.as_text()
    }

    pub fn text_mut(&mut self, path: &Path) -> Option<&mut Text> {
        match self.node_mut(path)? {
            Node::Text(t) => Some(t),
            Node::Element(_) => None,
        }
    }

    pub fn element_mut(&mut self, path: &Path) -> Option<&mut Element> {
        match self.node_mut(path)? {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// All nodes in pre-order (document order), with their paths
    pub fn descendants(&self) -> Vec<(Path, &Node)> {
        fn walk<'a>(nodes: &'a [Node], parent: &Path, out: &mut Vec<(Path, &'a Node)>) {
            for (index, node) in nodes.iter().enumerate() {
                let path = parent.child(index);
                out.push((path.clone(), node));
                walk(node.children(), &path, out);
            }
        }

        let mut out = Vec::new();
        walk(&self.children, &Path::root(), &mut out);
        out
    }


    /// Whether a point resolves to an existing text leaf and a valid offset
    pub fn is_valid_point(&self, point: &Point) -> bool {
        self.text(&point.path)
            .is_some_and(|t| point.offset <= t.len_chars())
    }

    /// Concatenated text of the whole document, blocks separated by newlines
    pub fn plain_text(&self) -> String {
        self.children
            .iter()
            .map(Node::string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
