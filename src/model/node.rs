//! Node types for the document tree: elements, text leaves and their marks

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Structural classification of an element (paragraph, code block, ...)
///
/// Well-known types are exposed as constants; any other name is accepted so
/// plugins can introduce their own block kinds.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockType(Cow<'static, str>);

impl BlockType {
    pub const PARAGRAPH: BlockType = BlockType(Cow::Borrowed("paragraph"));
    pub const CODE: BlockType = BlockType(Cow::Borrowed("code"));

    pub fn new(name: impl Into<String>) -> Self {
        BlockType(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlockType {
    fn default() -> Self {
        BlockType::PARAGRAPH
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockType {
    fn from(name: &str) -> Self {
        BlockType::new(name)
    }
}

/// Name of a character-level formatting attribute
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkName(Cow<'static, str>);

impl MarkName {
    pub const BOLD: MarkName = MarkName(Cow::Borrowed("bold"));
    pub const ITALIC: MarkName = MarkName(Cow::Borrowed("italic"));
    pub const UNDERLINE: MarkName = MarkName(Cow::Borrowed("underline"));
    pub const CODE: MarkName = MarkName(Cow::Borrowed("code"));

    pub fn new(name: impl Into<String>) -> Self {
        MarkName(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MarkName {
    fn from(name: &str) -> Self {
        MarkName::new(name)
    }
}

/// Value stored for a mark on a text leaf
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkValue {
    /// Binary marks such as bold
    Flag(bool),
    /// Valued marks (e.g. a color)
    Value(String),
}

impl MarkValue {
    /// Whether this value counts as "on" for toggle purposes
    pub fn is_truthy(&self) -> bool {
        match self {
            MarkValue::Flag(on) => *on,
            MarkValue::Value(v) => !v.is_empty(),
        }
    }
}

impl From<bool> for MarkValue {
    fn from(on: bool) -> Self {
        MarkValue::Flag(on)
    }
}

/// Mark name → value mapping carried by every text leaf
pub type Marks = BTreeMap<MarkName, MarkValue>;

/// A text leaf: string content plus marks
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Text {
    pub text: String,
    pub marks: Marks,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Marks::new(),
        }
    }

    /// Builder: set a mark to `true`
    pub fn with_mark(mut self, mark: MarkName) -> Self {
        self.marks.insert(mark, MarkValue::Flag(true));
        self
    }

    /// Length in characters (the unit of point offsets)
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether `mark` is present and truthy on this leaf
    pub fn has_mark(&self, mark: &MarkName) -> bool {
        self.marks.get(mark).is_some_and(MarkValue::is_truthy)
    }
}

/// An element: optional block type plus ordered children
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    /// `None` means the default paragraph
    pub block_type: Option<BlockType>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(block_type: Option<BlockType>, children: Vec<Node>) -> Self {
        Self {
            block_type,
            children,
        }
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::new(Some(BlockType::PARAGRAPH), children)
    }

    /// The block type with the paragraph default applied
    pub fn effective_type(&self) -> &BlockType {
        self.block_type.as_ref().unwrap_or(&BlockType::PARAGRAPH)
    }

    /// A block is "lowest" when none of its children are elements
    pub fn is_lowest_block(&self) -> bool {
        !self.children.iter().any(Node::is_element)
    }
}

/// A node in the document tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(Text),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(Text::new(text))
    }

    pub fn element(block_type: Option<BlockType>, children: Vec<Node>) -> Self {
        Node::Element(Element::new(block_type, children))
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(t) => Some(t),
            Node::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    /// Children of an element; texts have none
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(e) => &e.children,
            Node::Text(_) => &[],
        }
    }

    /// Concatenated text content of this subtree
    pub fn string(&self) -> String {
        match self {
            Node::Text(t) => t.text.clone(),
            Node::Element(e) => e.children.iter().map(Node::string).collect(),
        }
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}
