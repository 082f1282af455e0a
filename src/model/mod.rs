//! Document model - the tree, its addressing and its primitive edits
//!
//! Nodes are a tagged union of elements and text leaves. Points and
//! selections address leaves by index path, and every change to the tree is
//! an [`Operation`] so selections can be carried across edits.

pub mod document;
pub mod node;
pub mod operation;
pub mod path;
pub mod selection;

pub use document::{Document, INITIAL_TEXT};
pub use node::{BlockType, Element, MarkName, MarkValue, Marks, Node, Text};
pub use operation::Operation;
pub use path::Path;
pub use selection::{Affinity, Point, Selection};
