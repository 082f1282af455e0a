//! Render hooks: document snapshot to HTML-like markup
//!
//! Elements are rendered through a strategy table keyed by block type, with
//! a paragraph fallback for unregistered types. Leaves are wrapped in a
//! styled `<span>` derived from their marks.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::model::{BlockType, Document, Element, MarkName, Marks, Node, Text};
use crate::util::escape_html;

/// Custom element renderer: receives the element and its rendered children
pub type ElementRenderFn = Rc<dyn Fn(&Element, &str) -> String>;

/// How an element is rendered
#[derive(Clone)]
pub enum ElementStrategy {
    /// `<p>…</p>`
    Paragraph,
    /// `<pre><code>…</code></pre>`
    Preformatted,
    Custom(ElementRenderFn),
}

impl ElementStrategy {
    pub fn custom(render: impl Fn(&Element, &str) -> String + 'static) -> Self {
        ElementStrategy::Custom(Rc::new(render))
    }

    fn render(&self, element: &Element, inner: &str) -> String {
        match self {
            ElementStrategy::Paragraph => format!("<p>{}</p>", inner),
            ElementStrategy::Preformatted => format!("<pre><code>{}</code></pre>", inner),
            ElementStrategy::Custom(render) => render(element, inner),
        }
    }
}

impl fmt::Debug for ElementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementStrategy::Paragraph => f.write_str("Paragraph"),
            ElementStrategy::Preformatted => f.write_str("Preformatted"),
            ElementStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PartialEq for ElementStrategy {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ElementStrategy::Paragraph, ElementStrategy::Paragraph) => true,
            (ElementStrategy::Preformatted, ElementStrategy::Preformatted) => true,
            (ElementStrategy::Custom(a), ElementStrategy::Custom(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Inline styling derived from a leaf's marks
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LeafStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub code: bool,
}

impl LeafStyle {
    pub fn from_marks(marks: &Marks) -> Self {
        let on = |name: &MarkName| marks.get(name).is_some_and(|v| v.is_truthy());
        Self {
            bold: on(&MarkName::BOLD),
            italic: on(&MarkName::ITALIC),
            underline: on(&MarkName::UNDERLINE),
            code: on(&MarkName::CODE),
        }
    }

    /// CSS declarations; font weight is always present
    pub fn css(&self) -> String {
        let mut css = String::from(if self.bold {
            "font-weight: bold"
        } else {
            "font-weight: normal"
        });
        if self.italic {
            css.push_str("; font-style: italic");
        }
        if self.underline {
            css.push_str("; text-decoration: underline");
        }
        css
    }
}

/// Element strategy table plus leaf styling
#[derive(Debug, Clone)]
pub struct Renderer {
    elements: HashMap<BlockType, ElementStrategy>,
    fallback: ElementStrategy,
}

impl Renderer {
    /// `code` blocks preformatted, everything else a paragraph
    pub fn new() -> Self {
        let mut elements = HashMap::new();
        elements.insert(BlockType::CODE, ElementStrategy::Preformatted);
        Self {
            elements,
            fallback: ElementStrategy::Paragraph,
        }
    }

    /// Register (or replace) the strategy for a block type
    pub fn register(
        &mut self,
        block_type: impl Into<BlockType>,
        strategy: ElementStrategy,
    ) -> &mut Self {
        self.elements.insert(block_type.into(), strategy);
        self
    }

    pub fn set_fallback(&mut self, strategy: ElementStrategy) -> &mut Self {
        self.fallback = strategy;
        self
    }

    /// Strategy picked for an element; untyped elements use the fallback
    pub fn strategy_for(&self, element: &Element) -> &ElementStrategy {
        element
            .block_type
            .as_ref()
            .and_then(|t| self.elements.get(t))
            .unwrap_or(&self.fallback)
    }

    pub fn render_document(&self, document: &Document) -> String {
        document
            .children
            .iter()
            .map(|node| self.render_node(node))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render_node(&self, node: &Node) -> String {
        match node {
            Node::Element(el) => self.render_element(el),
            Node::Text(text) => self.render_leaf(text),
        }
    }

    pub fn render_element(&self, element: &Element) -> String {
        let inner: String = element.children.iter().map(|n| self.render_node(n)).collect();
        self.strategy_for(element).render(element, &inner)
    }

    pub fn render_leaf(&self, text: &Text) -> String {
        let style = LeafStyle::from_marks(&text.marks);
        let escaped = escape_html(&text.text);
        let content = if style.code {
            format!("<code>{}</code>", escaped)
        } else {
            escaped
        };
        format!("<span style=\"{}\">{}</span>", style.css(), content)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MarkValue;

    #[test]
    fn test_code_uses_preformatted_strategy() {
        let renderer = Renderer::new();
        let code = Element::new(Some(BlockType::CODE), vec![Node::text("x")]);
        let para = Element::paragraph(vec![Node::text("x")]);
        let other = Element::new(Some(BlockType::new("quote")), vec![Node::text("x")]);

        assert_eq!(renderer.strategy_for(&code), &ElementStrategy::Preformatted);
        assert_eq!(renderer.strategy_for(&para), &ElementStrategy::Paragraph);
        assert_eq!(renderer.strategy_for(&other), &ElementStrategy::Paragraph);
    }

    #[test]
    fn test_leaf_weight_follows_bold() {
        let renderer = Renderer::new();
        let plain = Text::new("a");
        let bold = Text::new("a").with_mark(MarkName::BOLD);
        let off = Text {
            text: "a".to_string(),
            marks: [(MarkName::BOLD, MarkValue::Flag(false))].into_iter().collect(),
        };

        assert_eq!(
            renderer.render_leaf(&plain),
            "<span style=\"font-weight: normal\">a</span>"
        );
        assert_eq!(
            renderer.render_leaf(&bold),
            "<span style=\"font-weight: bold\">a</span>"
        );
        assert!(renderer.render_leaf(&off).contains("font-weight: normal"));
    }

    #[test]
    fn test_leaf_escapes_and_wraps_code() {
        let renderer = Renderer::new();
        let text = Text::new("a<b>").with_mark(MarkName::CODE).with_mark(MarkName::ITALIC);
        assert_eq!(
            renderer.render_leaf(&text),
            "<span style=\"font-weight: normal; font-style: italic\"><code>a&lt;b&gt;</code></span>"
        );
    }

    #[test]
    fn test_custom_strategy() {
        let mut renderer = Renderer::new();
        renderer.register(
            "quote",
            ElementStrategy::custom(|_, inner| format!("<blockquote>{}</blockquote>", inner)),
        );
        let quote = Element::new(Some(BlockType::new("quote")), vec![Node::text("hi")]);
        assert_eq!(
            renderer.render_element(&quote),
            "<blockquote><span style=\"font-weight: normal\">hi</span></blockquote>"
        );
    }
}
