//! Minimal read-only DOM abstraction consumed by the extraction engine
//!
//! The engine never talks to an HTML parser directly. An adapter (such as
//! the scraper-backed `bibliobus-html` crate) parses real markup and hands
//! over an owned [`DomNode`] tree; tests build trees by hand. The query
//! surface is deliberately narrow: inner text, a pre-order walk, attribute
//! lookup, and anchor collection are all the engine needs.

/// One node of a parsed HTML fragment, detached from any parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomNode {
    /// An element with its tag name, attributes and children in document order
    Element {
        /// Lowercased tag name
        name: String,
        /// Attribute name/value pairs
        attributes: Vec<(String, String)>,
        /// Child nodes in document order
        children: Vec<DomNode>,
    },
    /// A text node, already entity-decoded
    Text(String),
}

impl DomNode {
    /// Create an element node
    #[must_use]
    pub fn element(
        name: impl Into<String>,
        attributes: Vec<(String, String)>,
        children: Vec<DomNode>,
    ) -> Self {
        Self::Element {
            name: name.into(),
            attributes,
            children,
        }
    }

    /// Create a text node
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Tag name for element nodes, `None` for text nodes
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Element { name, .. } => Some(name),
            Self::Text(_) => None,
        }
    }

    /// First value of the named attribute, if present
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Self::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            Self::Text(_) => None,
        }
    }

    /// All attribute values of this node, in document order
    pub fn attribute_values(&self) -> impl Iterator<Item = &str> {
        let attributes = match self {
            Self::Element { attributes, .. } => attributes.as_slice(),
            Self::Text(_) => &[],
        };
        attributes.iter().map(|(_, value)| value.as_str())
    }

    /// Concatenated text of this node and all its descendants
    ///
    /// No separators are inserted between adjacent text nodes, matching how
    /// loosely authored sources rely on literal whitespace in the markup.
    #[must_use]
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(content) => out.push_str(content),
            Self::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Pre-order walk over this node and all its descendants
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// All descendant anchors carrying an `href`, in document order
    #[must_use]
    pub fn anchors(&self) -> Vec<&DomNode> {
        self.walk()
            .filter(|node| node.name() == Some("a") && node.attr("href").is_some())
            .collect()
    }

    /// First descendant element with the given tag name, in document order
    #[must_use]
    pub fn first_descendant(&self, tag: &str) -> Option<&DomNode> {
        self.walk().skip(1).find(|node| node.name() == Some(tag))
    }
}

/// Adapter seam between the engine and a real HTML parser
///
/// Implementations wrap whatever HTML library the host chooses; the engine
/// only ever sees the resulting [`DomNode`] trees.
pub trait DomParser {
    /// Parse an HTML fragment into an owned node tree
    fn parse_fragment(&self, html: &str) -> DomNode;
}

/// Pre-order iterator returned by [`DomNode::walk`]
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a DomNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a DomNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let DomNode::Element { children, .. } = node {
            self.stack.extend(children.iter().rev());
        }
        Some(node)
    }
}
