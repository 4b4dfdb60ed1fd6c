//! The element tree produced by the parser.
//!
//! Nodes live in an arena ([`ElementTree`]) and refer to each other by
//! [`NodeId`]. Parent links are plain indices, so the tree has a single
//! owner and no reference cycles.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// Well-known attribute names.
pub mod attr {
    /// Header nesting depth; on `Text` nodes, the leading-space count of the
    /// source line.
    pub const LEVEL: &str = "level";
    /// Link target on `Link` nodes.
    pub const LINK: &str = "link";
}

/// Semantic type of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementKind {
    /// Synthetic root, one per parse.
    Document,
    /// `* Title`, `** Subtitle`, ...
    Header,
    /// Run of consecutive non-blank text lines.
    Paragraph,
    /// Literal text leaf.
    Text,
    /// `[[target]]` or `[[target][display]]`.
    Link,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::Header => "Header",
            Self::Paragraph => "Paragraph",
            Self::Text => "Text",
            Self::Link => "Link",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable index of an element within its [`ElementTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub(crate) kind: ElementKind,
    pub(crate) attributes: BTreeMap<String, String>,
    pub(crate) text: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Element {
    pub(crate) fn new(kind: ElementKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            attributes: BTreeMap::new(),
            text: String::new(),
            parent,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Literal content. Only ever non-empty on `Text` nodes.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All attributes, ordered by name.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// The `level` attribute parsed as a number.
    pub fn level(&self) -> Option<usize> {
        self.attr(attr::LEVEL)?.parse().ok()
    }

    /// The `link` attribute.
    pub fn link(&self) -> Option<&str> {
        self.attr(attr::LINK)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_text(&self) -> bool {
        self.kind == ElementKind::Text
    }
}

/// A complete parse result: an arena of elements rooted at a `Document`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementTree {
    pub(crate) elements: Vec<Element>,
}

impl ElementTree {
    /// The `Document` root.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self[id].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self[id].children
    }

    /// Number of elements, root included.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Pre-order walk starting at the root.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// First element of `kind` in document order.
    pub fn find(&self, kind: ElementKind) -> Option<NodeId> {
        self.descendants().find(|&id| self[id].kind == kind)
    }

    /// Concatenated text below `id`.
    ///
    /// Adjacent text-bearing children are joined with a single space, the
    /// same way the writers join them.
    pub fn plain_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let element = &self[id];
        out.push_str(&element.text);
        let mut seen_text = false;
        for &child in &element.children {
            let child_el = &self[child];
            if seen_text && !child_el.text.is_empty() {
                out.push(' ');
            }
            if !child_el.text.is_empty() {
                seen_text = true;
            } else if !child_el.is_text() {
                seen_text = false;
            }
            self.collect_text(child, out);
        }
    }
}

impl Index<NodeId> for ElementTree {
    type Output = Element;

    fn index(&self, id: NodeId) -> &Element {
        &self.elements[id.0]
    }
}

/// Iterator returned by [`ElementTree::descendants`].
pub struct Descendants<'a> {
    tree: &'a ElementTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree[id].children.iter().rev().copied());
        Some(id)
    }
}
