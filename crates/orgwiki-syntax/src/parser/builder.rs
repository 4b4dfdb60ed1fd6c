//! Cursor-driven tree construction.
//!
//! The builder owns the arena while a parse is in flight. A cursor marks the
//! current insertion point: [`open`](TreeBuilder::open) appends a child and
//! descends into it, [`close`](TreeBuilder::close) climbs back to the parent.
//!
//! Text is accumulated as raw bytes per node and flushed into the element's
//! `String` when the node is closed (or when the tree is finished).

use crate::tree::{Element, ElementKind, ElementTree, NodeId};

struct Slot {
    element: Element,
    buffer: Vec<u8>,
}

impl Slot {
    fn new(kind: ElementKind, parent: Option<NodeId>) -> Self {
        Self {
            element: Element::new(kind, parent),
            buffer: Vec::new(),
        }
    }

    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            self.element
                .text
                .push_str(&String::from_utf8_lossy(&self.buffer));
            self.buffer.clear();
        }
    }
}

/// Builds an [`ElementTree`] through open/close calls.
pub struct TreeBuilder {
    slots: Vec<Slot>,
    cursor: NodeId,
}

impl TreeBuilder {
    /// Start a tree with a `Document` root under the cursor.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot::new(ElementKind::Document, None)],
            cursor: NodeId(0),
        }
    }

    pub fn current(&self) -> NodeId {
        self.cursor
    }

    pub fn current_kind(&self) -> ElementKind {
        self.slot(self.cursor).element.kind
    }

    pub fn parent_kind(&self) -> Option<ElementKind> {
        let parent = self.slot(self.cursor).element.parent?;
        Some(self.slot(parent).element.kind)
    }

    /// Number of children of the current node.
    pub fn child_count(&self) -> usize {
        self.slot(self.cursor).element.children.len()
    }

    /// Append a new `kind` child to the current node and move onto it.
    pub fn open(&mut self, kind: ElementKind) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Slot::new(kind, Some(self.cursor)));
        self.slot_mut(self.cursor).element.children.push(id);
        self.cursor = id;
        log::trace!("open {kind} #{}", id.0);
        id
    }

    /// Move the cursor to the parent of the current node.
    ///
    /// The root is never closed; doing so is a grammar bug.
    pub fn close(&mut self) {
        let slot = self.slot_mut(self.cursor);
        slot.flush();
        let parent = slot.element.parent;
        match parent {
            Some(parent) => self.cursor = parent,
            None => debug_assert!(false, "close() called on the document root"),
        }
    }

    /// Whether the current node or any of its ancestors is a `kind`.
    pub fn is_inside(&self, kind: ElementKind) -> bool {
        let mut node = Some(self.cursor);
        while let Some(id) = node {
            let element = &self.slot(id).element;
            if element.kind == kind {
                return true;
            }
            node = element.parent;
        }
        false
    }

    /// Open a `kind` unless one is already open.
    pub fn open_if_absent(&mut self, kind: ElementKind) {
        if !self.is_inside(kind) {
            self.open(kind);
        }
    }

    /// Close the innermost open `kind` along with everything opened inside it.
    pub fn close_if_present(&mut self, kind: ElementKind) {
        if !self.is_inside(kind) {
            return;
        }
        while self.current_kind() != kind {
            self.close();
        }
        self.close();
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let id = self.cursor;
        self.slot_mut(id)
            .element
            .attributes
            .insert(name.to_owned(), value.into());
    }

    /// Append `value` to an attribute of the current node, creating it empty
    /// first if needed.
    pub fn append_attr(&mut self, name: &str, value: &str) {
        let id = self.cursor;
        self.slot_mut(id)
            .element
            .attributes
            .entry(name.to_owned())
            .or_default()
            .push_str(value);
    }

    pub fn push_text(&mut self, byte: u8) {
        let id = self.cursor;
        self.slot_mut(id).buffer.push(byte);
    }

    /// Remove and return the text accumulated on the current node.
    pub fn take_text(&mut self) -> String {
        let id = self.cursor;
        let slot = self.slot_mut(id);
        slot.flush();
        std::mem::take(&mut slot.element.text)
    }

    /// Flush any pending text and hand over the finished tree.
    pub fn finish(self) -> ElementTree {
        let elements = self
            .slots
            .into_iter()
            .map(|mut slot| {
                slot.flush();
                slot.element
            })
            .collect();
        ElementTree { elements }
    }

    fn slot(&self, id: NodeId) -> &Slot {
        &self.slots[id.0]
    }

    fn slot_mut(&mut self, id: NodeId) -> &mut Slot {
        &mut self.slots[id.0]
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
