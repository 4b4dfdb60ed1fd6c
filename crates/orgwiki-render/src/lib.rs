//! # orgwiki-render
//!
//! Serializes an [`ElementTree`] as XML or as an HTML fragment.
//!
//! ## Writers
//!
//! A [`TreeWriter`] decides what markup each element produces. The tree
//! walk itself lives in [`write`] and is shared by every writer:
//!
//! - [`XmlWriter`] - one tag per element kind, all attributes rendered
//! - [`HtmlWriter`] - `h1..hN`, `p` and `a href` only; `Document` and
//!   `Text` are transparent
//!
//! ## Quick Start
//!
//! ```
//! use orgwiki_render::{render, OutputFormat, RenderOptions};
//! use orgwiki_syntax::parse_str;
//!
//! let tree = parse_str("* T\n").tree;
//! let html = render(tree.as_ref(), &RenderOptions::default());
//! assert_eq!(html, "<h1>T</h1>");
//!
//! let xml = render(
//!     tree.as_ref(),
//!     &RenderOptions {
//!         format: OutputFormat::Xml,
//!         ..RenderOptions::default()
//!     },
//! );
//! assert_eq!(xml, r#"<Document><Header level="1">T</Header></Document>"#);
//! ```
//!
//! Output is one-way: nothing here parses XML or HTML back into a tree.

mod html;
mod options;
mod xml;

use std::fmt::{self, Write};

use orgwiki_syntax::{ElementTree, NodeId};

pub use html::HtmlWriter;
pub use options::{OutputFormat, RenderOptions, UnknownFormat};
pub use orgwiki_syntax::Element;
pub use xml::XmlWriter;

/// Emits the markup for individual elements during a tree walk.
pub trait TreeWriter {
    /// Opening markup, written before any children.
    fn start_element(&self, out: &mut dyn Write, element: &Element) -> fmt::Result;

    /// Literal content of a `Text` element.
    fn text(&self, out: &mut dyn Write, element: &Element) -> fmt::Result;

    /// Closing markup, written after all children.
    fn end_element(&self, out: &mut dyn Write, element: &Element) -> fmt::Result;
}

/// Walk `tree` depth first, emitting markup through `writer`.
///
/// With `pretty` set, children of block containers go on their own
/// indented lines. An element with any `Text` child is treated as inline
/// content and its children are written back to back.
///
/// Adjacent children that both carry text are separated by one space, which
/// restores the word break lost when lines or links split a run of text.
pub fn write(
    tree: &ElementTree,
    writer: &dyn TreeWriter,
    out: &mut dyn Write,
    pretty: bool,
) -> fmt::Result {
    Walk {
        tree,
        writer,
        pretty,
    }
    .node(out, tree.root(), 0)
}

/// Render `tree` to a string. An absent tree renders as nothing.
pub fn render(tree: Option<&ElementTree>, options: &RenderOptions) -> String {
    let mut out = String::new();
    let Some(tree) = tree else {
        return out;
    };
    log::debug!(
        "rendering {} elements as {} (pretty: {})",
        tree.len(),
        options.format,
        options.pretty
    );
    let xml;
    let html;
    let writer: &dyn TreeWriter = match options.format {
        OutputFormat::Xml => {
            xml = XmlWriter::new(options.escape_text);
            &xml
        }
        OutputFormat::Html => {
            html = HtmlWriter::new(options.escape_text);
            &html
        }
    };
    // Writing into a String cannot fail.
    let _ = write(tree, writer, &mut out, options.pretty);
    out
}

struct Walk<'a> {
    tree: &'a ElementTree,
    writer: &'a dyn TreeWriter,
    pretty: bool,
}

impl Walk<'_> {
    fn node(&self, out: &mut dyn Write, id: NodeId, level: usize) -> fmt::Result {
        let element = &self.tree[id];
        if element.is_text() {
            self.writer.text(out, element)?;
        }
        indent(out, level)?;
        self.writer.start_element(out, element)?;

        let inline = element
            .children()
            .iter()
            .any(|&child| self.tree[child].is_text());
        let block = self.pretty && !inline;

        let mut seen_text = false;
        for &child in element.children() {
            let child_element = &self.tree[child];
            let has_text = !child_element.text().is_empty();
            if seen_text && has_text {
                out.write_char(' ')?;
            }
            if has_text {
                seen_text = true;
            } else if !child_element.is_text() {
                seen_text = false;
            }

            if block {
                out.write_char('\n')?;
                self.node(out, child, level + 1)?;
                indent(out, level)?;
            } else {
                self.node(out, child, 0)?;
            }
        }

        if block && !element.is_text() {
            out.write_char('\n')?;
        }
        self.writer.end_element(out, element)
    }
}

fn indent(out: &mut dyn Write, level: usize) -> fmt::Result {
    for _ in 0..level {
        out.write_str("  ")?;
    }
    Ok(())
}
