//! # orgwiki-syntax
//!
//! A single-pass parser for a small, line-oriented wiki markup, producing a
//! labeled element tree.
//!
//! ## The Markup
//!
//! ```text
//! * Header            → Header level=1
//! ** Sub header       → Header level=2
//! Some text           → Paragraph (consecutive lines join one paragraph)
//! more text
//!                     → blank line ends the paragraph
//! See [[Main]]        → Link link="Main"
//! or [[http://x][x]]  → Link link="http://x" with display text "x"
//! ```
//!
//! ## Architecture Overview
//!
//! ```text
//! bytes → ByteScanner → Parser (grammar rules) → TreeBuilder → ElementTree
//!                                 │
//!                                 └──────────→ Vec<Diagnostic>
//! ```
//!
//! - [`scanner`] - byte sources with one byte of pushback
//! - [`parser`] - the grammar, the tree cursor and diagnostics
//! - [`tree`] - the arena-backed output tree
//! - [`position`] - line/column tracking for diagnostics
//!
//! There is no separate lexer: the grammar reads bytes directly and decides
//! what each one means from the current position in the tree.
//!
//! ## Quick Start
//!
//! ```
//! use orgwiki_syntax::{parse_str, ElementKind};
//!
//! let output = parse_str("* Hello\nSee [[Main][home]].\n");
//! let tree = output.tree.unwrap();
//!
//! let kinds: Vec<_> = tree
//!     .children(tree.root())
//!     .iter()
//!     .map(|&id| tree[id].kind())
//!     .collect();
//! assert_eq!(kinds, [ElementKind::Header, ElementKind::Paragraph]);
//!
//! let link = tree.find(ElementKind::Link).unwrap();
//! assert_eq!(tree[link].link(), Some("Main"));
//! ```
//!
//! ## Error Tolerance
//!
//! Malformed input never fails a parse. Problems are returned as
//! [`Diagnostic`]s next to the tree and the parser carries on:
//!
//! ```
//! use orgwiki_syntax::parse_str;
//!
//! let output = parse_str("oops ] here\n");
//! assert_eq!(output.diagnostics.len(), 1);
//! assert!(output.tree.is_some());
//! ```
//!
//! Parsing is one-way. The writers in `orgwiki-render` produce XML and
//! HTML, neither of which this parser reads back.

pub mod parser;
pub mod position;
pub mod scanner;
pub mod tree;

pub use parser::builder::TreeBuilder;
pub use parser::diagnostics::{Diagnostic, ParseError, Routine};
pub use parser::{ParseOutput, Parser, parse, parse_reader, parse_str};
pub use position::Position;
pub use tree::{Element, ElementKind, ElementTree, NodeId, attr};

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    /// Indented dump of a tree for snapshot testing.
    fn format_tree(tree: &ElementTree, id: NodeId, indent: usize) -> String {
        let element = &tree[id];
        let mut result = format!("{}{}", "  ".repeat(indent), element.kind());
        for (name, value) in element.attributes() {
            result.push_str(&format!(" {name}={value:?}"));
        }
        if element.is_text() {
            result.push_str(&format!(" {:?}", element.text()));
        }
        result.push('\n');
        for &child in tree.children(id) {
            result.push_str(&format_tree(tree, child, indent + 1));
        }
        result
    }

    fn dump(input: &str) -> String {
        let tree = parse_str(input).tree.expect("non-empty input");
        format_tree(&tree, tree.root(), 0)
    }

    #[test]
    fn snapshot_single_header() {
        assert_snapshot!(dump("* H\n"), @r#"
        Document
          Header level="1"
            Text "H"
        "#);
    }

    #[test]
    fn snapshot_header_and_paragraphs() {
        let input = "* Header1\n** Header2\nHow *are* you\ndoing?\n\nNext paragraph.\n";
        assert_snapshot!(dump(input), @r#"
        Document
          Header level="1"
            Text "Header1"
          Header level="2"
            Text "Header2"
          Paragraph
            Text level="0" "How *are* you"
            Text level="0" "doing?"
          Paragraph
            Text level="0" "Next paragraph."
        "#);
    }

    #[test]
    fn snapshot_links() {
        let input = "Link to [[hello]] or [[http://www][www]].";
        assert_snapshot!(dump(input), @r#"
        Document
          Paragraph
            Text level="0" "Link to "
            Link link="hello"
              Text ""
            Text " or "
            Link link="http://www"
              Text "www"
            Text "."
        "#);
    }

    #[test]
    fn snapshot_indented_line_with_links() {
        let input = "* Test\n** Test\n   _*[[hello]]*_, [[http://world][world]]\n";
        assert_snapshot!(dump(input), @r#"
        Document
          Header level="1"
            Text "Test"
          Header level="2"
            Text "Test"
          Paragraph
            Text level="3" "_*"
            Link link="hello"
              Text ""
            Text "*_, "
            Link link="http://world"
              Text "world"
            Text ""
        "#);
    }

    // === Error tolerance / messy input ===

    #[test]
    fn snapshot_messy_input() {
        let input = "* Draft\nbroken ] bracket\n**oops\nunclosed [[link\n";
        let output = parse_str(input);
        let messages: Vec<_> = output.diagnostics.iter().map(ToString::to_string).collect();
        assert_snapshot!(messages.join("\n"), @r"
        parse_text_line: unexpected ] at line 1, column 7
        parse_header_bullet: * or space expected, found 'o' at line 2, column 3
        parse_link: unexpected end of input at line 4, column 0
        ");
        let tree = output.tree.unwrap();
        assert_snapshot!(format_tree(&tree, tree.root(), 0), @r#"
        Document
          Header level="1"
            Text "Draft"
          Paragraph
            Text level="0" "broken "
            Text level="1" "bracket"
          Header level="2"
            Text "ops"
          Paragraph
            Text level="0" "unclosed "
            Link link="link"
            Text ""
        "#);
    }

    #[test]
    fn every_non_root_node_is_reachable_once() {
        let input = "* A [[b]]\nc [[d][e]] f ] g\n\n  h\n";
        let tree = parse_str(input).tree.unwrap();
        assert_eq!(tree.descendants().count(), tree.len());
    }
}
