//! # Grammar Rules
//!
//! Each rule takes `&mut Parser` and drives the scanner and the tree cursor
//! directly.
//!
//! ## Module Structure
//!
//! - this module - document loop and line dispatch
//! - [`block`] - headers and their bullets
//! - [`inline`] - text runs and links
//!
//! ## Line Dispatch
//!
//! | First byte of a line | Result |
//! |----------------------|--------|
//! | `*` | header (closes any open paragraph) |
//! | space | counted as indentation |
//! | `\r` | ignored |
//! | `\n` | blank line, closes any open paragraph |
//! | anything else | text segment inside a paragraph |
//!
//! A text segment normally runs to the end of the line. When it stops
//! early (a stray `]`), dispatch resumes on the same line and the next
//! segment becomes a sibling `Text` node.

mod block;
mod inline;

use crate::parser::Parser;
use crate::scanner::ByteScanner;
use crate::tree::{ElementKind, attr};

/// Marks a header line.
const BULLET: u8 = b'*';

/// Why a text run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    /// Consumed the line's newline.
    Newline,
    /// Input exhausted.
    EndOfInput,
    /// Saw a `]` closing link syntax; it was pushed back.
    CloseBracket,
    /// Consumed a `]` that closes nothing.
    StrayBracket,
}

/// Parse the whole document, one line at a time.
pub fn document<S: ByteScanner>(p: &mut Parser<S>) {
    while !p.at_end() {
        line(p);
    }
}

/// Parse one source line.
fn line<S: ByteScanner>(p: &mut Parser<S>) {
    // Leading spaces seen so far; stamped on text segments.
    let mut level = 0usize;
    // Nothing but spaces or carriage returns consumed on this line yet.
    let mut fresh = true;

    while let Some(c) = p.read() {
        match c {
            BULLET if level == 0 && fresh => {
                p.close_if_present(ElementKind::Paragraph);
                p.unread();
                if block::header(p) == Stop::Newline {
                    return;
                }
                fresh = false;
            }
            b' ' => {
                level += 1;
                p.next_column();
            }
            b'\r' => p.next_column(),
            b'\n' => {
                p.close_if_present(ElementKind::Paragraph);
                p.next_line();
                return;
            }
            _ => {
                p.open_if_absent(ElementKind::Paragraph);
                p.unread();
                p.open(ElementKind::Text);
                p.tree.set_attr(attr::LEVEL, level.to_string());
                let stop = inline::text_line(p);
                p.close();
                if stop == Stop::Newline {
                    return;
                }
                fresh = false;
            }
        }
    }
}
