//! # Inline Grammar
//!
//! Text runs and links.
//!
//! ## Text Runs
//!
//! [`text_line`] appends bytes to the current node until the end of the
//! line. Brackets are the only special bytes:
//!
//! | Byte | Inside link syntax | Elsewhere |
//! |------|--------------------|-----------|
//! | `[` | error, skipped | closes the text, parses a link, reopens text |
//! | `]` | pushed back for the link parser | error, consumed, run ends |
//!
//! ## Links
//!
//! A link is `[[target]]` or `[[target][display text]]`. The caller has
//! already consumed the first `[`. [`link`] is a small state machine:
//!
//! ```text
//!          [          ]           [            ]
//!  Start ─────▶ Target ─────▶ Middle ─────▶ Display ─────▶ End
//!                 │              │                          │
//!              (text)            └─── ] : closed            └─ ] : closed
//! ```
//!
//! The target text is collected on the `Link` node itself and then moved
//! into its `link` attribute. Display text goes into a child `Text` node.
//! Spaces between brackets are skipped in every state.

use crate::parser::Parser;
use crate::parser::diagnostics::{ParseError, Routine};
use crate::scanner::ByteScanner;
use crate::tree::{ElementKind, attr};

use super::Stop;

/// Consume a run of text into the current node.
pub(super) fn text_line<S: ByteScanner>(p: &mut Parser<S>) -> Stop {
    loop {
        let Some(c) = p.read() else {
            return Stop::EndOfInput;
        };
        match c {
            b'\n' => {
                p.next_line();
                return Stop::Newline;
            }
            b'\r' => p.next_column(),
            b']' => {
                if in_link_syntax(p) {
                    p.unread();
                    return Stop::CloseBracket;
                }
                p.report(Routine::TextLine, ParseError::UnexpectedCloseBracket);
                p.next_column();
                return Stop::StrayBracket;
            }
            b'[' => {
                if p.current_kind() == ElementKind::Text && !in_link_syntax(p) {
                    p.next_column();
                    p.close();
                    link(p);
                    p.open(ElementKind::Text);
                } else {
                    let context = p.current_kind();
                    p.report(
                        Routine::TextLine,
                        ParseError::WrongContextBracket { context },
                    );
                    p.next_column();
                }
            }
            _ => {
                p.next_column();
                p.tree.push_text(c);
            }
        }
    }
}

/// Whether the cursor is on link target or link display text.
fn in_link_syntax<S: ByteScanner>(p: &Parser<S>) -> bool {
    match p.current_kind() {
        ElementKind::Link => true,
        ElementKind::Text => p.parent_kind() == Some(ElementKind::Link),
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkState {
    /// After the opening `[` consumed by the caller.
    Start,
    /// Inside `[target`.
    Target,
    /// After `[target]`.
    Middle,
    /// Inside `[display`.
    Display,
    /// After `[display]`.
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkEnd {
    Closed,
    Aborted,
}

/// Parse a link. The first `[` has been consumed.
pub(super) fn link<S: ByteScanner>(p: &mut Parser<S>) {
    p.open(ElementKind::Link);
    if link_body(p) == LinkEnd::Closed {
        p.tree.append_attr(attr::LINK, "");
        if p.tree.child_count() == 0 {
            p.open(ElementKind::Text);
            p.close();
        }
    }
    p.close();
}

fn link_body<S: ByteScanner>(p: &mut Parser<S>) -> LinkEnd {
    let mut state = LinkState::Start;
    loop {
        let Some(c) = p.read() else {
            p.report(Routine::Link, ParseError::UnexpectedEndOfInput);
            return LinkEnd::Aborted;
        };
        match c {
            b'[' => {
                p.next_column();
                state = match state {
                    LinkState::Start => LinkState::Target,
                    LinkState::Middle => LinkState::Display,
                    _ => {
                        p.report(Routine::Link, ParseError::UnexpectedOpenBracket);
                        return LinkEnd::Aborted;
                    }
                };
            }
            b']' => {
                p.next_column();
                state = match state {
                    LinkState::Target => LinkState::Middle,
                    LinkState::Display => LinkState::End,
                    LinkState::Middle | LinkState::End => return LinkEnd::Closed,
                    LinkState::Start => {
                        p.report(Routine::Link, ParseError::UnexpectedCloseBracket);
                        return LinkEnd::Aborted;
                    }
                };
            }
            b' ' => p.next_column(),
            found => match state {
                LinkState::Target => {
                    p.unread();
                    text_line(p);
                    let target = p.tree.take_text();
                    p.tree.append_attr(attr::LINK, &target);
                }
                LinkState::Display => {
                    p.unread();
                    p.open(ElementKind::Text);
                    text_line(p);
                    p.close();
                }
                _ => {
                    p.next_column();
                    p.report(Routine::Link, ParseError::UnexpectedCharacter { found });
                    return LinkEnd::Aborted;
                }
            },
        }
    }
}
