//! # Diagnostics
//!
//! Malformed markup never stops a parse. Each problem is recorded as a
//! [`Diagnostic`] and the sub-parser that hit it either skips the offending
//! byte or gives up on just the construct it was building.
//!
//! ```text
//! parse_link: unexpected end of input at line 0, column 7
//! ^^^^^^^^^^  ^^^^^^^^^^^^^^^^^^^^^^^    ^^^^^^^^^^^^^^^^^^
//! Routine     ParseError                 Position
//! ```
//!
//! The parser only collects these. Logging or displaying them is up to the
//! caller.

use std::fmt;

use thiserror::Error;

use crate::position::Position;
use crate::tree::ElementKind;

/// Everything that can go wrong while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `]` outside of any link, or a link that starts with `]`.
    #[error("unexpected ]")]
    UnexpectedCloseBracket,

    /// `[` where the link state machine cannot take one.
    #[error("unexpected [")]
    UnexpectedOpenBracket,

    /// `[` while already inside link syntax.
    #[error("[ is not allowed inside {context}")]
    WrongContextBracket { context: ElementKind },

    /// A header bullet run not terminated by a space.
    #[error("* or space expected, found '{}'", .found.escape_ascii())]
    MalformedHeaderBullet { found: u8 },

    /// Input ran out in the middle of a construct.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// A byte the link state machine cannot take in its current state.
    #[error("unexpected character '{}'", .found.escape_ascii())]
    UnexpectedCharacter { found: u8 },
}

/// The sub-parser that reported a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Routine {
    TextLine,
    Link,
    HeaderBullet,
}

impl Routine {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TextLine => "parse_text_line",
            Self::Link => "parse_link",
            Self::HeaderBullet => "parse_header_bullet",
        }
    }
}

impl fmt::Display for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal parse problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub error: ParseError,
    pub routine: Routine,
    pub position: Position,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.routine, self.error, self.position)
    }
}
