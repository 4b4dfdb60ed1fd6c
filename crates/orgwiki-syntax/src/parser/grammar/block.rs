//! Header grammar: `* Title`, `** Subtitle`, ...

use crate::parser::Parser;
use crate::parser::diagnostics::{ParseError, Routine};
use crate::scanner::ByteScanner;
use crate::tree::{ElementKind, attr};

use super::{BULLET, Stop, inline};

/// Parse a header line. The bullet run has not been consumed yet.
pub(super) fn header<S: ByteScanner>(p: &mut Parser<S>) -> Stop {
    p.open(ElementKind::Header);

    let level = bullet(p);
    p.tree.set_attr(attr::LEVEL, level.to_string());

    p.open(ElementKind::Text);
    let stop = inline::text_line(p);
    p.close();

    p.close();
    stop
}

/// Consume the bullet run and its terminating space, returning how many
/// bullets were seen.
///
/// Anything other than a space after the bullets is reported and consumed;
/// the count so far still stands.
fn bullet<S: ByteScanner>(p: &mut Parser<S>) -> usize {
    let mut level = 0;
    loop {
        let Some(c) = p.read() else {
            p.report(Routine::HeaderBullet, ParseError::UnexpectedEndOfInput);
            return level;
        };
        match c {
            BULLET => {
                level += 1;
                p.next_column();
            }
            b' ' => {
                p.next_column();
                return level;
            }
            found => {
                p.next_column();
                p.report(
                    Routine::HeaderBullet,
                    ParseError::MalformedHeaderBullet { found },
                );
                return level;
            }
        }
    }
}
