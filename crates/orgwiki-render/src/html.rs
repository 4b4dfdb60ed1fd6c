use std::borrow::Cow;
use std::fmt::{self, Write};

use orgwiki_syntax::{Element, ElementKind, attr};

use crate::TreeWriter;

/// Writes headers, paragraphs and links as an HTML fragment.
///
/// `Document` and `Text` produce no tags. Links become `<a href=...>`; a
/// link with an empty target gets a bare `<a>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlWriter {
    escape: bool,
}

impl HtmlWriter {
    pub fn new(escape: bool) -> Self {
        Self { escape }
    }

    fn tag(element: &Element) -> Option<Cow<'static, str>> {
        match element.kind() {
            ElementKind::Header => Some(Cow::Owned(format!(
                "h{}",
                element.attr(attr::LEVEL).unwrap_or_default()
            ))),
            ElementKind::Paragraph => Some(Cow::Borrowed("p")),
            ElementKind::Link => Some(Cow::Borrowed("a")),
            ElementKind::Document | ElementKind::Text => None,
        }
    }

    /// Attributes translated to HTML names. Only links carry any.
    fn attributes(element: &Element) -> impl Iterator<Item = (&'static str, &str)> {
        let href = match element.kind() {
            ElementKind::Link => element.link().filter(|link| !link.is_empty()),
            _ => None,
        };
        href.map(|link| ("href", link)).into_iter()
    }
}

impl TreeWriter for HtmlWriter {
    fn start_element(&self, out: &mut dyn Write, element: &Element) -> fmt::Result {
        let Some(tag) = Self::tag(element) else {
            return Ok(());
        };
        write!(out, "<{tag}")?;
        for (name, value) in Self::attributes(element) {
            if self.escape {
                write!(
                    out,
                    " {name}=\"{}\"",
                    html_escape::encode_double_quoted_attribute(value)
                )?;
            } else {
                write!(out, " {name}=\"{value}\"")?;
            }
        }
        out.write_char('>')
    }

    fn text(&self, out: &mut dyn Write, element: &Element) -> fmt::Result {
        if self.escape {
            out.write_str(&html_escape::encode_text(element.text()))
        } else {
            out.write_str(element.text())
        }
    }

    fn end_element(&self, out: &mut dyn Write, element: &Element) -> fmt::Result {
        match Self::tag(element) {
            Some(tag) => write!(out, "</{tag}>"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{RenderOptions, render};
    use orgwiki_syntax::parse_str;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn html(input: &str) -> String {
        render(parse_str(input).tree.as_ref(), &RenderOptions::default())
    }

    #[rstest]
    #[case("* a\n", "<h1>a</h1>")]
    #[case("** a\n", "<h2>a</h2>")]
    #[case("**x\n", "<h2></h2>")]
    fn header_level_picks_the_tag(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(html(input), expected);
    }

    #[test]
    fn link_in_header() {
        assert_eq!(
            html("* See [[Main][home]]\n"),
            r#"<h1>See <a href="Main">home</a></h1>"#
        );
    }
}
