use std::fmt::{self, Write};

use orgwiki_syntax::Element;

use crate::TreeWriter;

/// Writes every element as a tag named after its kind.
///
/// `Text` elements contribute only their content, never a tag. Attributes
/// appear in name order, including ones with empty values.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlWriter {
    escape: bool,
}

impl XmlWriter {
    pub fn new(escape: bool) -> Self {
        Self { escape }
    }
}

impl TreeWriter for XmlWriter {
    fn start_element(&self, out: &mut dyn Write, element: &Element) -> fmt::Result {
        if element.is_text() {
            return Ok(());
        }
        write!(out, "<{}", element.kind())?;
        for (name, value) in element.attributes() {
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
        if element.is_text() {
            return Ok(());
        }
        write!(out, "</{}>", element.kind())
    }
}

#[cfg(test)]
mod tests {
    use crate::{OutputFormat, RenderOptions, render};
    use orgwiki_syntax::parse_str;
    use pretty_assertions::assert_eq;

    fn xml(input: &str, escape_text: bool) -> String {
        render(
            parse_str(input).tree.as_ref(),
            &RenderOptions {
                format: OutputFormat::Xml,
                pretty: false,
                escape_text,
            },
        )
    }

    #[test]
    fn paragraph_text_carries_no_markup() {
        assert_eq!(xml("hi\n", false), "<Document><Paragraph>hi</Paragraph></Document>");
    }

    #[test]
    fn empty_attribute_values_are_kept() {
        assert_eq!(
            xml("[[]]", false),
            r#"<Document><Paragraph><Link link=""></Link></Paragraph></Document>"#
        );
    }

    #[test]
    fn escaped_output() {
        assert_eq!(
            xml("[[a&b][<c>]]", true),
            r#"<Document><Paragraph><Link link="a&amp;b">&lt;c&gt;</Link></Paragraph></Document>"#
        );
    }
}
