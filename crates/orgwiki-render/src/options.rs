//! Output selection shared by the renderer, the config file and the CLI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which markup a tree is rendered as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One tag per element kind, attributes included.
    Xml,
    /// Headers, paragraphs and links only.
    #[default]
    Html,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Html => "html",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown output format '{0}', expected 'xml' or 'html'")]
pub struct UnknownFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(OutputFormat::Xml),
            "html" => Ok(OutputFormat::Html),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// How [`render`](crate::render) serializes a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Put block elements on their own indented lines.
    pub pretty: bool,
    /// Escape markup characters in text and attribute values.
    pub escape_text: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("xml", OutputFormat::Xml)]
    #[case("html", OutputFormat::Html)]
    #[case("HTML", OutputFormat::Html)]
    fn parses_format_names(#[case] input: &str, #[case] expected: OutputFormat) {
        assert_eq!(input.parse::<OutputFormat>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_format() {
        let err = "markdown".parse::<OutputFormat>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown output format 'markdown', expected 'xml' or 'html'"
        );
    }

    #[test]
    fn display_matches_parse() {
        for format in [OutputFormat::Xml, OutputFormat::Html] {
            assert_eq!(format.to_string().parse::<OutputFormat>(), Ok(format));
        }
    }

    #[test]
    fn defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.format, OutputFormat::Html);
        assert!(!options.pretty);
        assert!(!options.escape_text);
    }
}
