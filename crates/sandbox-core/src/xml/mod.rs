//! XML pretty-printer
//!
//! Turns a single-line (or already formatted) XML document, typically an
//! ISO 20022 message returned by the Reframe API, into an indented rendition.
//! Element text and attributes are preserved verbatim.
//!
//! The formatter works on tag boundaries rather than a parsed tree:
//!
//! 1. Whitespace between two tags is removed and the input is trimmed.
//! 2. The input is split into `<...>` tags and the text runs between them.
//! 3. Tags are emitted one per line, indented by nesting depth. A tag that
//!    is directly followed or preceded by text stays on the same line as
//!    that text, so `<Ccy>EUR</Ccy>` is never broken up.
//!
//! Malformed input is not rejected: nesting is never validated and the
//! depth counter saturates at zero. Nesting depth is unlimited by default;
//! the only failure is exceeding an opt-in [`XmlFormatOptions::max_depth`].
//! [`format_xml`] hides that failure and
//! returns the input unchanged, [`format_xml_with`] reports it alongside the
//! fallback, and [`try_format_xml`] returns it as an error.
//!
//! ```
//! use sandbox_core::xml::format_xml;
//!
//! let formatted = format_xml(r#"<?xml version="1.0"?><Document><Id>1</Id><Flag/></Document>"#);
//! assert_eq!(
//!     formatted,
//!     "<?xml version=\"1.0\"?>\n<Document>\n  <Id>1</Id>\n  <Flag/>\n</Document>\n"
//! );
//! ```

mod printer;
mod token;

pub use token::{TokenKind, XmlToken, normalize, tokenize};

use printer::XmlPrinter;
use thiserror::Error;

/// Indentation unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// `n` spaces per level
    Spaces(usize),
    /// One tab per level
    Tabs,
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(2)
    }
}

/// Formatter options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlFormatOptions {
    pub indent: Indent,
    /// Deepest nesting level the formatter will produce; `None` is unlimited
    pub max_depth: Option<usize>,
}

impl Default for XmlFormatOptions {
    fn default() -> Self {
        Self {
            indent: Indent::default(),
            max_depth: None,
        }
    }
}

/// Reasons formatting can fail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum XmlFormatError {
    #[error("nesting deeper than {limit} levels at byte {offset} of the normalized input")]
    DepthLimitExceeded { limit: usize, offset: usize },
}

/// Result of [`format_xml_with`]: always displayable, failure still visible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlFormatOutcome {
    /// Formatted text, or the untouched input when formatting failed
    pub output: String,
    pub error: Option<XmlFormatError>,
}

impl XmlFormatOutcome {
    /// True when `output` is the original input because formatting failed
    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

/// Format XML, returning an error instead of falling back.
pub fn try_format_xml(xml: &str, options: &XmlFormatOptions) -> Result<String, XmlFormatError> {
    let normalized = normalize(xml);
    let tokens = tokenize(&normalized);
    XmlPrinter::new(options, normalized.len()).print(&tokens)
}

/// Format XML, falling back to the original input on failure.
///
/// The failure is logged and returned in the outcome so callers can tell a
/// fallback apart from input that was already formatted.
pub fn format_xml_with(xml: &str, options: &XmlFormatOptions) -> XmlFormatOutcome {
    match try_format_xml(xml, options) {
        Ok(output) => XmlFormatOutcome {
            output,
            error: None,
        },
        Err(error) => {
            tracing::error!("Error formatting XML, showing it unformatted: {}", error);
            XmlFormatOutcome {
                output: xml.to_string(),
                error: Some(error),
            }
        }
    }
}

/// Format XML with default options. Never fails; see [`format_xml_with`].
pub fn format_xml(xml: &str) -> String {
    format_xml_with(xml, &XmlFormatOptions::default()).into_output()
}

/// Whether formatting would leave `xml` unchanged.
///
/// Input that cannot be formatted counts as formatted, since the fallback
/// would return it as is.
pub fn is_formatted(xml: &str, options: &XmlFormatOptions) -> bool {
    try_format_xml(xml, options).map_or(true, |formatted| formatted == xml)
}
