//! Indentation walk over the token stream

use super::token::{TokenKind, XmlToken};
use super::{Indent, XmlFormatError, XmlFormatOptions};

/// Emits tokens with one indent unit per open element.
///
/// The printer keeps a depth counter, not a stack of names: closing tags are
/// never matched against their opener.
pub(crate) struct XmlPrinter<'o> {
    options: &'o XmlFormatOptions,
    unit: String,
    buffer: String,
    indent: usize,
}

impl<'o> XmlPrinter<'o> {
    pub(crate) fn new(options: &'o XmlFormatOptions, capacity: usize) -> Self {
        let unit = match options.indent {
            Indent::Spaces(width) => " ".repeat(width),
            Indent::Tabs => "\t".to_string(),
        };

        Self {
            options,
            unit,
            // Indentation roughly doubles short single-line documents
            buffer: String::with_capacity(capacity * 2),
            indent: 0,
        }
    }

    pub(crate) fn print(mut self, tokens: &[XmlToken<'_>]) -> Result<String, XmlFormatError> {
        for (i, token) in tokens.iter().enumerate() {
            let prev_is_text = i > 0 && tokens[i - 1].is_text();
            let next_is_text = tokens.get(i + 1).is_some_and(XmlToken::is_text);

            match token.kind() {
                TokenKind::Closing => {
                    self.indent = self.indent.saturating_sub(1);
                    if !prev_is_text {
                        self.push_indent();
                    }
                    self.buffer.push_str(token.as_str());
                    if !next_is_text {
                        self.buffer.push('\n');
                    }
                }
                TokenKind::SelfClosing | TokenKind::Declaration => {
                    self.push_indent();
                    self.buffer.push_str(token.as_str());
                    self.buffer.push('\n');
                }
                TokenKind::Opening => {
                    self.push_indent();
                    self.buffer.push_str(token.as_str());
                    if !next_is_text {
                        self.buffer.push('\n');
                    }
                    self.open(token)?;
                }
                TokenKind::Text => self.buffer.push_str(token.as_str()),
            }
        }

        Ok(self.buffer)
    }

    fn open(&mut self, token: &XmlToken<'_>) -> Result<(), XmlFormatError> {
        if let Some(limit) = self.options.max_depth
            && self.indent >= limit
        {
            return Err(XmlFormatError::DepthLimitExceeded {
                limit,
                offset: token.offset(),
            });
        }
        self.indent += 1;
        Ok(())
    }

    fn push_indent(&mut self) {
        for _ in 0..self.indent {
            self.buffer.push_str(&self.unit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::token::tokenize;

    fn print(xml: &str, options: &XmlFormatOptions) -> Result<String, XmlFormatError> {
        let tokens = tokenize(xml);
        XmlPrinter::new(options, xml.len()).print(&tokens)
    }

    #[test]
    fn test_inline_text_stays_on_one_line() {
        let out = print("<r><a>hello</a></r>", &XmlFormatOptions::default()).unwrap();
        assert_eq!(out, "<r>\n  <a>hello</a>\n</r>\n");
    }

    #[test]
    fn test_tabs() {
        let options = XmlFormatOptions {
            indent: Indent::Tabs,
            ..Default::default()
        };
        let out = print("<r><a/></r>", &options).unwrap();
        assert_eq!(out, "<r>\n\t<a/>\n</r>\n");
    }

    #[test]
    fn test_zero_width_indent() {
        let options = XmlFormatOptions {
            indent: Indent::Spaces(0),
            ..Default::default()
        };
        let out = print("<r><a/></r>", &options).unwrap();
        assert_eq!(out, "<r>\n<a/>\n</r>\n");
    }

    #[test]
    fn test_depth_limit_reports_offset() {
        let options = XmlFormatOptions {
            max_depth: Some(2),
            ..Default::default()
        };
        assert!(print("<a><b></b></a>", &options).is_ok());

        let err = print("<a><b><c></c></b></a>", &options).unwrap_err();
        assert_eq!(
            err,
            XmlFormatError::DepthLimitExceeded {
                limit: 2,
                offset: 6
            }
        );
    }

    #[test]
    fn test_unbalanced_closing_floors_at_zero() {
        let out = print("</a></b><c/>", &XmlFormatOptions::default()).unwrap();
        assert_eq!(out, "</a>\n</b>\n<c/>\n");
    }
}
