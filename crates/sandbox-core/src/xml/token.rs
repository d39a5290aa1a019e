//! Token-boundary tokenizer for the XML pretty-printer
//!
//! This is deliberately not an XML parser. The input is split at `<...>`
//! spans and every span is classified by looking at its first and last
//! characters only. Entities, CDATA sections and namespaces pass through
//! untouched as part of whichever token contains them.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// A tag is `<`, at least one character that is not `>`, then `>`.
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Whitespace sitting directly between two tags.
static INTER_TAG_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">\s*<").unwrap());

/// Classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `<?xml ...?>` (any tag containing `<?xml`)
    Declaration,
    /// `<name ...>`, and any other tag that is not one of the kinds below
    Opening,
    /// `</name>`
    Closing,
    /// `<name .../>`
    SelfClosing,
    /// Character content between two tags
    Text,
}

/// A slice of the normalized input with its classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlToken<'a> {
    text: &'a str,
    kind: TokenKind,
    offset: usize,
}

impl<'a> XmlToken<'a> {
    fn tag(text: &'a str, offset: usize) -> Self {
        Self {
            text,
            kind: classify_tag(text),
            offset,
        }
    }

    fn text(text: &'a str, offset: usize) -> Self {
        Self {
            text,
            kind: TokenKind::Text,
            offset,
        }
    }

    /// The raw token text, exactly as it appears in the normalized input
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Byte offset of the token within the normalized input
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_text(&self) -> bool {
        self.kind == TokenKind::Text
    }

    pub fn is_tag(&self) -> bool {
        !self.is_text()
    }
}

/// Classify a `<...>` span.
///
/// Order matters: a span starting with `</` is always a closing tag, even if
/// it also ends with `/>`.
fn classify_tag(tag: &str) -> TokenKind {
    if tag.starts_with("</") {
        TokenKind::Closing
    } else if tag.contains("<?xml") {
        TokenKind::Declaration
    } else if tag.ends_with("/>") {
        TokenKind::SelfClosing
    } else {
        TokenKind::Opening
    }
}

/// Remove layout whitespace between tags and trim the whole input.
///
/// Text content is left alone: whitespace is only removed when a `>` is
/// followed (after nothing but whitespace) by a `<`.
pub fn normalize(xml: &str) -> Cow<'_, str> {
    match INTER_TAG_WHITESPACE.replace_all(xml, "><") {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
        Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
    }
}

/// Split normalized input into tags and text runs.
///
/// Empty and whitespace-only text runs are dropped. Text runs that are kept
/// are not trimmed.
pub fn tokenize(xml: &str) -> Vec<XmlToken<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for tag in TAG_REGEX.find_iter(xml) {
        push_text(&mut tokens, xml, last, tag.start());
        tokens.push(XmlToken::tag(tag.as_str(), tag.start()));
        last = tag.end();
    }
    push_text(&mut tokens, xml, last, xml.len());

    tokens
}

fn push_text<'a>(tokens: &mut Vec<XmlToken<'a>>, xml: &'a str, start: usize, end: usize) {
    let text = &xml[start..end];
    if !text.trim().is_empty() {
        tokens.push(XmlToken::text(text, start));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(xml: &str) -> Vec<TokenKind> {
        tokenize(xml).iter().map(XmlToken::kind).collect()
    }

    #[test]
    fn test_normalize_collapses_inter_tag_whitespace() {
        let xml = "  <root>\n    <a>1</a>\n\t<b/>\n</root>\n";
        assert_eq!(normalize(xml), "<root><a>1</a><b/></root>");
    }

    #[test]
    fn test_normalize_keeps_text_whitespace() {
        assert_eq!(normalize("<a> two words </a>"), "<a> two words </a>");
    }

    #[test]
    fn test_normalize_borrows_when_nothing_changes() {
        assert!(matches!(normalize("<a>1</a>"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_classification() {
        assert_eq!(
            kinds(r#"<?xml version="1.0"?><Document xmlns="urn:iso"><Id>1</Id><Empty/></Document>"#),
            vec![
                TokenKind::Declaration,
                TokenKind::Opening,
                TokenKind::Opening,
                TokenKind::Text,
                TokenKind::Closing,
                TokenKind::SelfClosing,
                TokenKind::Closing,
            ]
        );
    }

    #[test]
    fn test_closing_wins_over_self_closing() {
        assert_eq!(kinds("</odd/>"), vec![TokenKind::Closing]);
    }

    #[test]
    fn test_attributes_stay_inside_the_tag() {
        let tokens = tokenize(r#"<Amt Ccy="EUR">100.00</Amt>"#);
        assert_eq!(tokens[0].as_str(), r#"<Amt Ccy="EUR">"#);
        assert_eq!(tokens[1].as_str(), "100.00");
        assert_eq!(tokens[1].offset(), 15);
    }

    #[test]
    fn test_empty_angle_brackets_are_text() {
        let tokens = tokenize("a<>b");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_text());
        assert_eq!(tokens[0].as_str(), "a<>b");
    }

    #[test]
    fn test_whitespace_only_text_is_dropped() {
        assert_eq!(
            kinds("<a>   </a>"),
            vec![TokenKind::Opening, TokenKind::Closing]
        );
    }

    #[test]
    fn test_text_is_not_trimmed() {
        let tokens = tokenize("<a>  padded  </a>");
        assert_eq!(tokens[1].as_str(), "  padded  ");
    }
}
