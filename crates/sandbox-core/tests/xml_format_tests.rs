//! Behavioural tests for the XML pretty-printer

use sandbox_core::xml::{
    Indent, XmlFormatError, XmlFormatOptions, format_xml, format_xml_with, normalize,
    try_format_xml,
};

const SAMPLES: &[&str] = &[
    "<root><child/></root>",
    r#"<?xml version="1.0"?><root></root>"#,
    r#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:camt.053.001.08"><BkToCstmrStmt><GrpHdr><MsgId>STMT-01</MsgId></GrpHdr><Stmt><Id>1</Id><Bal><Amt Ccy="USD">10.00</Amt></Bal><Bal><Amt Ccy="USD">12.50</Amt></Bal></Stmt></BkToCstmrStmt></Document>"#,
    "<a>\n    <b>\n        <c>deep</c>\n    </b>\n</a>\n",
    "<list><item>1</item><item>2</item><item/><item>3</item></list>",
];

/// Every line's indentation must match the nesting depth of that line.
fn assert_indentation_tracks_depth(formatted: &str) {
    let mut depth = 0usize;
    for line in formatted.lines() {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        let closing = trimmed.starts_with("</");
        if closing {
            depth -= 1;
        }

        assert_eq!(indent, depth * 2, "wrong indentation on line {line:?}");

        let inline = !closing && trimmed.contains("</");
        let opens = !closing
            && !inline
            && !trimmed.ends_with("/>")
            && !trimmed.starts_with("<?");
        if opens {
            depth += 1;
        }
    }
    assert_eq!(depth, 0, "unbalanced output:\n{formatted}");
}

#[test]
fn test_same_depth_shares_indentation() {
    for sample in SAMPLES {
        assert_indentation_tracks_depth(&format_xml(sample));
    }
}

#[test]
fn test_reformatting_is_stable() {
    for sample in SAMPLES {
        let once = format_xml(sample);
        let twice = format_xml(&once);
        assert_eq!(once, twice, "reformatting changed {sample:?}");
        assert_eq!(normalize(&once), normalize(&twice));
    }
}

#[test]
fn test_inline_text() {
    let formatted = format_xml("<r><a>hello</a></r>");
    assert_eq!(formatted, "<r>\n  <a>hello</a>\n</r>\n");
    assert!(formatted.lines().any(|line| line == "  <a>hello</a>"));
}

#[test]
fn test_root_with_self_closing_child() {
    assert_eq!(
        format_xml("<root><child/></root>"),
        "<root>\n  <child/>\n</root>\n"
    );
}

#[test]
fn test_declaration_keeps_root_at_column_zero() {
    let formatted = format_xml(r#"<?xml version="1.0"?><root></root>"#);
    let lines: Vec<&str> = formatted.lines().collect();
    assert_eq!(lines, vec![r#"<?xml version="1.0"?>"#, "<root>", "</root>"]);
}

#[test]
fn test_malformed_input_keeps_every_token() {
    for input in ["<a><b></a>", "</a></b><c>", "<a>text", "plain text", "<a><b>x</c></d>"] {
        let formatted = format_xml(input);
        assert!(!formatted.is_empty(), "empty output for {input:?}");
        for piece in ["<a>", "<b>", "</a>", "</b>", "<c>", "</d>", "text", "x"] {
            if input.contains(piece) {
                assert!(
                    formatted.contains(piece),
                    "{piece:?} lost from {input:?}: {formatted:?}"
                );
            }
        }
    }
}

#[test]
fn test_attributes_pass_through() {
    let input = r#"<Amt Ccy="EUR" xmlns:x="urn:x" x:note='a > b'>5</Amt>"#;
    let formatted = format_xml(input);
    assert!(formatted.starts_with(r#"<Amt Ccy="EUR" xmlns:x="urn:x" x:note='a >"#));
}

#[test]
fn test_depth_failure_is_observable_and_falls_back() {
    let options = XmlFormatOptions {
        max_depth: Some(3),
        ..Default::default()
    };
    let input = "<a><b><c><d>too deep</d></c></b></a>";

    let outcome = format_xml_with(input, &options);
    assert!(outcome.is_fallback());
    assert_eq!(outcome.output, input);
    assert!(matches!(
        outcome.error,
        Some(XmlFormatError::DepthLimitExceeded { limit: 3, .. })
    ));

    assert!(try_format_xml(input, &options).is_err());
    assert!(try_format_xml("<a><b><c/></b></a>", &options).is_ok());
}

#[test]
fn test_tab_indentation() {
    let options = XmlFormatOptions {
        indent: Indent::Tabs,
        ..Default::default()
    };
    let formatted = try_format_xml("<a><b><c/></b></a>", &options).unwrap();
    assert_eq!(formatted, "<a>\n\t<b>\n\t\t<c/>\n\t</b>\n</a>\n");
}

#[test]
fn test_concurrent_callers() {
    let handles: Vec<_> = SAMPLES
        .iter()
        .map(|sample| {
            let sample = sample.to_string();
            std::thread::spawn(move || format_xml(&sample))
        })
        .collect();

    for (handle, sample) in handles.into_iter().zip(SAMPLES) {
        assert_eq!(handle.join().unwrap(), format_xml(sample));
    }
}
