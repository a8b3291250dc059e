use assert_matches::assert_matches;
use xrs_xmltest::{assert_xml_eq, Error, ErrorKind, Normalizer, NormalizerConfig};

fn equal(normalizer: Normalizer, a: &str, b: &str) -> bool {
    normalizer.equal_xml(a.as_bytes(), b.as_bytes()).unwrap()
}

#[test]
fn identity() {
    assert!(equal(Normalizer::default(), "<root/>", "<root/>"));
}

#[test]
fn different_elements() {
    assert!(!equal(Normalizer::default(), "<root/>", "<foo/>"));
}

#[test]
fn prefix_invariance() {
    assert!(equal(
        Normalizer::default(),
        r#"<root xmlns="space"/>"#,
        r#"<s:root xmlns:s="space"></s:root>"#
    ));
    assert!(equal(
        Normalizer::default(),
        r#"<a:root xmlns:a="urn:one" xmlns:b="urn:two"><b:x b:y="1"/></a:root>"#,
        r#"<root xmlns="urn:one"><x xmlns="urn:two" xmlns:p="urn:two" p:y="1"/></root>"#
    ));
}

#[test]
fn namespace_uri_matters() {
    assert!(!equal(
        Normalizer::default(),
        r#"<s:root xmlns:s="space"/>"#,
        r#"<s:root xmlns:s="other"/>"#
    ));
    assert!(!equal(
        Normalizer::default(),
        r#"<root xmlns="space"/>"#,
        "<root/>"
    ));
}

#[test]
fn attribute_order_invariance() {
    assert!(equal(
        Normalizer::default(),
        r#"<root a="1" b="2" xmlns:p="p" p:c="3"/>"#,
        r#"<root xmlns:q="p" q:c="3" b="2" a="1"/>"#
    ));
}

#[test]
fn attribute_values_matter() {
    assert!(!equal(
        Normalizer::default(),
        r#"<root a="1"/>"#,
        r#"<root a="2"/>"#
    ));
}

#[test]
fn unused_namespace_declaration() {
    assert!(equal(
        Normalizer::default(),
        r#"<root xmlns:i="ignored" a="foo"/>"#,
        r#"<root a="foo"/>"#
    ));
}

#[test]
fn directives_and_processing_instructions() {
    assert!(equal(Normalizer::default(), "<!DOCTYPE foo><root/>", "<root/>"));
    assert!(equal(
        Normalizer::default(),
        r#"<?xml version="1.0" encoding="UTF-8"?><root><?foo bar?></root>"#,
        "<root></root>"
    ));
}

#[test]
fn whitespace_policy() {
    let a = "<root>\n  <foo> x </foo>\n</root>";
    let b = "<root><foo> x </foo></root>";
    assert!(!equal(Normalizer::default(), a, b));
    assert!(equal(
        Normalizer::new(NormalizerConfig::default().with_omit_whitespace(true)),
        a,
        b
    ));
    assert!(!equal(
        Normalizer::new(NormalizerConfig::default().with_omit_whitespace(true)),
        "<root><foo> x </foo></root>",
        "<root><foo>x</foo></root>"
    ));
}

#[test]
fn comment_policy() {
    let a = "<root><!-- note --></root>";
    let b = "<root/>";
    assert!(!equal(Normalizer::default(), a, b));
    assert!(equal(
        Normalizer::new(NormalizerConfig::default().with_omit_comments(true)),
        a,
        b
    ));
}

#[test]
fn line_ending_invariance() {
    assert!(equal(Normalizer::default(), "<r>a\r\nb</r>", "<r>a\nb</r>"));
    assert!(equal(
        Normalizer::default(),
        "<r a=\"1\r2\"/>",
        "<r a=\"1\n2\"/>"
    ));
    assert!(!equal(Normalizer::default(), "<r>a&#13;b</r>", "<r>a\nb</r>"));
}

#[test]
fn syntax_error_in_first() {
    assert_matches!(
        Normalizer::default().equal_xml("<root></foo>".as_bytes(), "<root/>".as_bytes()),
        Err(Error::Syntax(_))
    );
}

#[test]
fn syntax_error_in_second() {
    assert_matches!(
        Normalizer::default().equal_str("<root/>", "<root></foo>"),
        Err(err) if err.kind() == ErrorKind::Syntax
    );
}

#[test]
fn assert_macro() {
    assert_xml_eq!(
        r#"<p:root xmlns:p="urn:x" b="2" a="1"/>"#,
        r#"<root xmlns="urn:x" a="1" b="2"></root>"#
    );
    assert_xml_eq!(
        Normalizer::new(NormalizerConfig::default().with_omit_comments(true)),
        "<root><!-- a --></root>",
        "<root/>",
    );
}

#[test]
#[should_panic(expected = "normalized XML differs")]
fn assert_macro_panics_on_difference() {
    assert_xml_eq!("<root/>", "<foo/>");
}

#[test]
#[should_panic(expected = "right XML can not be normalized")]
fn assert_macro_panics_on_error() {
    assert_xml_eq!("<root/>", "<root>");
}
