//! Tests for the XML entity and percent-encoding filters.

use stencil::{FilterContext, FilterError, FilterKind, TaggedValue};

fn apply(kind: FilterKind, input: &str) -> Result<TaggedValue, FilterError> {
    kind.apply(
        TaggedValue::Text(input.to_string()),
        &[],
        &FilterContext::default(),
    )
}

fn apply_text(kind: FilterKind, input: &str) -> String {
    match apply(kind, input).unwrap() {
        TaggedValue::Text(s) => s,
        TaggedValue::Binary(_) => panic!("expected text output"),
    }
}

// =============================================================================
// XML encoding
// =============================================================================

#[test]
fn xmlencode_escapes_the_five_entities() {
    assert_eq!(
        apply_text(FilterKind::XmlEncode, r#"<a href="x">&'</a>"#),
        "&lt;a href=&quot;x&quot;&gt;&amp;&apos;&lt;/a&gt;"
    );
}

#[test]
fn xmlencode_leaves_everything_else_alone() {
    assert_eq!(apply_text(FilterKind::XmlEncode, "plain café"), "plain café");
}

// =============================================================================
// XML decoding
// =============================================================================

#[test]
fn xmldecode_named_entities() {
    assert_eq!(
        apply_text(FilterKind::XmlDecode, "&lt;x&gt; &amp; &quot;y&quot; &apos;z&apos;"),
        "<x> & \"y\" 'z'"
    );
}

#[test]
fn xmldecode_numeric_references() {
    assert_eq!(apply_text(FilterKind::XmlDecode, "&#65;&#66;"), "AB");
    assert_eq!(apply_text(FilterKind::XmlDecode, "&#x41;"), "A");
    assert_eq!(apply_text(FilterKind::XmlDecode, "&#X41;"), "A");
}

#[test]
fn xmldecode_astral_reference() {
    assert_eq!(apply_text(FilterKind::XmlDecode, "&#x1F600;"), "\u{1F600}");
}

#[test]
fn xmldecode_surrogate_pair_references() {
    // An astral code point written as two surrogate references.
    assert_eq!(
        apply_text(FilterKind::XmlDecode, "&#xD83D;&#xDE00;"),
        "\u{1F600}"
    );
}

#[test]
fn xmldecode_unpaired_surrogate_is_an_error() {
    assert!(matches!(
        apply(FilterKind::XmlDecode, "&#xD83D;"),
        Err(FilterError::InvalidInput { .. })
    ));
    assert!(matches!(
        apply(FilterKind::XmlDecode, "&#xD83D;x"),
        Err(FilterError::InvalidInput { .. })
    ));
}

#[test]
fn xmldecode_unknown_entities_pass_through() {
    assert_eq!(apply_text(FilterKind::XmlDecode, "&nbsp;"), "&nbsp;");
    assert_eq!(apply_text(FilterKind::XmlDecode, "a & b"), "a & b");
    assert_eq!(apply_text(FilterKind::XmlDecode, "&;"), "&;");
}

#[test]
fn xmldecode_rejects_out_of_range_references() {
    assert!(matches!(
        apply(FilterKind::XmlDecode, "&#x110000;"),
        Err(FilterError::InvalidInput { .. })
    ));
}

#[test]
fn xml_round_trip_preserves_control_and_astral_text() {
    let original = "ctl:\u{1}\u{1f}\u{7f} astral:\u{1F600}\u{10FFFF} &<>\"' text";
    let encoded = apply_text(FilterKind::XmlEncode, original);
    assert_eq!(apply_text(FilterKind::XmlDecode, &encoded), original);
}

// =============================================================================
// Percent encoding
// =============================================================================

#[test]
fn urlencode_keeps_unreserved_characters() {
    assert_eq!(
        apply_text(FilterKind::UrlEncode, "AZaz09-_.~"),
        "AZaz09-_.~"
    );
}

#[test]
fn urlencode_escapes_everything_else() {
    assert_eq!(apply_text(FilterKind::UrlEncode, "a b/c"), "a%20b%2Fc");
    assert_eq!(apply_text(FilterKind::UrlEncode, "x=1&y=2"), "x%3D1%26y%3D2");
}

#[test]
fn urlencode_plus_has_no_special_meaning() {
    assert_eq!(apply_text(FilterKind::UrlEncode, "a+b"), "a%2Bb");
}

#[test]
fn urlencode_multibyte_utf8() {
    assert_eq!(apply_text(FilterKind::UrlEncode, "é"), "%C3%A9");
}

#[test]
fn urldecode_reverses_encoding() {
    assert_eq!(apply_text(FilterKind::UrlDecode, "a%20b%2Fc"), "a b/c");
    assert_eq!(apply_text(FilterKind::UrlDecode, "%C3%A9"), "é");
}

#[test]
fn urldecode_leaves_plus_alone() {
    assert_eq!(apply_text(FilterKind::UrlDecode, "a+b"), "a+b");
}

#[test]
fn urldecode_accepts_lowercase_hex() {
    assert_eq!(apply_text(FilterKind::UrlDecode, "%c3%a9"), "é");
}

#[test]
fn urldecode_rejects_malformed_escapes() {
    assert!(matches!(
        apply(FilterKind::UrlDecode, "100%"),
        Err(FilterError::InvalidInput { .. })
    ));
    assert!(matches!(
        apply(FilterKind::UrlDecode, "%2"),
        Err(FilterError::InvalidInput { .. })
    ));
    assert!(matches!(
        apply(FilterKind::UrlDecode, "%zz"),
        Err(FilterError::InvalidInput { .. })
    ));
}

#[test]
fn url_round_trip_preserves_control_and_astral_text() {
    let original = "ctl:\u{1}\u{1f}\u{7f} astral:\u{1F600}\u{10FFFF} text";
    let encoded = apply_text(FilterKind::UrlEncode, original);
    assert_eq!(apply_text(FilterKind::UrlDecode, &encoded), original);
}

#[test]
fn urldecode_rejects_non_utf8_results() {
    assert!(matches!(
        apply(FilterKind::UrlDecode, "%FF"),
        Err(FilterError::InvalidInput { .. })
    ));
}
