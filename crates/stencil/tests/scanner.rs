//! Integration tests for the template scanner.

use stencil::parser::{scan, ScanError, Span};

// =============================================================================
// Literals and basic placeholders
// =============================================================================

#[test]
fn pure_literal() {
    let spans = scan("Hello, world!").unwrap();
    assert_eq!(spans, vec![Span::Literal("Hello, world!".into())]);
}

#[test]
fn empty_input() {
    let spans = scan("").unwrap();
    assert_eq!(spans, vec![]);
}

#[test]
fn single_placeholder() {
    let spans = scan("Hello {{ var.Name }}!").unwrap();
    assert_eq!(
        spans,
        vec![
            Span::Literal("Hello ".into()),
            Span::Placeholder {
                raw: " var.Name ".into(),
                offset: 6,
            },
            Span::Literal("!".into()),
        ]
    );
}

#[test]
fn placeholder_at_start_and_end() {
    let spans = scan("{{var.A}}-{{var.B}}").unwrap();
    assert_eq!(
        spans,
        vec![
            Span::Placeholder {
                raw: "var.A".into(),
                offset: 0,
            },
            Span::Literal("-".into()),
            Span::Placeholder {
                raw: "var.B".into(),
                offset: 10,
            },
        ]
    );
}

#[test]
fn raw_text_is_untrimmed() {
    let spans = scan("{{  var.X | trim  }}").unwrap();
    assert_eq!(
        spans,
        vec![Span::Placeholder {
            raw: "  var.X | trim  ".into(),
            offset: 0,
        }]
    );
}

#[test]
fn multiline_placeholder() {
    let spans = scan("{{ var.X\n | upper }}").unwrap();
    assert_eq!(
        spans,
        vec![Span::Placeholder {
            raw: " var.X\n | upper ".into(),
            offset: 0,
        }]
    );
}

// =============================================================================
// Escaped delimiters
// =============================================================================

#[test]
fn escaped_open_backslash_outside() {
    let spans = scan(r"literal \{{ not a placeholder").unwrap();
    assert_eq!(
        spans,
        vec![Span::Literal("literal {{ not a placeholder".into())]
    );
}

#[test]
fn escaped_open_backslash_inside() {
    let spans = scan(r"literal {\{ not a placeholder").unwrap();
    assert_eq!(
        spans,
        vec![Span::Literal("literal {{ not a placeholder".into())]
    );
}

#[test]
fn escaped_close_both_spellings() {
    assert_eq!(
        scan(r"a \}} b").unwrap(),
        vec![Span::Literal("a }} b".into())]
    );
    assert_eq!(
        scan(r"a }\} b").unwrap(),
        vec![Span::Literal("a }} b".into())]
    );
}

#[test]
fn escaped_closer_inside_placeholder_is_raw_text() {
    // The escaped closer does not terminate the placeholder; it contributes
    // a literal `}}` to the raw text.
    let spans = scan(r"{{ var.A \}} tail }}").unwrap();
    assert_eq!(
        spans,
        vec![Span::Placeholder {
            raw: " var.A }} tail ".into(),
            offset: 0,
        }]
    );
}

#[test]
fn lone_braces_are_literal() {
    let spans = scan("a { b } c").unwrap();
    assert_eq!(spans, vec![Span::Literal("a { b } c".into())]);
}

#[test]
fn backslash_without_delimiter_is_literal() {
    let spans = scan(r"C:\Users\a").unwrap();
    assert_eq!(spans, vec![Span::Literal(r"C:\Users\a".into())]);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn unclosed_placeholder() {
    let err = scan("text {{ var.Name").unwrap_err();
    let ScanError::Unclosed { offset } = err;
    assert_eq!(offset, 5);
}

#[test]
fn unclosed_reports_first_open() {
    let err = scan("{{ a }} {{ b").unwrap_err();
    let ScanError::Unclosed { offset } = err;
    assert_eq!(offset, 8);
}

#[test]
fn unclosed_error_message() {
    let err = scan("{{ var.X").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("unclosed placeholder"));
    assert!(msg.contains("offset 0"));
}
