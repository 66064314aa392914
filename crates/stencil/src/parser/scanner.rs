//! Escape-aware template scanner.
//!
//! Splits raw template text into literal spans and raw placeholder spans.
//! Handles:
//! - Placeholder delimiters `{{ ... }}` (one level, no nesting)
//! - Escaped delimiters in both accepted spellings: `\{{` and `{\{` for a
//!   literal `{{`, `\}}` and `}\}` for a literal `}}`
//! - Source offsets, retained for diagnostics

use std::mem;

use super::ast::Span;
use super::error::ScanError;

/// Scan a template into an ordered sequence of spans.
///
/// Placeholder spans keep their raw text untrimmed; whitespace
/// normalization is the parser's job. For a genuine `{{`, the scanner takes
/// everything up to the first non-escaped `}}`; an escaped closer inside a
/// placeholder contributes a literal `}}` to the raw text.
///
/// # Errors
///
/// Returns [`ScanError::Unclosed`] with the offset of the unmatched `{{`
/// when a placeholder is never closed.
pub fn scan(input: &str) -> Result<Vec<Span>, ScanError> {
    let mut spans = Vec::new();
    let mut literal = String::new();
    let mut pos = 0;

    while pos < input.len() {
        let rest = &input[pos..];

        if let Some(advance) = escaped_delimiter(rest, &mut literal) {
            pos += advance;
        } else if rest.starts_with("{{") {
            flush_literal(&mut spans, &mut literal);
            let offset = pos;
            let (raw, advance) = scan_placeholder(&input[pos + 2..])
                .ok_or(ScanError::Unclosed { offset })?;
            spans.push(Span::Placeholder { raw, offset });
            pos += 2 + advance;
        } else {
            // Safe: pos is always on a char boundary.
            let c = rest.chars().next().unwrap_or_default();
            literal.push(c);
            pos += c.len_utf8();
        }
    }

    flush_literal(&mut spans, &mut literal);
    Ok(spans)
}

/// Recognize an escaped delimiter at the start of `rest`.
///
/// Pushes the literal two-character delimiter and returns the number of
/// input bytes consumed, or `None` when `rest` does not start with an
/// escape spelling.
fn escaped_delimiter(rest: &str, literal: &mut String) -> Option<usize> {
    if rest.starts_with("\\{{") || rest.starts_with("{\\{") {
        literal.push_str("{{");
        Some(3)
    } else if rest.starts_with("\\}}") || rest.starts_with("}\\}") {
        literal.push_str("}}");
        Some(3)
    } else {
        None
    }
}

/// Scan the raw text of one placeholder, `rest` starting just after `{{`.
///
/// Returns the raw text and the number of bytes consumed including the
/// closing `}}`, or `None` if the placeholder is never closed.
fn scan_placeholder(rest: &str) -> Option<(String, usize)> {
    let mut raw = String::new();
    let mut pos = 0;

    while pos < rest.len() {
        let tail = &rest[pos..];
        if tail.starts_with("\\}}") || tail.starts_with("}\\}") {
            raw.push_str("}}");
            pos += 3;
        } else if tail.starts_with("}}") {
            return Some((raw, pos + 2));
        } else {
            let c = tail.chars().next().unwrap_or_default();
            raw.push(c);
            pos += c.len_utf8();
        }
    }

    None
}

/// Push any accumulated literal text as a span.
fn flush_literal(spans: &mut Vec<Span>, literal: &mut String) {
    if !literal.is_empty() {
        spans.push(Span::Literal(mem::take(literal)));
    }
}
