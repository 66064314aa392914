//! Placeholder grammar parser.
//!
//! Parses one placeholder's raw text (the content between `{{` and `}}`)
//! into a [`Placeholder`] AST:
//!
//! ```text
//! placeholder := head ('|' filter)*
//! head        := ('var' | 'env') '.' identifier
//! filter      := filterName (':' arg)*
//! arg         := quotedArg | unquotedArg
//! ```
//!
//! The `var`/`env` keywords are case-sensitive; filter names are matched
//! case-insensitively later, at registry lookup. Whitespace around `|`,
//! around `:`, and around the head is insignificant.

use winnow::prelude::*;
use winnow::token::take_while;

use super::ast::{FilterInvocation, Namespace, Placeholder};
use super::error::ParseError;

/// Parse one placeholder's raw text into an AST.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying the offending raw segment when the
/// head is malformed, a filter name or argument is missing, a quoted
/// argument is unterminated, or unconsumed characters remain.
pub fn parse_placeholder(raw: &str) -> Result<Placeholder, ParseError> {
    let mut input = raw;
    skip_ws(&mut input);

    let namespace = if let Some(rest) = input.strip_prefix("var.") {
        input = rest;
        Namespace::Var
    } else if let Some(rest) = input.strip_prefix("env.") {
        input = rest;
        Namespace::Env
    } else {
        return Err(ParseError::InvalidHead { segment: segment(raw) });
    };

    let Ok(name) = identifier(&mut input) else {
        return Err(ParseError::InvalidHead { segment: segment(raw) });
    };
    let name = name.to_string();

    let mut pipeline = Vec::new();
    loop {
        skip_ws(&mut input);
        if input.is_empty() {
            break;
        }
        if let Some(rest) = input.strip_prefix('|') {
            input = rest;
        } else {
            return Err(ParseError::Trailing {
                segment: segment(raw),
                trailing: input.to_string(),
            });
        }
        pipeline.push(filter_segment(&mut input, raw)?);
    }

    Ok(Placeholder {
        namespace,
        name,
        pipeline,
    })
}

/// Parse one filter segment: name plus `':' arg` repetitions.
fn filter_segment(input: &mut &str, raw: &str) -> Result<FilterInvocation, ParseError> {
    skip_ws(input);
    let Ok(name) = identifier(input) else {
        return Err(ParseError::MissingFilterName { segment: segment(raw) });
    };
    let name = name.to_string();

    let mut args = Vec::new();
    loop {
        let checkpoint = *input;
        skip_ws(input);
        if let Some(rest) = input.strip_prefix(':') {
            *input = rest;
            skip_ws(input);
            args.push(argument(input, raw)?);
        } else {
            *input = checkpoint;
            break;
        }
    }

    Ok(FilterInvocation { name, args })
}

/// Parse a quoted or unquoted argument.
fn argument(input: &mut &str, raw: &str) -> Result<String, ParseError> {
    if input.starts_with('"') {
        quoted_argument(input, raw)
    } else {
        match unquoted_argument(input) {
            Ok(s) => Ok(s.to_string()),
            Err(_) => Err(ParseError::MissingArgument { segment: segment(raw) }),
        }
    }
}

/// Parse a `"`-delimited argument, `input` positioned on the opening quote.
///
/// Only two escape sequences are active inside: `\"` and `\\`. Any other
/// backslash sequence is preserved literally. Newlines are permitted
/// verbatim.
fn quoted_argument(input: &mut &str, raw: &str) -> Result<String, ParseError> {
    let body = &input[1..];
    let mut out = String::new();
    let mut chars = body.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => {
                *input = &body[i + 1..];
                return Ok(out);
            }
            '\\' => match body[i + 1..].chars().next() {
                Some(escaped @ ('"' | '\\')) => {
                    out.push(escaped);
                    chars.next();
                }
                _ => out.push('\\'),
            },
            other => out.push(other),
        }
    }

    Err(ParseError::UnterminatedArgument { segment: segment(raw) })
}

/// Parse an unquoted argument: the longest run of characters containing no
/// whitespace and none of `:`, `|`, `}`.
fn unquoted_argument<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| {
        !c.is_whitespace() && !matches!(c, ':' | '|' | '}')
    })
    .parse_next(input)
}

/// Parse an identifier (alphanumeric with underscores).
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

/// Skip insignificant whitespace, newlines included.
fn skip_ws(input: &mut &str) {
    *input = input.trim_start();
}

/// The trimmed raw segment, for error reporting.
fn segment(raw: &str) -> String {
    raw.trim().to_string()
}
