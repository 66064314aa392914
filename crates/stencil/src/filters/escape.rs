//! Language-escape filters driven by one parameterized dialect table.
//!
//! The C, Java, and C# codecs differ only in their short-escape set, the
//! numeric token they emit, and how they spell astral code points. One
//! table per dialect describes those choices; `escape` and `unescape`
//! interpret the table. Unknown escape sequences pass through unchanged in
//! every dialect.

use super::FilterError;

/// Numeric token emitted for characters without a short escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericForm {
    /// `\xHH` (C).
    HexByte,
    /// `\uXXXX` (Java, C#).
    UnicodeShort,
}

/// How astral (non-BMP) code points are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AstralForm {
    /// Left unescaped (C).
    Verbatim,
    /// Two `\uXXXX` tokens forming a surrogate pair (Java).
    SurrogatePair,
    /// One `\UXXXXXXXX` token (C#).
    LongU,
}

/// Accepted length of a `\x` escape on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HexLen {
    /// Exactly two digits (C's `\xHH`).
    Exact2,
    /// One to four digits (C#).
    UpTo4,
}

/// One language dialect's escaping rules.
pub struct EscapeDialect {
    /// `(raw character, escape letter)` pairs, both directions.
    short: &'static [(char, char)],
    /// Whether characters above ASCII are escaped numerically.
    escape_non_ascii: bool,
    numeric: NumericForm,
    astral: AstralForm,
    /// Decode `\0`..`\377` octal escapes.
    decode_octal: bool,
    /// Decode `\x` escapes, and with what digit count.
    decode_hex: Option<HexLen>,
    /// Decode `\uXXXX` (including surrogate pairs).
    decode_unicode: bool,
    /// Decode `\UXXXXXXXX`.
    decode_long_u: bool,
}

pub const C: EscapeDialect = EscapeDialect {
    short: &[
        ('\\', '\\'),
        ('\'', '\''),
        ('"', '"'),
        ('\u{07}', 'a'),
        ('\u{08}', 'b'),
        ('\u{0c}', 'f'),
        ('\n', 'n'),
        ('\r', 'r'),
        ('\t', 't'),
        ('\u{0b}', 'v'),
    ],
    escape_non_ascii: false,
    numeric: NumericForm::HexByte,
    astral: AstralForm::Verbatim,
    decode_octal: true,
    decode_hex: Some(HexLen::Exact2),
    decode_unicode: false,
    decode_long_u: false,
};

pub const JAVA: EscapeDialect = EscapeDialect {
    short: &[
        ('\\', '\\'),
        ('\'', '\''),
        ('"', '"'),
        ('\u{08}', 'b'),
        ('\t', 't'),
        ('\n', 'n'),
        ('\u{0c}', 'f'),
        ('\r', 'r'),
    ],
    escape_non_ascii: true,
    numeric: NumericForm::UnicodeShort,
    astral: AstralForm::SurrogatePair,
    decode_octal: false,
    decode_hex: None,
    decode_unicode: true,
    decode_long_u: false,
};

pub const CSHARP: EscapeDialect = EscapeDialect {
    short: &[
        ('\\', '\\'),
        ('\'', '\''),
        ('"', '"'),
        ('\0', '0'),
        ('\u{07}', 'a'),
        ('\u{08}', 'b'),
        ('\u{0c}', 'f'),
        ('\n', 'n'),
        ('\r', 'r'),
        ('\t', 't'),
        ('\u{0b}', 'v'),
    ],
    escape_non_ascii: true,
    numeric: NumericForm::UnicodeShort,
    astral: AstralForm::LongU,
    decode_octal: false,
    decode_hex: Some(HexLen::UpTo4),
    decode_unicode: true,
    decode_long_u: true,
};

/// Escape a string per the dialect table.
pub fn escape(dialect: &EscapeDialect, s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if let Some(letter) = short_escape(dialect, c) {
            out.push('\\');
            out.push(letter);
        } else if needs_numeric(dialect, c) {
            push_numeric(dialect, &mut out, c);
        } else {
            out.push(c);
        }
    }
    out
}

fn short_escape(dialect: &EscapeDialect, c: char) -> Option<char> {
    dialect
        .short
        .iter()
        .find(|(raw, _)| *raw == c)
        .map(|(_, letter)| *letter)
}

fn needs_numeric(dialect: &EscapeDialect, c: char) -> bool {
    let v = u32::from(c);
    v < 0x20 || v == 0x7f || (dialect.escape_non_ascii && v > 0x7e)
}

fn push_numeric(dialect: &EscapeDialect, out: &mut String, c: char) {
    use std::fmt::Write as _;

    let v = u32::from(c);
    if v > 0xffff {
        match dialect.astral {
            // Verbatim dialects never ask for numerics above the BMP.
            AstralForm::Verbatim => out.push(c),
            AstralForm::SurrogatePair => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04X}");
                }
            }
            AstralForm::LongU => {
                let _ = write!(out, "\\U{v:08X}");
            }
        }
    } else {
        match dialect.numeric {
            NumericForm::HexByte => {
                let _ = write!(out, "\\x{v:02x}");
            }
            NumericForm::UnicodeShort => {
                let _ = write!(out, "\\u{v:04X}");
            }
        }
    }
}

/// Decode a string per the dialect table.
///
/// Unknown escapes (a backslash before anything the dialect does not
/// recognize) are preserved literally. Malformed numeric escapes and
/// unpairable surrogates are errors.
pub fn unescape(dialect: &EscapeDialect, s: &str) -> Result<String, FilterError> {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(idx) = rest.find('\\') {
        out.push_str(&rest[..idx]);
        rest = &rest[idx..];
        rest = decode_escape(dialect, rest, &mut out)?;
    }

    out.push_str(rest);
    Ok(out)
}

/// Decode one escape sequence at the start of `rest` (which begins with
/// `\`), returning the remaining input.
fn decode_escape<'a>(
    dialect: &EscapeDialect,
    rest: &'a str,
    out: &mut String,
) -> Result<&'a str, FilterError> {
    let after = &rest[1..];
    let Some(c) = after.chars().next() else {
        // Trailing backslash: passthrough.
        out.push('\\');
        return Ok(after);
    };

    if let Some(raw) = short_unescape(dialect, c) {
        out.push(raw);
        return Ok(&after[c.len_utf8()..]);
    }

    match c {
        'x' if dialect.decode_hex.is_some() => {
            let (value, consumed) = match dialect.decode_hex {
                Some(HexLen::Exact2) => parse_hex(&after[1..], 2, 2)?,
                _ => parse_hex(&after[1..], 1, 4)?,
            };
            out.push(char_from(value)?);
            Ok(&after[1 + consumed..])
        }
        'u' if dialect.decode_unicode => {
            let (value, consumed) = parse_hex(&after[1..], 4, 4)?;
            let tail = &after[1 + consumed..];
            if (0xd800..0xdc00).contains(&value) {
                // High surrogate: the low half must follow as another \u.
                let Some((low, low_consumed)) = low_surrogate(tail) else {
                    return Err(FilterError::InvalidInput {
                        message: format!("unpaired surrogate escape \\u{value:04X}"),
                    });
                };
                let combined = 0x10000 + ((value - 0xd800) << 10) + (low - 0xdc00);
                out.push(char_from(combined)?);
                Ok(&tail[low_consumed..])
            } else {
                out.push(char_from(value)?);
                Ok(tail)
            }
        }
        'U' if dialect.decode_long_u => {
            let (value, consumed) = parse_hex(&after[1..], 8, 8)?;
            out.push(char_from(value)?);
            Ok(&after[1 + consumed..])
        }
        '0'..='7' if dialect.decode_octal => {
            let (value, consumed) = parse_octal(after);
            out.push(char_from(value)?);
            Ok(&after[consumed..])
        }
        other => {
            // Unknown escape: passthrough.
            out.push('\\');
            out.push(other);
            Ok(&after[other.len_utf8()..])
        }
    }
}

fn short_unescape(dialect: &EscapeDialect, letter: char) -> Option<char> {
    dialect
        .short
        .iter()
        .find(|(_, l)| *l == letter)
        .map(|(raw, _)| *raw)
}

/// Parse `min..=max` hex digits; returns the value and digits consumed.
fn parse_hex(s: &str, min: usize, max: usize) -> Result<(u32, usize), FilterError> {
    let mut value: u32 = 0;
    let mut consumed = 0;
    for c in s.chars().take(max) {
        let Some(digit) = c.to_digit(16) else { break };
        value = value * 16 + digit;
        consumed += 1;
    }
    if consumed < min {
        return Err(FilterError::InvalidInput {
            message: format!("malformed numeric escape: expected at least {min} hex digit(s)"),
        });
    }
    Ok((value, consumed))
}

/// Parse up to three octal digits with value at most 0o377.
fn parse_octal(s: &str) -> (u32, usize) {
    let mut value: u32 = 0;
    let mut consumed = 0;
    for c in s.chars().take(3) {
        let Some(digit) = c.to_digit(8) else { break };
        let next = value * 8 + digit;
        if next > 0o377 {
            break;
        }
        value = next;
        consumed += 1;
    }
    (value, consumed)
}

/// Parse a `\uXXXX` low surrogate at the start of `s`.
fn low_surrogate(s: &str) -> Option<(u32, usize)> {
    let digits = s.strip_prefix("\\u")?;
    let (value, consumed) = parse_hex(digits, 4, 4).ok()?;
    if (0xdc00..0xe000).contains(&value) {
        Some((value, 2 + consumed))
    } else {
        None
    }
}

fn char_from(value: u32) -> Result<char, FilterError> {
    char::from_u32(value).ok_or_else(|| FilterError::InvalidInput {
        message: format!("escape denotes invalid code point U+{value:X}"),
    })
}
