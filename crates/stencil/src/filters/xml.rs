//! XML entity filters (`xmlencode` / `xmldecode`).
//!
//! Encoding covers the five predefined entities. Decoding additionally
//! handles decimal and hex numeric character references, reconstructing
//! astral code points written as a surrogate pair of two references.
//! Unrecognized entities and lone `&` pass through verbatim.

use super::FilterError;

/// Escape `& < > " '` as XML entities.
pub fn encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Decode XML entities and numeric character references.
pub fn decode(s: &str) -> Result<String, FilterError> {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let Some((value, consumed)) = reference(rest) else {
            // Not a recognizable reference; keep the '&' literally.
            out.push('&');
            rest = &rest[1..];
            continue;
        };

        if (0xd800..0xdc00).contains(&value) {
            // High surrogate: the low half must follow as its own reference.
            let tail = &rest[consumed..];
            let low = reference(tail).filter(|(v, _)| (0xdc00..0xe000).contains(v));
            let Some((low_value, low_consumed)) = low else {
                return Err(FilterError::InvalidInput {
                    message: format!("unpaired surrogate reference &#x{value:X};"),
                });
            };
            let combined = 0x10000 + ((value - 0xd800) << 10) + (low_value - 0xdc00);
            // Combined surrogate pairs always form a valid code point.
            if let Some(c) = char::from_u32(combined) {
                out.push(c);
            }
            rest = &tail[low_consumed..];
        } else {
            let Some(c) = char::from_u32(value) else {
                return Err(FilterError::InvalidInput {
                    message: format!("invalid character reference &#x{value:X};"),
                });
            };
            out.push(c);
            rest = &rest[consumed..];
        }
    }

    out.push_str(rest);
    Ok(out)
}

/// Parse one reference at the start of `s` (which begins with `&`).
///
/// Returns the referenced scalar value (possibly a lone surrogate, which
/// the caller pairs up) and the byte length consumed, or `None` when the
/// text after `&` is not a recognizable reference.
fn reference(s: &str) -> Option<(u32, usize)> {
    let semicolon = s.find(';')?;
    let body = &s[1..semicolon];
    let consumed = semicolon + 1;

    let value = match body {
        "amp" => u32::from('&'),
        "lt" => u32::from('<'),
        "gt" => u32::from('>'),
        "quot" => u32::from('"'),
        "apos" => u32::from('\''),
        _ => {
            let digits = body.strip_prefix('#')?;
            if let Some(hex) = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                digits.parse().ok()?
            }
        }
    };
    Some((value, consumed))
}
