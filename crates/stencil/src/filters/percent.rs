//! Percent-encoding filters (`urlencode` / `urldecode`).
//!
//! Data-escaping per RFC 3986: everything outside the unreserved set is
//! encoded as the `%XX` bytes of its UTF-8 form. `+` has no special
//! meaning in either direction.

use super::FilterError;

/// Percent-encode a string.
pub fn encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        if is_unreserved(byte) {
            out.push(char::from(byte));
        } else {
            out.push('%');
            out.push(to_hex_upper(byte >> 4));
            out.push(to_hex_upper(byte & 0x0f));
        }
    }
    out
}

/// Decode a percent-encoded string.
pub fn decode(s: &str) -> Result<String, FilterError> {
    let input = s.as_bytes();
    let mut bytes = Vec::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        if input[pos] == b'%' {
            let (hi, lo) = match (input.get(pos + 1), input.get(pos + 2)) {
                (Some(&hi), Some(&lo)) => (from_hex(hi), from_hex(lo)),
                _ => (None, None),
            };
            match (hi, lo) {
                (Some(hi), Some(lo)) => {
                    bytes.push(hi * 16 + lo);
                    pos += 3;
                }
                _ => {
                    return Err(FilterError::InvalidInput {
                        message: format!("malformed percent escape at byte {pos}"),
                    });
                }
            }
        } else {
            bytes.push(input[pos]);
            pos += 1;
        }
    }

    String::from_utf8(bytes).map_err(|_| FilterError::InvalidInput {
        message: "percent-decoded data is not valid UTF-8".to_string(),
    })
}

/// RFC 3986 unreserved characters.
fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~')
}

fn to_hex_upper(nibble: u8) -> char {
    char::from(if nibble < 10 {
        b'0' + nibble
    } else {
        b'A' + nibble - 10
    })
}

fn from_hex(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
