//! Byte-oriented codec filters: base64, hex, gzip, charset finalization.
//!
//! Text fed to a byte codec is taken as its UTF-16LE code-unit bytes, the
//! native string representation of the configuration scripts this engine
//! targets. Decoders produce `Binary`; an optional charset argument (or a
//! later `utf8`/`utf16` filter) finalizes the bytes back to `Text`.

use std::fmt::Write as _;
use std::io::{Read, Write};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use super::FilterError;
use crate::types::TaggedValue;

/// UTF-16LE code-unit bytes of a string.
pub fn utf16le_bytes(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

/// Decode UTF-16LE bytes to text.
pub fn utf16le_to_text(bytes: &[u8]) -> Result<String, FilterError> {
    utf16_to_text(bytes, u16::from_le_bytes)
}

fn utf16_to_text(bytes: &[u8], combine: fn([u8; 2]) -> u16) -> Result<String, FilterError> {
    if bytes.len() % 2 != 0 {
        return Err(FilterError::InvalidInput {
            message: format!("UTF-16 data has odd length ({} bytes)", bytes.len()),
        });
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| combine([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|_| FilterError::InvalidInput {
        message: "UTF-16 data contains an unpaired surrogate".to_string(),
    })
}

/// The byte representation of a value: binary as-is, text as UTF-16LE.
fn value_bytes(value: &TaggedValue) -> Vec<u8> {
    match value {
        TaggedValue::Text(s) => utf16le_bytes(s),
        TaggedValue::Binary(b) => b.clone(),
    }
}

/// Base64-encode a value.
pub fn base64_encode(value: &TaggedValue) -> String {
    STANDARD.encode(value_bytes(value))
}

/// Decode a base64 string to bytes.
pub fn base64_decode(input: &str) -> Result<Vec<u8>, FilterError> {
    STANDARD
        .decode(input.trim())
        .map_err(|e| FilterError::InvalidInput {
            message: format!("invalid base64: {e}"),
        })
}

/// Lowercase-hex-encode a value.
pub fn hex_encode(value: &TaggedValue) -> String {
    let bytes = value_bytes(value);
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        // Infallible for String.
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Decode a hex string (either case) to bytes.
pub fn hex_decode(input: &str) -> Result<Vec<u8>, FilterError> {
    let trimmed = input.trim();
    if trimmed.len() % 2 != 0 {
        return Err(FilterError::InvalidInput {
            message: format!("hex data has odd length ({} digits)", trimmed.len()),
        });
    }
    trimmed
        .as_bytes()
        .chunks_exact(2)
        .map(|pair| {
            let hi = hex_digit(pair[0])?;
            let lo = hex_digit(pair[1])?;
            Ok(hi * 16 + lo)
        })
        .collect()
}

fn hex_digit(b: u8) -> Result<u8, FilterError> {
    match b {
        b'0'..=b'9' => Ok(b - b'0'),
        b'a'..=b'f' => Ok(b - b'a' + 10),
        b'A'..=b'F' => Ok(b - b'A' + 10),
        other => Err(FilterError::InvalidInput {
            message: format!("invalid hex digit '{}'", char::from(other)),
        }),
    }
}

/// Gzip-compress a value.
pub fn gzip(value: &TaggedValue) -> Result<Vec<u8>, FilterError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&value_bytes(value))
        .and_then(|()| encoder.finish())
        .map_err(|e| FilterError::InvalidInput {
            message: format!("gzip failed: {e}"),
        })
}

/// Gzip-decompress a value.
pub fn gunzip(value: &TaggedValue) -> Result<Vec<u8>, FilterError> {
    let bytes = value_bytes(value);
    let mut decoder = GzDecoder::new(bytes.as_slice());
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| FilterError::InvalidInput {
            message: format!("gunzip failed: {e}"),
        })?;
    Ok(out)
}

/// Finalize decoded bytes: no charset keeps them `Binary`, a charset
/// argument decodes them to `Text`.
pub fn finalize(bytes: Vec<u8>, charset: Option<&String>) -> Result<TaggedValue, FilterError> {
    match charset {
        None => Ok(TaggedValue::Binary(bytes)),
        Some(name) => decode_charset(&bytes, name).map(TaggedValue::Text),
    }
}

/// Decode bytes in a named charset.
fn decode_charset(bytes: &[u8], charset: &str) -> Result<String, FilterError> {
    match charset.to_ascii_lowercase().as_str() {
        "utf8" | "utf-8" => String::from_utf8(bytes.to_vec()).map_err(|_| {
            FilterError::InvalidInput {
                message: "data is not valid UTF-8".to_string(),
            }
        }),
        "utf16" | "utf-16" | "utf16le" | "utf-16le" | "unicode" => utf16le_to_text(bytes),
        "utf16be" | "utf-16be" => utf16_to_text(bytes, u16::from_be_bytes),
        "ascii" => {
            if bytes.iter().all(u8::is_ascii) {
                Ok(bytes.iter().map(|&b| char::from(b)).collect())
            } else {
                Err(FilterError::InvalidInput {
                    message: "data is not valid ASCII".to_string(),
                })
            }
        }
        other => Err(FilterError::InvalidArgument {
            message: format!("unknown charset '{other}'"),
        }),
    }
}

/// `utf16`: finalize binary to text, or re-encode text to UTF-16LE bytes.
pub fn recode_utf16le(value: TaggedValue) -> Result<TaggedValue, FilterError> {
    match value {
        TaggedValue::Binary(b) => utf16le_to_text(&b).map(TaggedValue::Text),
        TaggedValue::Text(s) => Ok(TaggedValue::Binary(utf16le_bytes(&s))),
    }
}

/// `utf8`: finalize binary to text, or re-encode text to UTF-8 bytes.
pub fn recode_utf8(value: TaggedValue) -> Result<TaggedValue, FilterError> {
    match value {
        TaggedValue::Binary(b) => {
            String::from_utf8(b).map(TaggedValue::Text).map_err(|_| {
                FilterError::InvalidInput {
                    message: "data is not valid UTF-8".to_string(),
                }
            })
        }
        TaggedValue::Text(s) => Ok(TaggedValue::Binary(s.into_bytes())),
    }
}

/// Encode a registry expandable-string value: `hex(2):` followed by the
/// comma-separated bytes of the null-terminated UTF-16LE string.
pub fn expand_sz(s: &str) -> String {
    let mut bytes = utf16le_bytes(s);
    bytes.extend_from_slice(&[0, 0]);
    let list: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("hex(2):{}", list.join(","))
}
