//! Filter registry and dispatch.
//!
//! Filters are pure, deterministic transforms applied left-to-right to a
//! placeholder's resolved value. Each filter declares its arity and the
//! value kinds it accepts; both are checked before the filter body runs.
//! The registry is an immutable name-to-kind mapping with case-insensitive
//! lookup, so every filter can be enumerated and tested in isolation.

mod codec;
mod escape;
mod path;
mod percent;
mod text;
mod xml;

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{TaggedValue, ValueKind};

/// An error raised by a single filter application.
#[derive(Debug, Error)]
pub enum FilterError {
    /// No filter with this name exists.
    #[error("unknown filter '{name}'{}", suggestion_suffix(suggestions))]
    Unknown {
        name: String,
        suggestions: Vec<String>,
    },

    /// The argument count does not match the filter's declared arity.
    #[error("expected {expected} argument(s), got {got}")]
    ArgumentCount { expected: &'static str, got: usize },

    /// An argument failed validation.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The filter was fed a value kind it does not accept.
    #[error("expects {expected} input, got {got}")]
    KindMismatch {
        expected: &'static str,
        got: ValueKind,
    },

    /// The input value failed to decode or decompress.
    #[error("{message}")]
    InvalidInput { message: String },
}

/// Render `(did you mean ...?)` for unknown-filter errors.
fn suggestion_suffix(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}

/// Ambient inputs available to filters.
///
/// Filters themselves perform no I/O; anything environmental they need is
/// snapshotted here by the caller. Currently that is only the working
/// directory the `pathwinabs`/`pathlinuxabs`/`pathosabs` filters resolve
/// relative paths against.
#[derive(Debug, Clone)]
pub struct FilterContext {
    pub working_dir: PathBuf,
}

impl Default for FilterContext {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
        }
    }
}

/// Every filter in the catalog.
///
/// One variant per filter name (aliases excluded). `lookup` matches names
/// case-insensitively; [`FilterKind::ALL`] enables static enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Trim,
    Upper,
    Lower,
    Quote,
    PathQuote,
    Append,
    Prepend,
    Replace,
    Default,
    RegQuote,
    RegEscape,
    PathAppend,
    AddArg,
    PathWin,
    PathLinux,
    PathOs,
    PathWinAbs,
    PathLinuxAbs,
    PathOsAbs,
    Base64,
    FromBase64,
    StrFromBase64,
    Hex,
    FromHex,
    StrFromHex,
    Gzip,
    Gunzip,
    UrlEncode,
    UrlDecode,
    XmlEncode,
    XmlDecode,
    EscC,
    FromEscC,
    EscJava,
    FromEscJava,
    EscCs,
    FromEscCs,
    Utf16,
    Utf8,
    Bytes,
    ExpandSz,
}

impl FilterKind {
    /// All filters, in catalog order.
    pub const ALL: &'static [FilterKind] = &[
        FilterKind::Trim,
        FilterKind::Upper,
        FilterKind::Lower,
        FilterKind::Quote,
        FilterKind::PathQuote,
        FilterKind::Append,
        FilterKind::Prepend,
        FilterKind::Replace,
        FilterKind::Default,
        FilterKind::RegQuote,
        FilterKind::RegEscape,
        FilterKind::PathAppend,
        FilterKind::AddArg,
        FilterKind::PathWin,
        FilterKind::PathLinux,
        FilterKind::PathOs,
        FilterKind::PathWinAbs,
        FilterKind::PathLinuxAbs,
        FilterKind::PathOsAbs,
        FilterKind::Base64,
        FilterKind::FromBase64,
        FilterKind::StrFromBase64,
        FilterKind::Hex,
        FilterKind::FromHex,
        FilterKind::StrFromHex,
        FilterKind::Gzip,
        FilterKind::Gunzip,
        FilterKind::UrlEncode,
        FilterKind::UrlDecode,
        FilterKind::XmlEncode,
        FilterKind::XmlDecode,
        FilterKind::EscC,
        FilterKind::FromEscC,
        FilterKind::EscJava,
        FilterKind::FromEscJava,
        FilterKind::EscCs,
        FilterKind::FromEscCs,
        FilterKind::Utf16,
        FilterKind::Utf8,
        FilterKind::Bytes,
        FilterKind::ExpandSz,
    ];

    /// Look up a filter by name, case-insensitively.
    pub fn lookup(name: &str) -> Option<FilterKind> {
        let lowered = name.to_ascii_lowercase();
        FilterKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == lowered)
    }

    /// The filter's canonical (lowercase) name.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Trim => "trim",
            FilterKind::Upper => "upper",
            FilterKind::Lower => "lower",
            FilterKind::Quote => "quote",
            FilterKind::PathQuote => "pathquote",
            FilterKind::Append => "append",
            FilterKind::Prepend => "prepend",
            FilterKind::Replace => "replace",
            FilterKind::Default => "default",
            FilterKind::RegQuote => "regq",
            FilterKind::RegEscape => "regesc",
            FilterKind::PathAppend => "pathappend",
            FilterKind::AddArg => "addarg",
            FilterKind::PathWin => "pathwin",
            FilterKind::PathLinux => "pathlinux",
            FilterKind::PathOs => "pathos",
            FilterKind::PathWinAbs => "pathwinabs",
            FilterKind::PathLinuxAbs => "pathlinuxabs",
            FilterKind::PathOsAbs => "pathosabs",
            FilterKind::Base64 => "base64",
            FilterKind::FromBase64 => "frombase64",
            FilterKind::StrFromBase64 => "strfrombase64",
            FilterKind::Hex => "hex",
            FilterKind::FromHex => "fromhex",
            FilterKind::StrFromHex => "strfromhex",
            FilterKind::Gzip => "gzip",
            FilterKind::Gunzip => "gunzip",
            FilterKind::UrlEncode => "urlencode",
            FilterKind::UrlDecode => "urldecode",
            FilterKind::XmlEncode => "xmlencode",
            FilterKind::XmlDecode => "xmldecode",
            FilterKind::EscC => "escc",
            FilterKind::FromEscC => "fromescc",
            FilterKind::EscJava => "escjava",
            FilterKind::FromEscJava => "fromescjava",
            FilterKind::EscCs => "esccs",
            FilterKind::FromEscCs => "fromesccs",
            FilterKind::Utf16 => "utf16",
            FilterKind::Utf8 => "utf8",
            FilterKind::Bytes => "bytes",
            FilterKind::ExpandSz => "expandsz",
        }
    }

    /// Usage signature for catalog listings.
    pub fn signature(self) -> &'static str {
        match self {
            FilterKind::Append => "append:\"s\"",
            FilterKind::Prepend => "prepend:\"s\"",
            FilterKind::Replace => "replace:\"old\":\"new\"",
            FilterKind::Default => "default:\"fallback\"",
            FilterKind::PathAppend => "pathappend:\"s\"",
            FilterKind::AddArg => "addarg:\"s\"",
            FilterKind::FromBase64 => "frombase64[:charset]",
            FilterKind::FromHex => "fromhex[:charset]",
            FilterKind::Gunzip => "gunzip[:charset]",
            other => other.name(),
        }
    }

    /// One-line description for catalog listings.
    pub fn summary(self) -> &'static str {
        match self {
            FilterKind::Trim => "strip leading and trailing whitespace",
            FilterKind::Upper => "uppercase",
            FilterKind::Lower => "lowercase",
            FilterKind::Quote => "wrap in double quotes",
            FilterKind::PathQuote => "wrap in double quotes unless already quoted",
            FilterKind::Append => "append literal text",
            FilterKind::Prepend => "prepend literal text",
            FilterKind::Replace => "literal (non-pattern) replace-all",
            FilterKind::Default => "fallback when the value is empty or whitespace-only",
            FilterKind::RegQuote => "escape double quotes for registry-script value strings",
            FilterKind::RegEscape => "escape backslashes and double quotes for registry scripts",
            FilterKind::PathAppend => "append a path fragment verbatim",
            FilterKind::AddArg => "append a quoted command-line argument",
            FilterKind::PathWin => "normalize as a Windows path",
            FilterKind::PathLinux => "normalize as a Linux path (drive letters become /c/ mounts)",
            FilterKind::PathOs => "normalize for the host OS",
            FilterKind::PathWinAbs => "absolute Windows path against the working directory",
            FilterKind::PathLinuxAbs => "absolute Linux path against the working directory",
            FilterKind::PathOsAbs => "absolute host-OS path against the working directory",
            FilterKind::Base64 => "base64 of the value (text is taken as UTF-16LE bytes)",
            FilterKind::FromBase64 => "decode base64 to bytes, optionally finalized to text",
            FilterKind::StrFromBase64 => "decode base64 to UTF-16 text",
            FilterKind::Hex => "lowercase hex of the value (text is taken as UTF-16LE bytes)",
            FilterKind::FromHex => "decode hex to bytes, optionally finalized to text",
            FilterKind::StrFromHex => "decode hex to UTF-16 text",
            FilterKind::Gzip => "gzip-compress the value",
            FilterKind::Gunzip => "gzip-decompress, optionally finalized to text",
            FilterKind::UrlEncode => "percent-encode (RFC 3986 unreserved set)",
            FilterKind::UrlDecode => "decode percent-encoding",
            FilterKind::XmlEncode => "escape & < > \" ' as XML entities",
            FilterKind::XmlDecode => "decode XML entities and character references",
            FilterKind::EscC => "C-style string escapes",
            FilterKind::FromEscC => "decode C-style escapes (octal and \\xHH included)",
            FilterKind::EscJava => "Java-style escapes, astral chars as \\u surrogate pairs",
            FilterKind::FromEscJava => "decode Java-style escapes",
            FilterKind::EscCs => "C#-style escapes, astral chars as \\UXXXXXXXX",
            FilterKind::FromEscCs => "decode C#-style escapes",
            FilterKind::Utf16 => "binary to text as UTF-16LE, or text to UTF-16LE bytes",
            FilterKind::Utf8 => "binary to text as UTF-8, or text to UTF-8 bytes",
            FilterKind::Bytes => "text to its UTF-16LE code-unit bytes",
            FilterKind::ExpandSz => "registry expandable-string value (hex(2) byte list)",
        }
    }

    /// Apply this filter to a value.
    ///
    /// Checks arity first, then the input-kind contract, then runs the
    /// filter body.
    pub fn apply(
        self,
        value: TaggedValue,
        args: &[String],
        ctx: &FilterContext,
    ) -> Result<TaggedValue, FilterError> {
        self.check_arity(args.len())?;
        match self {
            FilterKind::Trim => text_to_text(value, |s| s.trim().to_string()),
            FilterKind::Upper => text_to_text(value, |s| s.to_uppercase()),
            FilterKind::Lower => text_to_text(value, |s| s.to_lowercase()),
            FilterKind::Quote => text_to_text(value, text::quote),
            FilterKind::PathQuote => text_to_text(value, text::path_quote),
            FilterKind::Append => text_to_text(value, |s| text::append(&s, &args[0])),
            FilterKind::Prepend => text_to_text(value, |s| text::prepend(&s, &args[0])),
            FilterKind::Replace => {
                let input = expect_text(value)?;
                text::replace(&input, &args[0], &args[1]).map(TaggedValue::Text)
            }
            FilterKind::Default => {
                text_to_text(value, |s| text::default_if_blank(s, &args[0]))
            }
            FilterKind::RegQuote => text_to_text(value, |s| text::reg_quote(&s)),
            FilterKind::RegEscape => text_to_text(value, |s| text::reg_escape(&s)),
            FilterKind::PathAppend => text_to_text(value, |s| text::append(&s, &args[0])),
            FilterKind::AddArg => text_to_text(value, |s| text::add_arg(&s, &args[0])),
            FilterKind::PathWin
            | FilterKind::PathLinux
            | FilterKind::PathOs
            | FilterKind::PathWinAbs
            | FilterKind::PathLinuxAbs
            | FilterKind::PathOsAbs => {
                let input = expect_text(value)?;
                Ok(TaggedValue::Text(path::normalize(
                    &input,
                    path::style_for(self),
                    path::is_absolute_variant(self),
                    &ctx.working_dir,
                )))
            }
            FilterKind::Base64 => Ok(TaggedValue::Text(codec::base64_encode(&value))),
            FilterKind::FromBase64 => {
                let input = expect_text(value)?;
                codec::finalize(codec::base64_decode(&input)?, args.first())
            }
            FilterKind::StrFromBase64 => {
                let input = expect_text(value)?;
                codec::utf16le_to_text(&codec::base64_decode(&input)?).map(TaggedValue::Text)
            }
            FilterKind::Hex => Ok(TaggedValue::Text(codec::hex_encode(&value))),
            FilterKind::FromHex => {
                let input = expect_text(value)?;
                codec::finalize(codec::hex_decode(&input)?, args.first())
            }
            FilterKind::StrFromHex => {
                let input = expect_text(value)?;
                codec::utf16le_to_text(&codec::hex_decode(&input)?).map(TaggedValue::Text)
            }
            FilterKind::Gzip => codec::gzip(&value).map(TaggedValue::Binary),
            FilterKind::Gunzip => codec::finalize(codec::gunzip(&value)?, args.first()),
            FilterKind::UrlEncode => text_to_text(value, |s| percent::encode(&s)),
            FilterKind::UrlDecode => {
                let input = expect_text(value)?;
                percent::decode(&input).map(TaggedValue::Text)
            }
            FilterKind::XmlEncode => text_to_text(value, |s| xml::encode(&s)),
            FilterKind::XmlDecode => {
                let input = expect_text(value)?;
                xml::decode(&input).map(TaggedValue::Text)
            }
            FilterKind::EscC => text_to_text(value, |s| escape::escape(&escape::C, &s)),
            FilterKind::EscJava => text_to_text(value, |s| escape::escape(&escape::JAVA, &s)),
            FilterKind::EscCs => text_to_text(value, |s| escape::escape(&escape::CSHARP, &s)),
            FilterKind::FromEscC | FilterKind::FromEscJava | FilterKind::FromEscCs => {
                let dialect = match self {
                    FilterKind::FromEscC => &escape::C,
                    FilterKind::FromEscJava => &escape::JAVA,
                    _ => &escape::CSHARP,
                };
                let input = expect_text(value)?;
                escape::unescape(dialect, &input).map(TaggedValue::Text)
            }
            FilterKind::Utf16 => codec::recode_utf16le(value),
            FilterKind::Utf8 => codec::recode_utf8(value),
            FilterKind::Bytes => Ok(match value {
                TaggedValue::Text(s) => TaggedValue::Binary(codec::utf16le_bytes(&s)),
                binary @ TaggedValue::Binary(_) => binary,
            }),
            FilterKind::ExpandSz => text_to_text(value, |s| codec::expand_sz(&s)),
        }
    }

    /// Declared argument count: `(min, max)`.
    fn arity(self) -> (usize, usize) {
        match self {
            FilterKind::Append
            | FilterKind::Prepend
            | FilterKind::Default
            | FilterKind::PathAppend
            | FilterKind::AddArg => (1, 1),
            FilterKind::Replace => (2, 2),
            FilterKind::FromBase64 | FilterKind::FromHex | FilterKind::Gunzip => (0, 1),
            _ => (0, 0),
        }
    }

    fn check_arity(self, got: usize) -> Result<(), FilterError> {
        let (min, max) = self.arity();
        if got < min || got > max {
            let expected = match (min, max) {
                (0, 0) => "no",
                (1, 1) => "exactly 1",
                (2, 2) => "exactly 2",
                (0, 1) => "at most 1",
                _ => "a different number of",
            };
            return Err(FilterError::ArgumentCount { expected, got });
        }
        Ok(())
    }
}

/// Unwrap a text value or fail with a kind mismatch.
fn expect_text(value: TaggedValue) -> Result<String, FilterError> {
    match value {
        TaggedValue::Text(s) => Ok(s),
        TaggedValue::Binary(_) => Err(FilterError::KindMismatch {
            expected: "text",
            got: ValueKind::Binary,
        }),
    }
}

/// Apply an infallible text-to-text transform.
fn text_to_text(
    value: TaggedValue,
    f: impl FnOnce(String) -> String,
) -> Result<TaggedValue, FilterError> {
    expect_text(value).map(|s| TaggedValue::Text(f(s)))
}

/// Compute typo suggestions for an unknown filter name.
///
/// Mirrors the distance cutoff used elsewhere in the workspace: edit
/// distance at most 1 for short names, 2 otherwise, closest first, at most
/// three results.
pub fn suggest(name: &str) -> Vec<String> {
    let lowered = name.to_ascii_lowercase();
    let max_distance = if lowered.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, &'static str)> = FilterKind::ALL
        .iter()
        .filter_map(|kind| {
            let dist = strsim::levenshtein(&lowered, kind.name());
            if dist <= max_distance && dist > 0 {
                Some((dist, kind.name()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, s)| s.to_string())
        .collect()
}
