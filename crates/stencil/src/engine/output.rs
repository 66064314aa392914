//! Output materialization: encoding selection and byte production.

use std::path::Path;

/// The text encoding an expansion result should be persisted in.
///
/// Selected from the destination's file kind: the legacy registry-script
/// extension (`.reg`) forces UTF-16LE with a byte-order mark, everything
/// else defaults to UTF-8 without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEncoding {
    Utf8,
    Utf16Le,
}

impl OutputEncoding {
    /// Pick the encoding for a destination path.
    pub fn for_destination(path: &Path) -> OutputEncoding {
        let is_reg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("reg"));
        if is_reg {
            OutputEncoding::Utf16Le
        } else {
            OutputEncoding::Utf8
        }
    }

    /// Encode the fully-expanded text to its output bytes.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            OutputEncoding::Utf8 => text.as_bytes().to_vec(),
            OutputEncoding::Utf16Le => {
                let mut bytes = Vec::with_capacity(2 + text.len() * 2);
                bytes.extend_from_slice(&[0xff, 0xfe]);
                bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
                bytes
            }
        }
    }

    /// The encoding's conventional name.
    pub fn name(self) -> &'static str {
        match self {
            OutputEncoding::Utf8 => "utf-8",
            OutputEncoding::Utf16Le => "utf-16le",
        }
    }
}

impl std::fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
