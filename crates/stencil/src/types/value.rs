/// The value threaded through a placeholder's filter pipeline.
///
/// Head resolution always produces `Text`. Byte-producing filters (such as
/// `frombase64` or `gzip`) switch the value to `Binary`; a later
/// text-producing filter must switch it back before the pipeline ends.
///
/// # Example
///
/// ```
/// use stencil::TaggedValue;
///
/// let v = TaggedValue::Text("hello".to_string());
/// assert_eq!(v.as_text(), Some("hello"));
/// assert!(TaggedValue::Binary(vec![0x1f, 0x8b]).as_text().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggedValue {
    /// A string value.
    Text(String),

    /// A raw byte sequence.
    Binary(Vec<u8>),
}

/// The kind of a [`TaggedValue`], used in filter contracts and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Binary,
}

impl TaggedValue {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            TaggedValue::Text(_) => ValueKind::Text,
            TaggedValue::Binary(_) => ValueKind::Binary,
        }
    }

    /// Get this value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TaggedValue::Text(s) => Some(s),
            TaggedValue::Binary(_) => None,
        }
    }

    /// Get this value as bytes, if it is binary.
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            TaggedValue::Binary(b) => Some(b),
            TaggedValue::Text(_) => None,
        }
    }
}

impl ValueKind {
    /// Human-readable kind name for error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Binary => "binary",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for TaggedValue {
    fn from(s: String) -> Self {
        TaggedValue::Text(s)
    }
}

impl From<&str> for TaggedValue {
    fn from(s: &str) -> Self {
        TaggedValue::Text(s.to_string())
    }
}

impl From<Vec<u8>> for TaggedValue {
    fn from(b: Vec<u8>) -> Self {
        TaggedValue::Binary(b)
    }
}
