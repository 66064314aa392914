//! Scanner and parser error types.

use thiserror::Error;

/// An error found while scanning a template into spans.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A `{{` with no matching `}}` before end of input.
    #[error("unclosed placeholder: '{{{{' at byte offset {offset} has no matching '}}}}'")]
    Unclosed { offset: usize },
}

/// An error found while parsing one placeholder's raw text.
///
/// Each variant carries the offending raw segment for diagnostics.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The head does not match `var.<name>` or `env.<NAME>`.
    #[error("invalid head in '{segment}': expected 'var.<name>' or 'env.<NAME>'")]
    InvalidHead { segment: String },

    /// A `|` with no filter name after it.
    #[error("missing filter name after '|' in '{segment}'")]
    MissingFilterName { segment: String },

    /// A `:` with no argument after it.
    #[error("missing argument after ':' in '{segment}'")]
    MissingArgument { segment: String },

    /// A quoted argument with no closing quote.
    #[error("unterminated quoted argument in '{segment}'")]
    UnterminatedArgument { segment: String },

    /// Characters left over after the last recognized argument.
    #[error("unexpected trailing characters '{trailing}' in '{segment}'")]
    Trailing { segment: String, trailing: String },
}
