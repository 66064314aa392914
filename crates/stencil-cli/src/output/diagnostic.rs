//! Miette diagnostic wrapper for template errors.

use miette::{Diagnostic, NamedSource, SourceSpan};
use stencil::parser::ScanError;
use stencil::ExpandError;
use thiserror::Error;

/// A miette-compatible diagnostic for template errors.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("template error: {message}")]
#[diagnostic(code(stencil::template))]
pub struct StencilDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl StencilDiagnostic {
    /// Create a diagnostic pointing at a byte range of the template.
    pub fn new(name: &str, content: &str, offset: usize, len: usize, message: String) -> Self {
        // Clamp to the source so miette never sees an out-of-bounds span.
        let offset = offset.min(content.len());
        let len = len.min(content.len() - offset);

        StencilDiagnostic {
            src: NamedSource::new(name, content.to_string()),
            span: (offset, len).into(),
            message,
            help: None,
        }
    }

    /// Create a diagnostic from an expansion error with source context.
    pub fn from_expand_error(name: &str, content: &str, err: &ExpandError) -> Self {
        match err {
            ExpandError::Scan(scan) => {
                // The opening delimiter is all we can point at.
                let ScanError::Unclosed { offset } = scan;
                Self::new(name, content, *offset, 2, scan.to_string())
            }
            ExpandError::Placeholder {
                raw,
                offset,
                source,
            } => {
                // Span covers the placeholder including its delimiters.
                Self::new(name, content, *offset, raw.len() + 4, source.to_string())
            }
        }
    }
}
