//! Error types for the expansion engine.
//!
//! Every error is fatal to the whole expansion: there is no partial
//! output, no best-effort substitution, no silent skip. The intended
//! outputs are configuration artifacts, where a hard failure beats a
//! silently half-substituted file.

use thiserror::Error;

use crate::filters::FilterError;
use crate::parser::{ParseError, ScanError};

/// A head-resolution failure.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// `var.<Name>` not present in the merged layers.
    #[error("variable '{name}' is not defined in any variable layer")]
    UndefinedVariable { name: String },

    /// `env.<NAME>` empty or absent at every tier.
    #[error("environment variable '{name}' is not defined in any scope (process, user, machine)")]
    UndefinedEnv { name: String },
}

/// A failure while evaluating one placeholder.
#[derive(Debug, Error)]
pub enum PlaceholderError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A filter failed; the name identifies which one.
    #[error("filter '{name}': {source}")]
    Filter {
        name: String,
        #[source]
        source: FilterError,
    },

    /// The pipeline ended in a binary value.
    #[error("placeholder resolved to binary data; add a text-producing filter")]
    BinaryResult,
}

/// A failure that aborted an expansion run.
#[derive(Debug, Error)]
pub enum ExpandError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// A placeholder failed; carries its raw text and source offset.
    #[error("in placeholder '{{{{{raw}}}}}' at byte offset {offset}: {source}")]
    Placeholder {
        raw: String,
        offset: usize,
        #[source]
        source: PlaceholderError,
    },
}
