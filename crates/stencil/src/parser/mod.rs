//! Template scanner and placeholder grammar parser.
//!
//! Expansion is two-phase: [`scan`] splits the raw document into literal
//! spans and placeholder raw-text spans (with source offsets retained), and
//! [`parse_placeholder`] parses one placeholder's raw text into an AST.
//! Keeping the phases separate preserves exact offsets for diagnostics and
//! keeps evaluation independent of scanning.

pub mod ast;
pub mod error;
mod placeholder;
mod scanner;

pub use ast::{FilterInvocation, Namespace, Placeholder, Span};
pub use error::{ParseError, ScanError};
pub use placeholder::parse_placeholder;
pub use scanner::scan;
