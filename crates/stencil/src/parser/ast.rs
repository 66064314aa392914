//! Public AST types for scanned templates and parsed placeholders.
//!
//! These types are public to enable external tooling (syntax checkers,
//! editor integrations, etc.).

/// One span of a scanned template.
///
/// The spans of a template are contiguous and exhaustive: concatenating
/// them (with placeholders re-wrapped in `{{ }}`) reconstructs the input,
/// escape sequences aside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Literal text, copied to the output verbatim.
    Literal(String),
    /// The raw text between a `{{` and its matching `}}`, untrimmed.
    Placeholder {
        raw: String,
        /// Byte offset of the opening `{{` in the template source.
        offset: usize,
    },
}

/// The value-source namespace of a placeholder head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// `var.<Name>`: the merged variable layers.
    Var,
    /// `env.<NAME>`: the tiered environment snapshot.
    Env,
}

/// A parsed placeholder: head plus an ordered filter pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub namespace: Namespace,
    /// Identifier looked up in the head's namespace.
    pub name: String,
    /// Filters applied left-to-right to the head's resolved value.
    pub pipeline: Vec<FilterInvocation>,
}

/// One filter in a pipeline: name plus ordered arguments.
///
/// The name is kept as written; filter names are matched
/// case-insensitively at registry lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterInvocation {
    pub name: String,
    pub args: Vec<String>,
}
