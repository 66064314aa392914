//! The expansion driver.

use std::collections::BTreeMap;
use std::path::PathBuf;

use bon::Builder;

use super::error::{ExpandError, PlaceholderError, ResolveError};
use super::output::OutputEncoding;
use super::resolver::{self, EnvSource};
use crate::filters::{self, FilterContext, FilterError, FilterKind};
use crate::parser::{self, Namespace, Span};
use crate::types::{TaggedValue, VariableLayer};

/// One expansion run: template, variable layers, environment snapshot,
/// and destination descriptor.
///
/// Inputs are immutable for the run; nothing persists across runs, so
/// separate runs are safe to execute concurrently as long as each owns its
/// own inputs and output.
///
/// # Example
///
/// ```
/// use stencil::{Expander, MapEnv, layers};
///
/// let env = MapEnv::new();
/// let result = Expander::builder()
///     .template("Hello {{ var.Name | upper }}!")
///     .inline_layer(layers! { "Name" => "ada" })
///     .env(&env)
///     .build()
///     .expand()
///     .unwrap();
/// assert_eq!(result.text, "Hello ADA!");
/// ```
#[derive(Builder)]
pub struct Expander<'a> {
    /// The template source text.
    template: &'a str,

    /// File-sourced variable layer (lowest precedence).
    #[builder(default)]
    file_layer: VariableLayer,

    /// Programmatic variable layer.
    #[builder(default)]
    programmatic_layer: VariableLayer,

    /// Inline variable layer (highest precedence).
    #[builder(default)]
    inline_layer: VariableLayer,

    /// Environment snapshot for `env.*` heads.
    env: &'a dyn EnvSource,

    /// Working directory the `abs` path filters resolve against.
    /// Defaults to the process working directory.
    working_dir: Option<PathBuf>,

    /// Destination path, used only to pick the output encoding.
    destination: Option<PathBuf>,
}

/// The result of a successful expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// The fully-expanded text.
    pub text: String,

    /// The encoding the destination should be written in.
    pub encoding: OutputEncoding,
}

impl Expansion {
    /// The output bytes in the chosen encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encoding.encode(&self.text)
    }
}

impl Expander<'_> {
    /// Run the expansion.
    ///
    /// Single pass, left to right. Any failure aborts the whole run; no
    /// partial output is produced.
    ///
    /// # Errors
    ///
    /// Returns [`ExpandError::Scan`] for an unclosed placeholder, or
    /// [`ExpandError::Placeholder`] identifying the offending
    /// placeholder's raw text and offset for every other failure.
    pub fn expand(self) -> Result<Expansion, ExpandError> {
        let spans = parser::scan(self.template)?;
        let merged = resolver::merge_layers(
            &self.file_layer,
            &self.programmatic_layer,
            &self.inline_layer,
        );
        let ctx = FilterContext {
            working_dir: self.working_dir.unwrap_or_else(default_working_dir),
        };

        let mut output = String::with_capacity(self.template.len());
        for span in spans {
            match span {
                Span::Literal(text) => output.push_str(&text),
                Span::Placeholder { raw, offset } => {
                    match evaluate_placeholder(&raw, &merged, self.env, &ctx) {
                        Ok(text) => output.push_str(&text),
                        Err(source) => {
                            return Err(ExpandError::Placeholder {
                                raw,
                                offset,
                                source,
                            });
                        }
                    }
                }
            }
        }

        let encoding = self
            .destination
            .as_deref()
            .map_or(OutputEncoding::Utf8, OutputEncoding::for_destination);
        Ok(Expansion {
            text: output,
            encoding,
        })
    }
}

/// Evaluate one placeholder: parse, resolve the head, run the pipeline.
fn evaluate_placeholder(
    raw: &str,
    merged: &BTreeMap<String, String>,
    env: &dyn EnvSource,
    ctx: &FilterContext,
) -> Result<String, PlaceholderError> {
    let ast = parser::parse_placeholder(raw)?;

    let head = match ast.namespace {
        Namespace::Var => {
            merged
                .get(&ast.name)
                .cloned()
                .ok_or_else(|| ResolveError::UndefinedVariable {
                    name: ast.name.clone(),
                })?
        }
        Namespace::Env => resolver::resolve_env(env, &ast.name)?,
    };

    let mut value = TaggedValue::Text(head);
    for invocation in &ast.pipeline {
        let Some(kind) = FilterKind::lookup(&invocation.name) else {
            return Err(PlaceholderError::Filter {
                name: invocation.name.clone(),
                source: FilterError::Unknown {
                    name: invocation.name.clone(),
                    suggestions: filters::suggest(&invocation.name),
                },
            });
        };
        value = kind
            .apply(value, &invocation.args, ctx)
            .map_err(|source| PlaceholderError::Filter {
                name: invocation.name.clone(),
                source,
            })?;
    }

    match value {
        TaggedValue::Text(text) => Ok(text),
        TaggedValue::Binary(_) => Err(PlaceholderError::BinaryResult),
    }
}

/// The process working directory, or `.` if it cannot be determined.
fn default_working_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
