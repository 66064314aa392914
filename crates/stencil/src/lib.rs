//! Stencil is a placeholder expansion engine for generating configuration
//! artifacts from templates.
//!
//! A template is plain text carrying `{{ ... }}` placeholders. Each
//! placeholder names a value source (`var.` for caller-supplied variables,
//! `env.` for the host environment) and may pipe the resolved value through
//! a chain of filters before it is spliced back into the output:
//!
//! ```text
//! [HKEY_CURRENT_USER\Software\Demo]
//! "Install"="{{ var.InstallDir | pathwin | regesc }}"
//! ```
//!
//! Expansion is a single pass, and any failure (an undefined variable, an
//! unknown filter, a pipeline ending in binary data) aborts the whole run
//! rather than emitting a half-substituted artifact.
//!
//! # Example
//!
//! ```
//! use stencil::{Expander, SystemEnv, layers};
//!
//! let env = SystemEnv;
//! let result = Expander::builder()
//!     .template("Hello {{ var.Name | upper }}!")
//!     .inline_layer(layers! { "Name" => "ada" })
//!     .env(&env)
//!     .build()
//!     .expand()
//!     .unwrap();
//! assert_eq!(result.text, "Hello ADA!");
//! ```

pub mod engine;
pub mod filters;
pub mod parser;
pub mod types;

pub use engine::{
    EnvScope, EnvSource, ExpandError, Expander, Expansion, MapEnv, OutputEncoding,
    PlaceholderError, ResolveError, SystemEnv,
};
pub use filters::{FilterContext, FilterError, FilterKind};
pub use types::{TaggedValue, ValueKind, VariableLayer};

/// Creates a [`VariableLayer`] from key-value pairs.
///
/// Keys and values are converted via `Into<String>`. The layer's name is
/// left empty; use [`VariableLayer::new`] when the name matters for
/// diagnostics.
///
/// # Example
///
/// ```
/// use stencil::layers;
///
/// let layer = layers! { "Name" => "ada", "Version" => "1.0" };
/// assert_eq!(layer.len(), 2);
/// assert_eq!(layer.get("Name"), Some("ada"));
/// ```
#[macro_export]
macro_rules! layers {
    {} => {
        $crate::VariableLayer::default()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut layer = $crate::VariableLayer::default();
            $(
                layer.set($key, $value);
            )+
            layer
        }
    };
}
