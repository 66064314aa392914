//! Expansion engine: resolution, pipeline driving, and materialization.
//!
//! The engine threads each placeholder through head resolution and its
//! filter pipeline, assembling the output buffer left to right. Evaluation
//! is synchronous and stateless across placeholders and across calls;
//! nothing persists between invocations.

mod error;
mod expander;
mod output;
mod resolver;

pub use error::{ExpandError, PlaceholderError, ResolveError};
pub use expander::{Expander, Expansion};
pub use output::OutputEncoding;
pub use resolver::{EnvScope, EnvSource, MapEnv, SystemEnv, merge_layers, resolve_env};
