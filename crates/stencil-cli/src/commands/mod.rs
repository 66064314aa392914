//! CLI command implementations.

mod check;
mod expand;
mod filters;

pub use check::{run_check, CheckArgs};
pub use expand::{run_expand, ExpandArgs};
pub use filters::{run_filters, FiltersArgs};
