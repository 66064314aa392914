mod layer;
mod value;

pub use layer::VariableLayer;
pub use value::{TaggedValue, ValueKind};
