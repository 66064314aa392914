use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named, ordered mapping of variable names to string values.
///
/// Three layers participate in an expansion: file-sourced, programmatic,
/// and inline. Later layers shadow earlier ones key-by-key; the merge is
/// shallow (values are plain strings, nothing nested).
///
/// The entry map serializes as a plain JSON object, so a file-sourced layer
/// can be loaded directly from `{"Name": "value", ...}`.
///
/// # Example
///
/// ```
/// use stencil::VariableLayer;
///
/// let mut layer = VariableLayer::new("inline");
/// layer.set("Name", "ada");
/// assert_eq!(layer.get("Name"), Some("ada"));
/// assert_eq!(layer.get("Other"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableLayer {
    /// Layer name, used in diagnostics only.
    #[serde(skip, default)]
    name: String,

    /// Variable name to value mapping.
    #[serde(flatten)]
    entries: BTreeMap<String, String>,
}

impl VariableLayer {
    /// Create a new empty layer with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Create a layer from a name and existing entries.
    pub fn with_entries(name: impl Into<String>, entries: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// The layer's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a variable, replacing any previous value for the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up a variable by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// The layer's entries.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Number of variables in this layer.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this layer has no variables.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariableLayer {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            name: String::new(),
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
