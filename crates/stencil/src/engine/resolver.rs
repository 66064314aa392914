//! Variable-layer merging and tiered environment lookup.

use std::collections::BTreeMap;

use super::error::ResolveError;
use crate::types::VariableLayer;

/// An environment lookup tier.
///
/// Tiers are consulted in declaration order: process first, then the
/// user-scope and machine-scope persisted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvScope {
    Process,
    User,
    Machine,
}

impl EnvScope {
    /// Lookup order for tiered resolution.
    pub const TIERS: [EnvScope; 3] = [EnvScope::Process, EnvScope::User, EnvScope::Machine];
}

/// A read-only environment snapshot with per-scope lookup.
///
/// The engine never reads the host environment itself; callers hand it an
/// implementation of this trait. [`SystemEnv`] covers the common case,
/// [`MapEnv`] gives tests and embedders full control.
pub trait EnvSource {
    /// Look up a variable in one scope. `None` when undefined there.
    fn lookup(&self, scope: EnvScope, name: &str) -> Option<String>;
}

/// Environment snapshot backed by the host process environment.
///
/// Only the process scope is populated; user- and machine-scope persisted
/// values are host-specific and must be supplied via [`MapEnv`] by callers
/// that have them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl EnvSource for SystemEnv {
    fn lookup(&self, scope: EnvScope, name: &str) -> Option<String> {
        match scope {
            EnvScope::Process => std::env::var(name).ok(),
            EnvScope::User | EnvScope::Machine => None,
        }
    }
}

/// Environment snapshot backed by explicit per-scope maps.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    process: BTreeMap<String, String>,
    user: BTreeMap<String, String>,
    machine: BTreeMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable in one scope.
    pub fn set(&mut self, scope: EnvScope, name: impl Into<String>, value: impl Into<String>) {
        let vars = match scope {
            EnvScope::Process => &mut self.process,
            EnvScope::User => &mut self.user,
            EnvScope::Machine => &mut self.machine,
        };
        vars.insert(name.into(), value.into());
    }
}

impl EnvSource for MapEnv {
    fn lookup(&self, scope: EnvScope, name: &str) -> Option<String> {
        let vars = match scope {
            EnvScope::Process => &self.process,
            EnvScope::User => &self.user,
            EnvScope::Machine => &self.machine,
        };
        vars.get(name).cloned()
    }
}

/// Merge the three variable layers into one map.
///
/// A shallow, non-commutative merge: the programmatic layer overrides the
/// file layer key-by-key, and the inline layer overrides both. Inputs are
/// not mutated.
pub fn merge_layers(
    file: &VariableLayer,
    programmatic: &VariableLayer,
    inline: &VariableLayer,
) -> BTreeMap<String, String> {
    let mut merged = file.entries().clone();
    for layer in [programmatic, inline] {
        for (key, value) in layer.entries() {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Resolve `env.<NAME>` through the tiered snapshot.
///
/// The first tier with a non-empty value wins. A value that is empty (or
/// absent) at every tier is undefined, which is fatal: a later `default:`
/// filter can only rescue a defined-but-empty `var.*` value, never an
/// undefined environment variable.
pub fn resolve_env(env: &dyn EnvSource, name: &str) -> Result<String, ResolveError> {
    for scope in EnvScope::TIERS {
        if let Some(value) = env.lookup(scope, name)
            && !value.is_empty()
        {
            return Ok(value);
        }
    }
    Err(ResolveError::UndefinedEnv {
        name: name.to_string(),
    })
}
