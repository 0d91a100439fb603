// Environment lookups behind a small wrapper so configuration can be
// resolved against a fixed set of values in tests, without touching the
// real process environment.

use std::collections::HashMap;
use std::env::VarError;

/// Reads environment variables either from the process or from a fixed map.
#[derive(Clone, Debug, Default)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Reads only from the given pairs. Anything else is reported missing.
    pub fn from_pairs<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            overrides: Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
        }
    }

    /// Look up a variable by name.
    pub fn var(&self, name: &str) -> Result<String, VarError> {
        match &self.overrides {
            Some(map) => map.get(name).cloned().ok_or(VarError::NotPresent),
            None => std::env::var(name),
        }
    }

    /// The variable's value, or `None` when it is unset, empty or not
    /// valid unicode.
    pub fn non_empty(&self, name: &str) -> Option<String> {
        self.var(name).ok().filter(|v| !v.is_empty())
    }
}
