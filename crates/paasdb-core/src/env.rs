//! Environment snapshots: the explicit, insertion-ordered key/value state
//! every resolution call works against. Nothing in this crate reads or
//! mutates the process environment behind the caller's back.

use indexmap::IndexMap;

use crate::error::{PaasDbError, Result};

/// An insertion-ordered snapshot of environment variables.
///
/// Key enumeration order is the order keys were inserted. The precedence scan
/// uses that order as the tie-breaker between keys matched by the same rule,
/// so two snapshots built from the same pairs always resolve identically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvSnapshot {
    vars: IndexMap<String, String>,
}

impl EnvSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the process environment once.
    pub fn from_process() -> Self {
        std::env::vars().collect()
    }

    /// Capture the process environment, then fill in entries from the nearest
    /// `.env` file without touching the process environment itself.
    ///
    /// Variables already present in the process win over the file, matching
    /// `dotenvy::dotenv`'s non-overriding behavior. A missing file is not an
    /// error; an unparsable one is.
    pub fn from_process_with_dotenv() -> Result<Self> {
        let mut snapshot = Self::from_process();
        match dotenvy::dotenv_iter() {
            Ok(entries) => {
                for entry in entries {
                    let (key, value) = entry.map_err(|e| PaasDbError::EnvironmentLoad {
                        message: format!(".env file is not parsable: {}", e),
                    })?;
                    snapshot.vars.entry(key).or_insert(value);
                }
            }
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(PaasDbError::EnvironmentLoad {
                    message: format!(".env file is not readable: {}", e),
                });
            }
        }
        Ok(snapshot)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Insert one variable, returning the previous value if the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.vars.insert(key.into(), value.into())
    }

    /// Merge an overlay into this snapshot. Overlay values overwrite
    /// same-named keys; new keys append in the overlay's order.
    pub fn merge<I>(&mut self, overlay: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in overlay {
            self.vars.insert(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.vars
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let snapshot: EnvSnapshot = [("B", "2"), ("A", "1"), ("C", "3")].into_iter().collect();
        let keys: Vec<&str> = snapshot.keys().collect();
        assert_eq!(keys, ["B", "A", "C"]);
    }

    #[test]
    fn test_merge_overwrites_and_appends() {
        let mut snapshot: EnvSnapshot = [("KEEP", "old"), ("CLOBBER", "old")].into_iter().collect();
        snapshot.merge([
            ("CLOBBER".to_string(), "new".to_string()),
            ("ADDED".to_string(), "1".to_string()),
        ]);

        assert_eq!(snapshot.get("KEEP"), Some("old"));
        assert_eq!(snapshot.get("CLOBBER"), Some("new"));
        assert_eq!(snapshot.get("ADDED"), Some("1"));
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_insert_returns_previous_value() {
        let mut snapshot = EnvSnapshot::new();
        assert_eq!(snapshot.insert("X", "1"), None);
        assert_eq!(snapshot.insert("X", "2"), Some("1".to_string()));
        assert_eq!(snapshot.get("X"), Some("2"));
    }

    #[test]
    fn test_from_process_captures_current_env() {
        // PATH is set in any environment these tests run in.
        let snapshot = EnvSnapshot::from_process();
        assert!(!snapshot.is_empty());
    }
}
