//! Name to OID directory.

use super::Oid;
use alloc::collections::btree_map::{self, BTreeMap};
use alloc::string::String;
use alloc::vec::Vec;

/// Flat map from node name to dotted OID string.
///
/// Built fresh for each load. Inserting a name twice keeps the last value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OidDirectory {
    entries: BTreeMap<String, String>,
}

impl OidDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `name → oid`, returning the replaced OID if the name was present.
    pub fn insert(&mut self, name: impl Into<String>, oid: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), oid.into())
    }

    /// Look up the OID for a name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Check whether a name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries sorted by numeric OID, then name.
    #[must_use]
    pub fn sorted_by_oid(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(name, oid)| (oid.parse::<Oid>().ok(), name.as_str(), oid.as_str()))
            .collect();
        entries.sort_by(|a, b| (&a.0, a.1).cmp(&(&b.0, b.1)));
        entries
            .into_iter()
            .map(|(_, name, oid)| (name, oid))
            .collect()
    }
}

impl FromIterator<(String, String)> for OidDirectory {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut dir = Self::new();
        dir.extend(iter);
        dir
    }
}

impl Extend<(String, String)> for OidDirectory {
    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
        for (name, oid) in iter {
            self.insert(name, oid);
        }
    }
}

impl IntoIterator for OidDirectory {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
