use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::site::GenomicSite;

/// Named annotations attached to a record
///
/// Each name maps to an ordered list of values. Adding a value under an
/// existing name appends to its list; values are never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations {
    entries: BTreeMap<String, Vec<String>>,
}

impl Annotations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to the list stored under `name`, creating it on first use
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        self.entries
            .entry(name.to_string())
            .or_default()
            .push(value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A candidate guide target with the annotations collected for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffTargetRecord {
    pub target: GenomicSite,

    #[serde(default, skip_serializing_if = "Annotations::is_empty")]
    pub annotations: Annotations,
}

impl OffTargetRecord {
    pub fn new(target: GenomicSite) -> Self {
        Self {
            target,
            annotations: Annotations::new(),
        }
    }

    /// Swap in a new target site, returning the old one
    pub fn replace_target(&mut self, target: GenomicSite) -> GenomicSite {
        std::mem::replace(&mut self.target, target)
    }
}
