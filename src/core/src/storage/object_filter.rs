//! Prefix filtering shared by the listing backends.

use serde::{Deserialize, Serialize};

use crate::storage::types::StorageObject;

/// Restricts a listing to objects whose pathname starts with `prefix`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectFilter {
    pub prefix: Option<String>,
}

impl ObjectFilter {
    /// Build a filter matching objects by pathname prefix. An empty prefix matches everything.
    pub fn by_prefix<S: Into<String>>(prefix: S) -> Self {
        let prefix = prefix.into();
        ObjectFilter {
            prefix: if prefix.is_empty() { None } else { Some(prefix) },
        }
    }

    pub fn matches(&self, pathname: &str) -> bool {
        match self.prefix {
            Some(ref p) => pathname.starts_with(p.as_str()),
            None => true,
        }
    }

    pub fn apply(&self, objects: Vec<StorageObject>) -> Vec<StorageObject> {
        if self.prefix.is_none() {
            return objects;
        }
        objects.into_iter().filter(|o| self.matches(&o.pathname)).collect()
    }
}
