//! Sorted key index for one bucket.
//!
//! [`KeyIndex`] keeps keys in a `BTreeSet<String>`. `str` ordering is
//! byte-wise over UTF-8, which is exactly the order `ListObjects` enumerates
//! in, so marker and truncation semantics fall out of the set's range scans.
//! Cloning an index yields an independent point-in-time snapshot.
//!
//! Keys, prefixes and delimiters are `String`s, so they are restricted to
//! valid UTF-8.

use std::collections::BTreeSet;
use std::ops::Bound;

use serde::{Deserialize, Serialize};

/// Sorted set of object keys belonging to one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyIndex {
    keys: BTreeSet<String>,
}

impl KeyIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key. Returns `true` if the key was not present before.
    ///
    /// Re-inserting an existing key is an overwrite of the object and leaves
    /// the index unchanged.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    /// Remove a key. Returns `true` if it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.keys.remove(key)
    }

    /// Whether the index contains `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the index holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// All keys in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Keys in ascending order starting at `start`.
    ///
    /// With `inclusive == false` the first yielded key is strictly greater
    /// than `start`. `start` does not have to be present in the index. Each
    /// call scans afresh.
    pub fn keys_from<'a>(
        &'a self,
        start: &str,
        inclusive: bool,
    ) -> impl Iterator<Item = &'a str> + use<'a> {
        let lower = if inclusive {
            Bound::Included(start)
        } else {
            Bound::Excluded(start)
        };
        self.keys
            .range::<str, _>((lower, Bound::Unbounded))
            .map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for KeyIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for KeyIndex {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.keys.extend(iter.into_iter().map(Into::into));
    }
}
