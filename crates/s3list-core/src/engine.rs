//! The `ListObjects` listing engine.
//!
//! [`ListingEngine::list`] walks a [`KeyIndex`] snapshot once, in ascending
//! byte order, and classifies every key under the query's prefix as either a
//! direct key or a member of a delimiter-folded common prefix. The scan stops
//! once `max_keys` entries are emitted and reports a resume marker when more
//! matching keys remain.
//!
//! Two ordering facts keep the scan a single bounded pass:
//!
//! - keys that start with a given prefix form one contiguous run of the
//!   sorted index, so the scan can begin at the prefix and stop at the first
//!   key outside it;
//! - the same holds for every common prefix, so a group is complete once a
//!   key outside it is seen and de-duplication only has to look at the most
//!   recently emitted group.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::index::KeyIndex;
use crate::query::ListQuery;

// ---------------------------------------------------------------------------
// List result
// ---------------------------------------------------------------------------

/// Result of a listing call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult {
    /// Direct keys, ascending.
    pub keys: Vec<String>,
    /// Common prefixes, in first-seen (ascending) order, without duplicates.
    pub common_prefixes: Vec<String>,
    /// Whether more matching keys exist past this page.
    pub is_truncated: bool,
    /// The last key consumed by this page; present iff `is_truncated`.
    pub next_marker: Option<String>,
}

impl ListResult {
    /// Number of emitted entries (keys plus common prefixes).
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.keys.len() + self.common_prefixes.len()
    }
}

// ---------------------------------------------------------------------------
// ListingEngine
// ---------------------------------------------------------------------------

/// Stateless `ListObjects` engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingEngine;

impl ListingEngine {
    /// Compute one page of a listing over `index`.
    ///
    /// The index must be a stable snapshot for the duration of the call.
    #[must_use]
    pub fn list(index: &KeyIndex, query: &ListQuery) -> ListResult {
        let mut result = ListResult::default();

        if query.max_keys == 0 {
            debug!(prefix = %query.prefix, "list with max_keys=0, nothing to emit");
            return result;
        }

        let prefix = query.prefix.as_str();
        let delimiter = query.delimiter.as_str();
        let marker = query.marker.as_str();

        // Every matching key is >= prefix, so start at whichever bound is later.
        let candidates = if !marker.is_empty() && marker >= prefix {
            index.keys_from(marker, false)
        } else {
            index.keys_from(prefix, true)
        };

        let mut emitted = 0usize;
        let mut last_consumed: Option<&str> = None;

        for key in candidates.take_while(|k| k.starts_with(prefix)) {
            let group = common_prefix(key, prefix, delimiter);
            let folded = group.is_some_and(|g| result.common_prefixes.last().is_some_and(|l| l == g));

            if !folded {
                if emitted == query.max_keys {
                    result.is_truncated = true;
                    break;
                }
                match group {
                    Some(g) => result.common_prefixes.push(g.to_owned()),
                    None => result.keys.push(key.to_owned()),
                }
                emitted += 1;
            }
            last_consumed = Some(key);
        }

        if result.is_truncated {
            result.next_marker = last_consumed.map(str::to_owned);
        }

        debug!(
            prefix = %prefix,
            delimiter = %delimiter,
            marker = %marker,
            max_keys = query.max_keys,
            keys = result.keys.len(),
            common_prefixes = result.common_prefixes.len(),
            is_truncated = result.is_truncated,
            "list completed"
        );

        result
    }

    /// Iterate over every page of a listing, resuming each page after the
    /// previous page's `next_marker`.
    #[must_use]
    pub fn pages<'a>(index: &'a KeyIndex, query: &ListQuery) -> Pages<'a> {
        Pages {
            index,
            query: query.clone(),
            done: false,
        }
    }

    /// Collect every page of a listing into a single, non-truncated result.
    #[must_use]
    pub fn list_all(index: &KeyIndex, query: &ListQuery) -> ListResult {
        let mut all = ListResult::default();
        for page in Self::pages(index, query) {
            all.keys.extend(page.keys);
            for cp in page.common_prefixes {
                if all.common_prefixes.last() != Some(&cp) {
                    all.common_prefixes.push(cp);
                }
            }
        }
        all
    }
}

/// The common prefix `key` folds into, if any.
///
/// This is `prefix` followed by the remainder of `key` up to and including
/// the first occurrence of `delimiter` after `prefix`. `key` must start with
/// `prefix`.
fn common_prefix<'k>(key: &'k str, prefix: &str, delimiter: &str) -> Option<&'k str> {
    if delimiter.is_empty() {
        return None;
    }
    let rest = &key[prefix.len()..];
    rest.find(delimiter)
        .map(|pos| &key[..prefix.len() + pos + delimiter.len()])
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Iterator over the pages of a listing, see [`ListingEngine::pages`].
#[derive(Debug)]
pub struct Pages<'a> {
    index: &'a KeyIndex,
    query: ListQuery,
    done: bool,
}

impl Iterator for Pages<'_> {
    type Item = ListResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let page = ListingEngine::list(self.index, &self.query);
        match &page.next_marker {
            Some(marker) if page.is_truncated => self.query.marker.clone_from(marker),
            _ => self.done = true,
        }
        Some(page)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
