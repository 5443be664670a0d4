//! The `ListObjects` query value object.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Parameters of one listing call.
///
/// Every field is a raw string compared byte-wise. An empty `delimiter`
/// disables grouping; any other value, including whitespace, is a literal
/// delimiter. An empty `marker` starts from the beginning of the bucket.
///
/// # Examples
///
/// ```
/// use s3list_core::query::ListQuery;
///
/// let query = ListQuery::builder().prefix("photos/".into()).delimiter("/".into()).build();
/// assert_eq!(query.max_keys, 1000);
/// assert!(query.marker.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Only keys starting with this prefix are listed.
    #[builder(default)]
    #[serde(default)]
    pub prefix: String,

    /// Keys whose remainder after `prefix` contains this string are folded
    /// into a common prefix.
    #[builder(default)]
    #[serde(default)]
    pub delimiter: String,

    /// Only keys strictly greater than this marker are listed.
    #[builder(default)]
    #[serde(default)]
    pub marker: String,

    /// Upper bound on returned keys plus common prefixes. `0` is valid and
    /// yields an empty result.
    #[builder(default = ListQuery::DEFAULT_MAX_KEYS)]
    #[serde(default = "default_max_keys")]
    pub max_keys: usize,
}

impl ListQuery {
    /// `max-keys` used when a request does not specify one.
    pub const DEFAULT_MAX_KEYS: usize = 1000;

    /// The same query resumed after `marker`.
    #[must_use]
    pub fn with_marker(&self, marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            ..self.clone()
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::builder().build()
    }
}

fn default_max_keys() -> usize {
    ListQuery::DEFAULT_MAX_KEYS
}
