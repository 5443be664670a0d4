//! `ListObjects` request and response shapes.
//!
//! [`ListObjectsRequest`] carries parameters the way a wire layer receives
//! them: every field optional, `max-keys` signed. [`ListObjectsOutput`]
//! echoes `Prefix`, `Delimiter` and `Marker` back exactly as they were sent
//! and reports the effective `MaxKeys`.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::engine::ListResult;
use crate::error::{ListingError, ListingResult};
use crate::query::ListQuery;

/// Raw `ListObjects` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ListObjectsRequest {
    /// Bucket to list.
    #[builder(setter(into))]
    pub bucket: String,
    /// `prefix` query parameter.
    #[builder(default, setter(into, strip_option))]
    pub prefix: Option<String>,
    /// `delimiter` query parameter.
    #[builder(default, setter(into, strip_option))]
    pub delimiter: Option<String>,
    /// `marker` query parameter.
    #[builder(default, setter(into, strip_option))]
    pub marker: Option<String>,
    /// `max-keys` query parameter.
    #[builder(default, setter(strip_option))]
    pub max_keys: Option<i64>,
}

impl ListObjectsRequest {
    /// Map the raw parameters onto a [`ListQuery`].
    ///
    /// Absent strings become empty, absent `max-keys` becomes
    /// `default_max_keys`.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::InvalidArgument`] if `max-keys` is negative.
    pub fn to_query(&self, default_max_keys: usize) -> ListingResult<ListQuery> {
        let max_keys = match self.max_keys {
            None => default_max_keys,
            Some(n) => usize::try_from(n).map_err(|_| {
                ListingError::invalid_argument(format!("max-keys must not be negative, got {n}"))
            })?,
        };

        Ok(ListQuery {
            prefix: self.prefix.clone().unwrap_or_default(),
            delimiter: self.delimiter.clone().unwrap_or_default(),
            marker: self.marker.clone().unwrap_or_default(),
            max_keys,
        })
    }
}

/// `ListObjects` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListObjectsOutput {
    /// Bucket name.
    pub name: String,
    /// Echo of the request's `prefix`.
    pub prefix: Option<String>,
    /// Echo of the request's `delimiter`.
    pub delimiter: Option<String>,
    /// Echo of the request's `marker`.
    pub marker: Option<String>,
    /// The effective `max-keys`.
    pub max_keys: i64,
    /// Returned keys, ascending.
    pub contents: Vec<String>,
    /// Returned common prefixes, first-seen order.
    pub common_prefixes: Vec<String>,
    /// Whether more results exist.
    pub is_truncated: bool,
    /// Marker to resume from when truncated.
    pub next_marker: Option<String>,
}

impl ListObjectsOutput {
    /// Assemble the response for `request` from an engine result.
    #[must_use]
    pub fn new(request: ListObjectsRequest, query: &ListQuery, result: ListResult) -> Self {
        Self {
            name: request.bucket,
            prefix: request.prefix,
            delimiter: request.delimiter,
            marker: request.marker,
            max_keys: i64::try_from(query.max_keys).unwrap_or(i64::MAX),
            contents: result.keys,
            common_prefixes: result.common_prefixes,
            is_truncated: result.is_truncated,
            next_marker: result.next_marker,
        }
    }
}
