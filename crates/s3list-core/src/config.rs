//! Listing configuration.
//!
//! Provides [`ListingConfig`], passed explicitly to
//! [`BucketRegistry::new`](crate::service::BucketRegistry::new). Values can
//! be loaded from environment variables.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::query::ListQuery;

/// Listing service configuration.
///
/// # Examples
///
/// ```
/// use s3list_core::config::ListingConfig;
///
/// let config = ListingConfig::default();
/// assert_eq!(config.default_max_keys, 1000);
/// assert_eq!(config.bucket_prefix, "s3list-");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ListingConfig {
    /// `max-keys` applied when a request does not carry one.
    #[builder(default = ListQuery::DEFAULT_MAX_KEYS)]
    pub default_max_keys: usize,

    /// Prefix for generated bucket names (see
    /// [`random_bucket_name`](crate::utils::random_bucket_name)).
    #[builder(default = String::from("s3list-"))]
    pub bucket_prefix: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_max_keys: ListQuery::DEFAULT_MAX_KEYS,
            bucket_prefix: String::from("s3list-"),
            log_level: String::from("info"),
        }
    }
}

impl ListingConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `S3LIST_DEFAULT_MAX_KEYS` | `1000` |
    /// | `S3LIST_BUCKET_PREFIX` | `s3list-` |
    /// | `LOG_LEVEL` | `info` |
    ///
    /// Unparseable numeric values are ignored and leave the default in place.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        for key in ENV_VARS {
            if let Ok(value) = std::env::var(key) {
                config.apply(key, value);
            }
        }
        config
    }

    /// Apply one environment variable's value. Unknown keys and unparseable
    /// values leave the configuration unchanged.
    fn apply(&mut self, key: &str, value: String) {
        match key {
            "S3LIST_DEFAULT_MAX_KEYS" => {
                if let Ok(n) = value.parse::<usize>() {
                    self.default_max_keys = n;
                }
            }
            "S3LIST_BUCKET_PREFIX" => self.bucket_prefix = value,
            "LOG_LEVEL" => self.log_level = value,
            _ => {}
        }
    }
}

/// Environment variables read by [`ListingConfig::from_env`].
const ENV_VARS: [&str; 3] = ["S3LIST_DEFAULT_MAX_KEYS", "S3LIST_BUCKET_PREFIX", "LOG_LEVEL"];
