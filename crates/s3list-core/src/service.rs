//! In-memory bucket registry.
//!
//! [`BucketRegistry`] owns the key namespaces that the listing engine reads.
//! Buckets live in a `DashMap`; each bucket's [`KeyIndex`] sits behind a
//! `parking_lot::RwLock`. A listing clones the index under the read lock and
//! runs the engine on that snapshot after the lock is released, so writers
//! never observe or block a scan in progress.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use dashmap::mapref::one::Ref;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::config::ListingConfig;
use crate::engine::ListingEngine;
use crate::error::{ListingError, ListingResult};
use crate::index::KeyIndex;
use crate::model::{ListObjectsOutput, ListObjectsRequest};
use crate::utils::random_bucket_name;
use crate::validation::{validate_bucket_name, validate_object_key};

/// One bucket: its creation time and its live key index.
#[derive(Debug)]
struct Bucket {
    creation_date: DateTime<Utc>,
    keys: RwLock<KeyIndex>,
}

impl Bucket {
    fn new() -> Self {
        Self {
            creation_date: Utc::now(),
            keys: RwLock::new(KeyIndex::new()),
        }
    }
}

/// Registry of buckets and their keys.
///
/// All methods take `&self`; the registry is `Send + Sync` and can be shared
/// behind an `Arc`.
pub struct BucketRegistry {
    config: ListingConfig,
    buckets: DashMap<String, Bucket>,
}

impl std::fmt::Debug for BucketRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BucketRegistry")
            .field("config", &self.config)
            .field("bucket_count", &self.buckets.len())
            .finish_non_exhaustive()
    }
}

impl Default for BucketRegistry {
    fn default() -> Self {
        Self::new(ListingConfig::default())
    }
}

impl BucketRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new(config: ListingConfig) -> Self {
        Self {
            config,
            buckets: DashMap::new(),
        }
    }

    /// The configuration this registry was built with.
    #[must_use]
    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Buckets
    // -----------------------------------------------------------------------

    /// Create a bucket.
    ///
    /// # Errors
    ///
    /// - [`ListingError::InvalidBucketName`] if the name breaks a naming rule.
    /// - [`ListingError::BucketAlreadyExists`] if the name is taken.
    pub fn create_bucket(&self, name: &str) -> ListingResult<()> {
        validate_bucket_name(name)?;

        match self.buckets.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(ListingError::BucketAlreadyExists {
                bucket: name.to_owned(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(Bucket::new());
                info!(bucket = %name, "bucket created");
                Ok(())
            }
        }
    }

    /// Create a bucket with a generated name using the configured prefix.
    /// Returns the new bucket's name.
    ///
    /// # Errors
    ///
    /// Same as [`create_bucket`](Self::create_bucket).
    pub fn create_random_bucket(&self) -> ListingResult<String> {
        let name = random_bucket_name(&self.config.bucket_prefix);
        self.create_bucket(&name)?;
        Ok(name)
    }

    /// Delete an empty bucket.
    ///
    /// # Errors
    ///
    /// - [`ListingError::NoSuchBucket`] if the bucket does not exist.
    /// - [`ListingError::BucketNotEmpty`] if the bucket still holds keys.
    pub fn delete_bucket(&self, name: &str) -> ListingResult<()> {
        // Puts hold the shard read lock, so emptiness is stable while the
        // entry holds the write lock.
        match self.buckets.entry(name.to_owned()) {
            Entry::Vacant(_) => Err(ListingError::NoSuchBucket {
                bucket: name.to_owned(),
            }),
            Entry::Occupied(slot) => {
                if !slot.get().keys.read().is_empty() {
                    return Err(ListingError::BucketNotEmpty {
                        bucket: name.to_owned(),
                    });
                }
                slot.remove();
                info!(bucket = %name, "bucket deleted");
                Ok(())
            }
        }
    }

    /// Remove every bucket whose name starts with `prefix`, together with its
    /// keys. Returns the number of buckets removed.
    pub fn delete_buckets_with_prefix(&self, prefix: &str) -> usize {
        let before = self.buckets.len();
        self.buckets.retain(|name, _| !name.starts_with(prefix));
        let removed = before.saturating_sub(self.buckets.len());
        info!(prefix = %prefix, removed, "prefixed buckets deleted");
        removed
    }

    /// List all buckets as `(name, creation_date)` pairs sorted by name.
    #[must_use]
    pub fn list_buckets(&self) -> Vec<(String, DateTime<Utc>)> {
        let mut buckets: Vec<(String, DateTime<Utc>)> = self
            .buckets
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().creation_date))
            .collect();
        buckets.sort_by(|a, b| a.0.cmp(&b.0));
        buckets
    }

    /// Whether a bucket exists.
    #[must_use]
    pub fn bucket_exists(&self, name: &str) -> bool {
        self.buckets.contains_key(name)
    }

    // -----------------------------------------------------------------------
    // Keys
    // -----------------------------------------------------------------------

    /// Store a key. Returns `true` if the key is new, `false` if an existing
    /// object was overwritten.
    ///
    /// # Errors
    ///
    /// - [`ListingError::NoSuchBucket`] if the bucket does not exist.
    /// - [`ListingError::InvalidArgument`] / [`ListingError::KeyTooLong`] for
    ///   an invalid key.
    pub fn put_object(&self, bucket: &str, key: &str) -> ListingResult<bool> {
        validate_object_key(key)?;
        let entry = self.bucket(bucket)?;
        let created = entry.keys.write().insert(key);
        debug!(bucket = %bucket, key = %key, created, "put object");
        Ok(created)
    }

    /// Delete a key. Deleting a missing key is not an error; returns whether
    /// a key was removed.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::NoSuchBucket`] if the bucket does not exist.
    pub fn delete_object(&self, bucket: &str, key: &str) -> ListingResult<bool> {
        let entry = self.bucket(bucket)?;
        let removed = entry.keys.write().remove(key);
        debug!(bucket = %bucket, key = %key, removed, "delete object");
        Ok(removed)
    }

    /// Delete a batch of keys under one write lock. Returns the keys that
    /// were present and removed, in request order.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::NoSuchBucket`] if the bucket does not exist.
    pub fn delete_objects<'k, I>(&self, bucket: &str, keys: I) -> ListingResult<Vec<String>>
    where
        I: IntoIterator<Item = &'k str>,
    {
        let entry = self.bucket(bucket)?;
        let mut index = entry.keys.write();
        let removed: Vec<String> = keys
            .into_iter()
            .filter(|key| index.remove(key))
            .map(str::to_owned)
            .collect();
        debug!(bucket = %bucket, removed = removed.len(), "delete objects");
        Ok(removed)
    }

    /// A point-in-time copy of a bucket's keys.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::NoSuchBucket`] if the bucket does not exist.
    pub fn snapshot(&self, bucket: &str) -> ListingResult<KeyIndex> {
        let entry = self.bucket(bucket)?;
        let index = entry.keys.read().clone();
        Ok(index)
    }

    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    /// Answer a `ListObjects` request.
    ///
    /// # Errors
    ///
    /// - [`ListingError::NoSuchBucket`] if the bucket does not exist.
    /// - [`ListingError::InvalidArgument`] if `max-keys` is negative.
    pub fn list_objects(&self, request: ListObjectsRequest) -> ListingResult<ListObjectsOutput> {
        let snapshot = self.snapshot(&request.bucket)?;
        let query = request.to_query(self.config.default_max_keys)?;
        let result = ListingEngine::list(&snapshot, &query);

        debug!(
            bucket = %request.bucket,
            count = result.entry_count(),
            is_truncated = result.is_truncated,
            "list_objects completed"
        );

        Ok(ListObjectsOutput::new(request, &query, result))
    }

    fn bucket(&self, name: &str) -> ListingResult<Ref<'_, String, Bucket>> {
        self.buckets
            .get(name)
            .ok_or_else(|| ListingError::NoSuchBucket {
                bucket: name.to_owned(),
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
