//! Validation for bucket names and object keys.
//!
//! Follows the
//! [Amazon S3 bucket naming rules](https://docs.aws.amazon.com/AmazonS3/latest/userguide/bucketnamingrules.html)
//! that Ceph RGW enforces by default.

use std::net::Ipv4Addr;

use crate::error::ListingError;

/// Maximum object key length in bytes.
pub const MAX_KEY_BYTES: usize = 1024;

/// Minimum bucket name length.
const MIN_BUCKET_NAME_LEN: usize = 3;

/// Maximum bucket name length.
const MAX_BUCKET_NAME_LEN: usize = 63;

/// Validate a bucket name.
///
/// Rules:
/// - 3-63 characters long
/// - Only lowercase letters, numbers, hyphens, and dots
/// - Must start and end with a letter or number
/// - No consecutive dots (`..`)
/// - Not formatted as an IPv4 address (e.g. `192.168.0.1`)
///
/// # Errors
///
/// Returns [`ListingError::InvalidBucketName`] if any rule is violated.
///
/// # Examples
///
/// ```
/// use s3list_core::validation::validate_bucket_name;
///
/// assert!(validate_bucket_name("my-valid-bucket").is_ok());
/// assert!(validate_bucket_name("AB").is_err());
/// ```
pub fn validate_bucket_name(name: &str) -> Result<(), ListingError> {
    let invalid = |reason: &str| ListingError::InvalidBucketName {
        name: name.to_owned(),
        reason: reason.to_owned(),
    };
    let len = name.len();

    if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&len) {
        return Err(invalid(&format!(
            "Bucket name must be between {MIN_BUCKET_NAME_LEN} and {MAX_BUCKET_NAME_LEN} characters long"
        )));
    }

    if !name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.')
    {
        return Err(invalid(
            "Bucket name must only contain lowercase letters, numbers, hyphens, and dots",
        ));
    }

    let first = name.as_bytes()[0];
    let last = name.as_bytes()[len - 1];
    if !(first.is_ascii_lowercase() || first.is_ascii_digit())
        || !(last.is_ascii_lowercase() || last.is_ascii_digit())
    {
        return Err(invalid("Bucket name must start and end with a letter or number"));
    }

    if name.contains("..") {
        return Err(invalid("Bucket name must not contain consecutive dots"));
    }

    if name.parse::<Ipv4Addr>().is_ok() {
        return Err(invalid("Bucket name must not be formatted as an IP address"));
    }

    Ok(())
}

/// Validate an object key.
///
/// Keys are otherwise unconstrained: control characters, whitespace and any
/// UTF-8 sequence are accepted.
///
/// # Errors
///
/// - [`ListingError::InvalidArgument`] if the key is empty.
/// - [`ListingError::KeyTooLong`] if the key exceeds [`MAX_KEY_BYTES`].
pub fn validate_object_key(key: &str) -> Result<(), ListingError> {
    if key.is_empty() {
        return Err(ListingError::invalid_argument("Object key must not be empty"));
    }
    if key.len() > MAX_KEY_BYTES {
        return Err(ListingError::KeyTooLong { key_len: key.len() });
    }
    Ok(())
}
