//! Bucket-name generation helpers.

use uuid::Uuid;

/// Generate a unique bucket name starting with `prefix`.
///
/// Appends the first eight hex digits of a v4 UUID, so the result is a valid
/// bucket name whenever `prefix` is a valid bucket-name prefix of at most 55
/// characters.
///
/// # Examples
///
/// ```
/// use s3list_core::utils::random_bucket_name;
/// use s3list_core::validation::validate_bucket_name;
///
/// let name = random_bucket_name("s3list-");
/// assert!(name.starts_with("s3list-"));
/// assert!(validate_bucket_name(&name).is_ok());
/// ```
#[must_use]
pub fn random_bucket_name(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{prefix}{}", &id[..8])
}
