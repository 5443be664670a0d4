//! Listing error types.
//!
//! Defines [`ListingError`], the error enum returned by the request layer and
//! the bucket registry. The listing engine itself never fails; every variant
//! here is raised before or around it. Each variant carries the S3 error code
//! and HTTP status an enclosing service would put on the wire.
//!
//! # Usage
//!
//! ```
//! use s3list_core::error::ListingError;
//!
//! let err = ListingError::NoSuchBucket {
//!     bucket: "my-bucket".to_owned(),
//! };
//! assert_eq!(err.code(), "NoSuchBucket");
//! assert_eq!(err.status_code(), http::StatusCode::NOT_FOUND);
//! ```

use http::StatusCode;

/// Error type for listing and bucket registry operations.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    // -----------------------------------------------------------------------
    // Bucket errors
    // -----------------------------------------------------------------------
    /// The specified bucket does not exist.
    #[error("The specified bucket does not exist: {bucket}")]
    NoSuchBucket {
        /// The bucket name that was not found.
        bucket: String,
    },

    /// The requested bucket name is already in use.
    #[error("The requested bucket name is not available: {bucket}")]
    BucketAlreadyExists {
        /// The bucket name that already exists.
        bucket: String,
    },

    /// The bucket still holds keys and cannot be deleted.
    #[error("The bucket you tried to delete is not empty: {bucket}")]
    BucketNotEmpty {
        /// The bucket name that is not empty.
        bucket: String,
    },

    // -----------------------------------------------------------------------
    // Validation errors
    // -----------------------------------------------------------------------
    /// The specified bucket name is not valid.
    #[error("Invalid bucket name: {name}: {reason}")]
    InvalidBucketName {
        /// The invalid bucket name.
        name: String,
        /// The rule that was violated.
        reason: String,
    },

    /// An argument provided is invalid, e.g. a negative `max-keys`.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    /// The object key exceeds the maximum key length.
    #[error("Your key is too long: {key_len} bytes")]
    KeyTooLong {
        /// Length of the rejected key in bytes.
        key_len: usize,
    },
}

impl ListingError {
    /// Build an [`ListingError::InvalidArgument`] from any message.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// The S3 error code string for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoSuchBucket { .. } => "NoSuchBucket",
            Self::BucketAlreadyExists { .. } => "BucketAlreadyExists",
            Self::BucketNotEmpty { .. } => "BucketNotEmpty",
            Self::InvalidBucketName { .. } => "InvalidBucketName",
            Self::InvalidArgument { .. } => "InvalidArgument",
            Self::KeyTooLong { .. } => "KeyTooLongError",
        }
    }

    /// The HTTP status an S3 endpoint answers with for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NoSuchBucket { .. } => StatusCode::NOT_FOUND,
            Self::BucketAlreadyExists { .. } | Self::BucketNotEmpty { .. } => StatusCode::CONFLICT,
            Self::InvalidBucketName { .. }
            | Self::InvalidArgument { .. }
            | Self::KeyTooLong { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

/// Convenience result type for listing operations.
pub type ListingResult<T> = Result<T, ListingError>;
