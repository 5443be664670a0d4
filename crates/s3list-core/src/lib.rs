//! Object-key listing engine for S3-compatible stores.
//!
//! This crate computes `ListObjects` answers over a flat bucket namespace:
//! the returned keys, the common prefixes folded by a delimiter, and the
//! truncation point and resume marker imposed by `max-keys`. It also ships an
//! in-memory bucket registry that plays the storage collaborator's role, so
//! the engine can be exercised end to end without a server.
//!
//! # Architecture
//!
//! ```text
//! ListObjectsRequest (raw wire parameters)
//!        |
//!        v
//! BucketRegistry (bucket lookup, snapshot under read lock)
//!        |
//!        v
//! ListingEngine::list(&KeyIndex, &ListQuery) -> ListResult
//!        |
//!        v
//! ListObjectsOutput (echoed parameters + result)
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod model;
pub mod query;
pub mod service;
pub mod utils;
pub mod validation;

pub use config::ListingConfig;
pub use engine::{ListResult, ListingEngine, Pages};
pub use error::{ListingError, ListingResult};
pub use index::KeyIndex;
pub use model::{ListObjectsOutput, ListObjectsRequest};
pub use query::ListQuery;
pub use service::BucketRegistry;
