//! Retrying MongoDB collection proxy
//!
//! This crate wraps a MongoDB collection handle in a delegating proxy that
//! applies a bounded retry policy to transient connection failures, and a
//! one-shot blind retry to the create-collection race during construction.
//! Everything else — pooling, topology discovery, read/write concerns,
//! authentication — stays with the wrapped driver.
//!
//! # Example
//!
//! ```rust,no_run
//! use reinhardt_mongo::backends::mongodb::MongoDatabase;
//! use reinhardt_mongo::{CollectionOps, CollectionOptions, CollectionProxy, RetryPolicy};
//! use bson::doc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = MongoDatabase::connect("mongodb://localhost:27017", "myapp").await?;
//!
//! let users = CollectionProxy::create(
//!     &db,
//!     "users",
//!     CollectionOptions::new(),
//!     RetryPolicy::new(),
//! )
//! .await?;
//!
//! users.insert_one(doc! { "name": "Alice" }).await?;
//! let alice = users.find_one(doc! { "name": "Alice" }).await?;
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod error;
pub mod proxy;
pub mod retry;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use proxy::CollectionProxy;
pub use retry::{Backoff, RetryPolicy, retry_on_connection_failure};
pub use traits::{CollectionOps, DatabaseOps};
pub use types::{CollectionOptions, FindOptions, IndexSpec, UpdateOutcome};
