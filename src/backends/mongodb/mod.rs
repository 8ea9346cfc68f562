//! MongoDB driver adapters
//!
//! [`MongoDatabase`] and [`MongoCollection`] implement the operation traits
//! directly over the `mongodb` driver. Errors are classified exactly once
//! here, at the driver boundary; the proxy layer above never reclassifies.

mod collection;
mod database;

pub use collection::MongoCollection;
pub use database::MongoDatabase;
