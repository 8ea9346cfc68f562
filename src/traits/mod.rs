//! Operation traits for proxied collections

mod collection;
mod database;

pub use collection::CollectionOps;
pub use database::DatabaseOps;
