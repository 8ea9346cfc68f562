//! Database handle trait
//!
//! The construction seam: a database handle can create (or open) a named
//! collection and hand back an operation handle for it. The proxy's
//! construction-time retry contract is written against this trait, so the
//! create-collection race can be exercised without a live server.

use async_trait::async_trait;

use super::super::error::Result;
use super::super::types::CollectionOptions;
use super::CollectionOps;

/// Trait for database-level operations the proxy needs
#[async_trait]
pub trait DatabaseOps: Send + Sync {
	/// The collection handle type this database produces
	type Collection: CollectionOps;

	/// Creates the named collection, or opens it if it already exists
	///
	/// A server-side rejection of the create command surfaces as an
	/// operation failure; connectivity loss surfaces as a connection
	/// failure.
	async fn create_collection(
		&self,
		name: &str,
		options: &CollectionOptions,
	) -> Result<Self::Collection>;

	/// The database name, for logging
	fn name(&self) -> &str;
}
