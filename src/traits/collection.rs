//! Collection operation trait
//!
//! This trait declares the full supported surface of collection-level
//! operations, one method per operation. The driver adapter implements it
//! by direct delegation; the proxy implements it by delegating through the
//! connection-failure retry loop. Keeping the surface explicit (rather
//! than dispatching on operation names) means callers get real signatures
//! and mocks stay trivial.

use async_trait::async_trait;
use bson::{Bson, Document};

use super::super::error::Result;
use super::super::types::{FindOptions, IndexSpec, UpdateOutcome};

/// Trait for collection-level operations
///
/// # Example
///
/// ```rust,ignore
/// use reinhardt_mongo::CollectionOps;
/// use bson::doc;
///
/// async fn find_user(coll: &impl CollectionOps, email: &str) -> Result<Option<Document>> {
///     coll.find_one(doc! { "email": email }).await
/// }
/// ```
#[async_trait]
pub trait CollectionOps: Send + Sync {
	/// Finds documents matching the filter
	///
	/// The cursor is drained; results come back as a vector.
	async fn find(&self, filter: Document, options: FindOptions) -> Result<Vec<Document>>;

	/// Finds a single document matching the filter
	async fn find_one(&self, filter: Document) -> Result<Option<Document>>;

	/// Counts documents matching the filter
	async fn count_documents(&self, filter: Document) -> Result<u64>;

	/// Estimates the document count from collection metadata
	async fn estimated_document_count(&self) -> Result<u64>;

	/// Returns the distinct values of a field across matching documents
	async fn distinct(&self, field: &str, filter: Document) -> Result<Vec<Bson>>;

	/// Executes an aggregation pipeline
	async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>>;

	/// Returns the options the collection was created with
	async fn options(&self) -> Result<Document>;

	/// Inserts a single document
	///
	/// Returns the ID of the inserted document.
	async fn insert_one(&self, document: Document) -> Result<Bson>;

	/// Inserts multiple documents
	///
	/// Returns the IDs of the inserted documents in insertion order.
	async fn insert_many(&self, documents: Vec<Document>) -> Result<Vec<Bson>>;

	/// Updates a single document matching the filter
	async fn update_one(&self, filter: Document, update: Document) -> Result<UpdateOutcome>;

	/// Updates all documents matching the filter
	async fn update_many(&self, filter: Document, update: Document) -> Result<UpdateOutcome>;

	/// Replaces a single document matching the filter
	async fn replace_one(&self, filter: Document, replacement: Document) -> Result<UpdateOutcome>;

	/// Deletes a single document matching the filter
	///
	/// Returns the number of documents deleted (0 or 1).
	async fn delete_one(&self, filter: Document) -> Result<u64>;

	/// Deletes all documents matching the filter
	///
	/// Returns the number of documents deleted.
	async fn delete_many(&self, filter: Document) -> Result<u64>;

	/// Atomically updates a single document and returns its previous state
	async fn find_one_and_update(
		&self,
		filter: Document,
		update: Document,
	) -> Result<Option<Document>>;

	/// Atomically replaces a single document and returns its previous state
	async fn find_one_and_replace(
		&self,
		filter: Document,
		replacement: Document,
	) -> Result<Option<Document>>;

	/// Atomically deletes a single document and returns it
	async fn find_one_and_delete(&self, filter: Document) -> Result<Option<Document>>;

	/// Saves a document, inserting or upserting by `_id`
	///
	/// A document without an `_id` is inserted; one with an `_id` replaces
	/// any existing document under that ID. Returns the document's ID.
	async fn save(&self, document: Document) -> Result<Bson>;

	/// Creates an index
	///
	/// Returns the name of the created index.
	async fn create_index(&self, spec: IndexSpec) -> Result<String>;

	/// Drops the named index
	async fn drop_index(&self, name: &str) -> Result<()>;

	/// Drops all indexes on the collection
	async fn drop_indexes(&self) -> Result<()>;

	/// Lists the names of all indexes on the collection
	async fn list_index_names(&self) -> Result<Vec<String>>;

	/// Drops the collection
	async fn drop(&self) -> Result<()>;
}
