//! Retrying collection proxy
//!
//! [`CollectionProxy`] wraps a collection handle and forwards every
//! operation through the connection-failure retry loop. It is a pure
//! control-flow layer: stateless between calls, no locks, no side effects
//! beyond those of the underlying operation, and it surfaces results and
//! errors exactly as the underlying handle produced them.
//!
//! # Example
//!
//! ```rust,no_run
//! use reinhardt_mongo::backends::mongodb::MongoDatabase;
//! use reinhardt_mongo::{CollectionOps, CollectionProxy, CollectionOptions, RetryPolicy};
//! use bson::doc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = MongoDatabase::connect("mongodb://localhost:27017", "myapp").await?;
//!
//! let coll = CollectionProxy::create(
//!     &db,
//!     "events",
//!     CollectionOptions::new().capped(true).size(1024 * 1024),
//!     RetryPolicy::new(),
//! )
//! .await?;
//!
//! coll.insert_one(doc! { "kind": "signup" }).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use bson::{Bson, Document};
use tracing::{debug, warn};

use crate::error::Result;
use crate::retry::{RetryPolicy, retry_on_connection_failure};
use crate::traits::{CollectionOps, DatabaseOps};
use crate::types::{CollectionOptions, FindOptions, IndexSpec, UpdateOutcome};

/// Delegating proxy around a collection handle
///
/// The handle is set at construction and never replaced. All read and
/// write operations delegate to it, each wrapped in the retry policy's
/// connection-failure loop.
#[derive(Debug)]
pub struct CollectionProxy<C> {
	inner: C,
	policy: RetryPolicy,
}

impl<C: CollectionOps> CollectionProxy<C> {
	/// Wrap an already-open collection handle
	pub fn new(inner: C, policy: RetryPolicy) -> Self {
		Self { inner, policy }
	}

	/// Create (or open) the named collection and wrap it
	///
	/// The create call is attempted once. If it fails with an operation
	/// failure it is retried exactly once, unconditionally: a concurrent
	/// creator can make the first attempt fail even though the collection
	/// exists by the time of the retry (MongoDB SERVER-6992). Any failure
	/// of the second attempt is fatal, as is any non-operation failure of
	/// the first.
	pub async fn create<D>(
		db: &D,
		name: &str,
		options: CollectionOptions,
		policy: RetryPolicy,
	) -> Result<Self>
	where
		D: DatabaseOps<Collection = C>,
	{
		debug!(database = db.name(), collection = name, "creating collection");

		let inner = match db.create_collection(name, &options).await {
			Ok(collection) => collection,
			Err(err) if err.is_operation_failure() => {
				warn!(
					database = db.name(),
					collection = name,
					error = %err,
					"create collection failed, retrying once"
				);
				db.create_collection(name, &options).await?
			}
			Err(err) => return Err(err),
		};

		Ok(Self::new(inner, policy))
	}

	/// The wrapped collection handle
	pub fn inner(&self) -> &C {
		&self.inner
	}

	/// The retry policy applied to forwarded operations
	pub fn policy(&self) -> &RetryPolicy {
		&self.policy
	}

	/// Unwrap the proxy, returning the underlying handle
	pub fn into_inner(self) -> C {
		self.inner
	}
}

#[async_trait]
impl<C: CollectionOps> CollectionOps for CollectionProxy<C> {
	async fn find(&self, filter: Document, options: FindOptions) -> Result<Vec<Document>> {
		retry_on_connection_failure(&self.policy, || {
			self.inner.find(filter.clone(), options.clone())
		})
		.await
	}

	async fn find_one(&self, filter: Document) -> Result<Option<Document>> {
		retry_on_connection_failure(&self.policy, || self.inner.find_one(filter.clone())).await
	}

	async fn count_documents(&self, filter: Document) -> Result<u64> {
		retry_on_connection_failure(&self.policy, || self.inner.count_documents(filter.clone()))
			.await
	}

	async fn estimated_document_count(&self) -> Result<u64> {
		retry_on_connection_failure(&self.policy, || self.inner.estimated_document_count()).await
	}

	async fn distinct(&self, field: &str, filter: Document) -> Result<Vec<Bson>> {
		retry_on_connection_failure(&self.policy, || self.inner.distinct(field, filter.clone()))
			.await
	}

	async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>> {
		retry_on_connection_failure(&self.policy, || self.inner.aggregate(pipeline.clone())).await
	}

	async fn options(&self) -> Result<Document> {
		retry_on_connection_failure(&self.policy, || self.inner.options()).await
	}

	async fn insert_one(&self, document: Document) -> Result<Bson> {
		retry_on_connection_failure(&self.policy, || self.inner.insert_one(document.clone())).await
	}

	async fn insert_many(&self, documents: Vec<Document>) -> Result<Vec<Bson>> {
		retry_on_connection_failure(&self.policy, || self.inner.insert_many(documents.clone()))
			.await
	}

	async fn update_one(&self, filter: Document, update: Document) -> Result<UpdateOutcome> {
		retry_on_connection_failure(&self.policy, || {
			self.inner.update_one(filter.clone(), update.clone())
		})
		.await
	}

	async fn update_many(&self, filter: Document, update: Document) -> Result<UpdateOutcome> {
		retry_on_connection_failure(&self.policy, || {
			self.inner.update_many(filter.clone(), update.clone())
		})
		.await
	}

	async fn replace_one(&self, filter: Document, replacement: Document) -> Result<UpdateOutcome> {
		retry_on_connection_failure(&self.policy, || {
			self.inner.replace_one(filter.clone(), replacement.clone())
		})
		.await
	}

	async fn delete_one(&self, filter: Document) -> Result<u64> {
		retry_on_connection_failure(&self.policy, || self.inner.delete_one(filter.clone())).await
	}

	async fn delete_many(&self, filter: Document) -> Result<u64> {
		retry_on_connection_failure(&self.policy, || self.inner.delete_many(filter.clone())).await
	}

	async fn find_one_and_update(
		&self,
		filter: Document,
		update: Document,
	) -> Result<Option<Document>> {
		retry_on_connection_failure(&self.policy, || {
			self.inner.find_one_and_update(filter.clone(), update.clone())
		})
		.await
	}

	async fn find_one_and_replace(
		&self,
		filter: Document,
		replacement: Document,
	) -> Result<Option<Document>> {
		retry_on_connection_failure(&self.policy, || {
			self.inner
				.find_one_and_replace(filter.clone(), replacement.clone())
		})
		.await
	}

	async fn find_one_and_delete(&self, filter: Document) -> Result<Option<Document>> {
		retry_on_connection_failure(&self.policy, || {
			self.inner.find_one_and_delete(filter.clone())
		})
		.await
	}

	async fn save(&self, document: Document) -> Result<Bson> {
		retry_on_connection_failure(&self.policy, || self.inner.save(document.clone())).await
	}

	async fn create_index(&self, spec: IndexSpec) -> Result<String> {
		retry_on_connection_failure(&self.policy, || self.inner.create_index(spec.clone())).await
	}

	async fn drop_index(&self, name: &str) -> Result<()> {
		retry_on_connection_failure(&self.policy, || self.inner.drop_index(name)).await
	}

	async fn drop_indexes(&self) -> Result<()> {
		retry_on_connection_failure(&self.policy, || self.inner.drop_indexes()).await
	}

	async fn list_index_names(&self) -> Result<Vec<String>> {
		retry_on_connection_failure(&self.policy, || self.inner.list_index_names()).await
	}

	async fn drop(&self) -> Result<()> {
		retry_on_connection_failure(&self.policy, || self.inner.drop()).await
	}
}
