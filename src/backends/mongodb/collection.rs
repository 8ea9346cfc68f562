//! MongoDB collection adapter

use async_trait::async_trait;
use bson::{Bson, Document, doc};
use futures::stream::TryStreamExt;
use mongodb::{
	Collection, Database, IndexModel,
	options::{IndexOptions, ReplaceOptions},
};

use crate::error::{Error, Result};
use crate::traits::CollectionOps;
use crate::types::{FindOptions, IndexSpec, UpdateOutcome};

/// A live MongoDB collection handle
///
/// Implements [`CollectionOps`] by direct delegation to the driver. This is
/// the "underlying resource" a [`CollectionProxy`](crate::CollectionProxy)
/// wraps in production.
#[derive(Clone)]
pub struct MongoCollection {
	database: Database,
	collection: Collection<Document>,
}

impl MongoCollection {
	/// Open a handle to the named collection
	///
	/// The driver creates collection handles lazily; this performs no
	/// server round-trip.
	pub fn new(database: Database, name: &str) -> Self {
		let collection = database.collection::<Document>(name);
		Self {
			database,
			collection,
		}
	}

	/// The collection name
	pub fn name(&self) -> &str {
		self.collection.name()
	}
}

#[async_trait]
impl CollectionOps for MongoCollection {
	async fn find(&self, filter: Document, options: FindOptions) -> Result<Vec<Document>> {
		let mut mongo_options = mongodb::options::FindOptions::default();
		mongo_options.limit = options.limit;
		mongo_options.skip = options.skip;
		mongo_options.sort = options.sort;
		mongo_options.projection = options.projection;
		mongo_options.batch_size = options.batch_size;

		let cursor = self
			.collection
			.find(filter)
			.with_options(mongo_options)
			.await?;

		Ok(cursor.try_collect().await?)
	}

	async fn find_one(&self, filter: Document) -> Result<Option<Document>> {
		Ok(self.collection.find_one(filter).await?)
	}

	async fn count_documents(&self, filter: Document) -> Result<u64> {
		Ok(self.collection.count_documents(filter).await?)
	}

	async fn estimated_document_count(&self) -> Result<u64> {
		Ok(self.collection.estimated_document_count().await?)
	}

	async fn distinct(&self, field: &str, filter: Document) -> Result<Vec<Bson>> {
		Ok(self.collection.distinct(field, filter).await?)
	}

	async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>> {
		let cursor = self.collection.aggregate(pipeline).await?;
		Ok(cursor.try_collect().await?)
	}

	async fn options(&self) -> Result<Document> {
		let reply = self
			.database
			.run_command(doc! {
				"listCollections": 1,
				"filter": { "name": self.collection.name() },
			})
			.await?;

		let first = reply
			.get("cursor")
			.and_then(Bson::as_document)
			.and_then(|cursor| cursor.get("firstBatch"))
			.and_then(Bson::as_array)
			.and_then(|batch| batch.first())
			.and_then(Bson::as_document);

		match first {
			Some(info) => Ok(info
				.get("options")
				.and_then(Bson::as_document)
				.cloned()
				.unwrap_or_default()),
			None => Err(Error::Operation(format!(
				"collection not found: {}",
				self.collection.name()
			))),
		}
	}

	async fn insert_one(&self, document: Document) -> Result<Bson> {
		let result = self.collection.insert_one(document).await?;
		Ok(result.inserted_id)
	}

	async fn insert_many(&self, documents: Vec<Document>) -> Result<Vec<Bson>> {
		let result = self.collection.insert_many(documents).await?;

		let mut ids: Vec<(usize, Bson)> = result.inserted_ids.into_iter().collect();
		ids.sort_by_key(|(index, _)| *index);

		Ok(ids.into_iter().map(|(_, id)| id).collect())
	}

	async fn update_one(&self, filter: Document, update: Document) -> Result<UpdateOutcome> {
		let result = self.collection.update_one(filter, update).await?;
		Ok(UpdateOutcome::new(
			result.matched_count,
			result.modified_count,
			result.upserted_id,
		))
	}

	async fn update_many(&self, filter: Document, update: Document) -> Result<UpdateOutcome> {
		let result = self.collection.update_many(filter, update).await?;
		Ok(UpdateOutcome::new(
			result.matched_count,
			result.modified_count,
			result.upserted_id,
		))
	}

	async fn replace_one(&self, filter: Document, replacement: Document) -> Result<UpdateOutcome> {
		let result = self.collection.replace_one(filter, replacement).await?;
		Ok(UpdateOutcome::new(
			result.matched_count,
			result.modified_count,
			result.upserted_id,
		))
	}

	async fn delete_one(&self, filter: Document) -> Result<u64> {
		let result = self.collection.delete_one(filter).await?;
		Ok(result.deleted_count)
	}

	async fn delete_many(&self, filter: Document) -> Result<u64> {
		let result = self.collection.delete_many(filter).await?;
		Ok(result.deleted_count)
	}

	async fn find_one_and_update(
		&self,
		filter: Document,
		update: Document,
	) -> Result<Option<Document>> {
		Ok(self.collection.find_one_and_update(filter, update).await?)
	}

	async fn find_one_and_replace(
		&self,
		filter: Document,
		replacement: Document,
	) -> Result<Option<Document>> {
		Ok(self
			.collection
			.find_one_and_replace(filter, replacement)
			.await?)
	}

	async fn find_one_and_delete(&self, filter: Document) -> Result<Option<Document>> {
		Ok(self.collection.find_one_and_delete(filter).await?)
	}

	async fn save(&self, document: Document) -> Result<Bson> {
		match document.get("_id").cloned() {
			Some(id) => {
				let mut options = ReplaceOptions::default();
				options.upsert = Some(true);

				self.collection
					.replace_one(doc! { "_id": id.clone() }, document)
					.with_options(options)
					.await?;

				Ok(id)
			}
			None => {
				let result = self.collection.insert_one(document).await?;
				Ok(result.inserted_id)
			}
		}
	}

	async fn create_index(&self, spec: IndexSpec) -> Result<String> {
		let mut options = IndexOptions::default();
		options.name = spec.name;
		options.unique = Some(spec.unique);

		let index = IndexModel::builder()
			.keys(spec.keys)
			.options(options)
			.build();

		let result = self.collection.create_index(index).await?;
		Ok(result.index_name)
	}

	async fn drop_index(&self, name: &str) -> Result<()> {
		Ok(self.collection.drop_index(name).await?)
	}

	async fn drop_indexes(&self) -> Result<()> {
		Ok(self.collection.drop_indexes().await?)
	}

	async fn list_index_names(&self) -> Result<Vec<String>> {
		Ok(self.collection.list_index_names().await?)
	}

	async fn drop(&self) -> Result<()> {
		Ok(self.collection.drop().await?)
	}
}
