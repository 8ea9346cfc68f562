//! Shared fake backends for proxy tests
//!
//! The fakes script failures up front: each call consumes the next queued
//! error, or succeeds with a canned value once the queue is empty. Call
//! counters make the retry contracts observable.

#![allow(dead_code)]

use async_trait::async_trait;
use bson::{Bson, Document, doc};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use reinhardt_mongo::error::{Error, Result};
use reinhardt_mongo::traits::{CollectionOps, DatabaseOps};
use reinhardt_mongo::types::{CollectionOptions, FindOptions, IndexSpec, UpdateOutcome};

/// A connection failure like the ones the driver adapter classifies
pub fn connection_failure() -> Error {
	Error::Connection("connection reset by peer".to_string())
}

/// A server-side operation failure
pub fn operation_failure() -> Error {
	Error::Operation("operation rejected by server".to_string())
}

/// Fake collection handle with scripted failures
#[derive(Debug)]
pub struct FakeCollection {
	calls: AtomicU32,
	failures: Mutex<VecDeque<Error>>,
}

impl FakeCollection {
	/// A fake that succeeds on every call
	pub fn succeeding() -> Self {
		Self::failing_with(Vec::new())
	}

	/// A fake that yields the given errors in order, then succeeds
	pub fn failing_with(errors: Vec<Error>) -> Self {
		Self {
			calls: AtomicU32::new(0),
			failures: Mutex::new(errors.into_iter().collect()),
		}
	}

	/// Total number of operation invocations across all methods
	pub fn calls(&self) -> u32 {
		self.calls.load(Ordering::SeqCst)
	}

	fn step<T>(&self, ok: T) -> Result<T> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		match self
			.failures
			.lock()
			.expect("failure queue poisoned")
			.pop_front()
		{
			Some(err) => Err(err),
			None => Ok(ok),
		}
	}
}

/// Canned document returned by the fake's read operations
pub fn fake_document() -> Document {
	doc! { "fake": true }
}

#[async_trait]
impl CollectionOps for FakeCollection {
	async fn find(&self, _filter: Document, _options: FindOptions) -> Result<Vec<Document>> {
		self.step(vec![fake_document()])
	}

	async fn find_one(&self, _filter: Document) -> Result<Option<Document>> {
		self.step(Some(fake_document()))
	}

	async fn count_documents(&self, _filter: Document) -> Result<u64> {
		self.step(7)
	}

	async fn estimated_document_count(&self) -> Result<u64> {
		self.step(7)
	}

	async fn distinct(&self, _field: &str, _filter: Document) -> Result<Vec<Bson>> {
		self.step(vec![Bson::from("a"), Bson::from("b")])
	}

	async fn aggregate(&self, _pipeline: Vec<Document>) -> Result<Vec<Document>> {
		self.step(vec![doc! { "total": 3 }])
	}

	async fn options(&self) -> Result<Document> {
		self.step(doc! { "capped": true })
	}

	async fn insert_one(&self, _document: Document) -> Result<Bson> {
		self.step(Bson::Int32(1))
	}

	async fn insert_many(&self, _documents: Vec<Document>) -> Result<Vec<Bson>> {
		self.step(vec![Bson::Int32(1), Bson::Int32(2)])
	}

	async fn update_one(&self, _filter: Document, _update: Document) -> Result<UpdateOutcome> {
		self.step(UpdateOutcome::new(1, 1, None))
	}

	async fn update_many(&self, _filter: Document, _update: Document) -> Result<UpdateOutcome> {
		self.step(UpdateOutcome::new(2, 2, None))
	}

	async fn replace_one(
		&self,
		_filter: Document,
		_replacement: Document,
	) -> Result<UpdateOutcome> {
		self.step(UpdateOutcome::new(1, 1, None))
	}

	async fn delete_one(&self, _filter: Document) -> Result<u64> {
		self.step(1)
	}

	async fn delete_many(&self, _filter: Document) -> Result<u64> {
		self.step(2)
	}

	async fn find_one_and_update(
		&self,
		_filter: Document,
		_update: Document,
	) -> Result<Option<Document>> {
		self.step(Some(fake_document()))
	}

	async fn find_one_and_replace(
		&self,
		_filter: Document,
		_replacement: Document,
	) -> Result<Option<Document>> {
		self.step(Some(fake_document()))
	}

	async fn find_one_and_delete(&self, _filter: Document) -> Result<Option<Document>> {
		self.step(Some(fake_document()))
	}

	async fn save(&self, _document: Document) -> Result<Bson> {
		self.step(Bson::Int32(1))
	}

	async fn create_index(&self, _spec: IndexSpec) -> Result<String> {
		self.step("idx_fake".to_string())
	}

	async fn drop_index(&self, _name: &str) -> Result<()> {
		self.step(())
	}

	async fn drop_indexes(&self) -> Result<()> {
		self.step(())
	}

	async fn list_index_names(&self) -> Result<Vec<String>> {
		self.step(vec!["_id_".to_string()])
	}

	async fn drop(&self) -> Result<()> {
		self.step(())
	}
}

/// Fake database handle with scripted create-collection failures
pub struct FakeDatabase {
	create_calls: AtomicU32,
	failures: Mutex<VecDeque<Error>>,
	last_options: Mutex<Option<Document>>,
}

impl FakeDatabase {
	/// A fake whose create-collection always succeeds
	pub fn succeeding() -> Self {
		Self::failing_with(Vec::new())
	}

	/// A fake whose create-collection yields the given errors in order,
	/// then succeeds
	pub fn failing_with(errors: Vec<Error>) -> Self {
		Self {
			create_calls: AtomicU32::new(0),
			failures: Mutex::new(errors.into_iter().collect()),
			last_options: Mutex::new(None),
		}
	}

	/// Number of create-collection invocations
	pub fn create_calls(&self) -> u32 {
		self.create_calls.load(Ordering::SeqCst)
	}

	/// The assembled options document from the most recent create call
	pub fn last_options(&self) -> Option<Document> {
		self.last_options
			.lock()
			.expect("options slot poisoned")
			.clone()
	}
}

#[async_trait]
impl DatabaseOps for FakeDatabase {
	type Collection = FakeCollection;

	async fn create_collection(
		&self,
		_name: &str,
		options: &CollectionOptions,
	) -> Result<FakeCollection> {
		self.create_calls.fetch_add(1, Ordering::SeqCst);
		*self.last_options.lock().expect("options slot poisoned") = Some(options.to_document());

		match self
			.failures
			.lock()
			.expect("failure queue poisoned")
			.pop_front()
		{
			Some(err) => Err(err),
			None => Ok(FakeCollection::succeeding()),
		}
	}

	fn name(&self) -> &str {
		"fake_db"
	}
}
