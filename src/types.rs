//! Shared types for collection operations
//!
//! These mirror the small slice of driver option surface the proxy needs,
//! so that the operation traits stay mockable without pulling driver types
//! into every signature.

use bson::{Bson, Document};

/// Options for creating a collection
///
/// Recognized keys are `capped`, `size` (capped collection byte size) and
/// `max` (capped collection max document count). Anything else goes into
/// `extra` and is passed through to the server unmodified.
///
/// # Example
///
/// ```rust
/// use reinhardt_mongo::types::CollectionOptions;
///
/// let options = CollectionOptions::new()
///     .capped(true)
///     .size(1024 * 1024)
///     .max(1000);
///
/// let doc = options.to_document();
/// assert_eq!(doc.get_bool("capped").ok(), Some(true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CollectionOptions {
	capped: Option<bool>,
	size: Option<u64>,
	max: Option<u64>,
	extra: Document,
}

impl CollectionOptions {
	/// Create empty options
	pub fn new() -> Self {
		Self::default()
	}

	/// Mark the collection as capped
	pub fn capped(mut self, capped: bool) -> Self {
		self.capped = Some(capped);
		self
	}

	/// Set the capped collection size in bytes
	pub fn size(mut self, size: u64) -> Self {
		self.size = Some(size);
		self
	}

	/// Set the maximum number of documents in a capped collection
	pub fn max(mut self, max: u64) -> Self {
		self.max = Some(max);
		self
	}

	/// Add an option key the proxy does not recognize
	///
	/// The key/value pair is forwarded to the server's create command
	/// unmodified.
	pub fn extra_option(mut self, key: impl Into<String>, value: impl Into<Bson>) -> Self {
		self.extra.insert(key.into(), value.into());
		self
	}

	/// Assemble the options portion of the create command
	///
	/// Unset fields are omitted entirely.
	pub fn to_document(&self) -> Document {
		let mut doc = Document::new();
		if let Some(capped) = self.capped {
			doc.insert("capped", capped);
		}
		if let Some(size) = self.size {
			doc.insert("size", size as i64);
		}
		if let Some(max) = self.max {
			doc.insert("max", max as i64);
		}
		doc.extend(self.extra.clone());
		doc
	}
}

/// Query options for `find`
///
/// # Example
///
/// ```rust
/// use reinhardt_mongo::types::FindOptions;
/// use bson::doc;
///
/// let options = FindOptions::new()
///     .limit(10)
///     .skip(20)
///     .sort(doc! { "created_at": -1 });
/// ```
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
	/// Maximum number of documents to return
	pub limit: Option<i64>,
	/// Number of documents to skip
	pub skip: Option<u64>,
	/// Sort order
	pub sort: Option<Document>,
	/// Fields to include/exclude
	pub projection: Option<Document>,
	/// Cursor batch size
	pub batch_size: Option<u32>,
}

impl FindOptions {
	/// Create empty options
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the maximum number of documents to return
	pub fn limit(mut self, limit: i64) -> Self {
		self.limit = Some(limit);
		self
	}

	/// Set the number of documents to skip
	pub fn skip(mut self, skip: u64) -> Self {
		self.skip = Some(skip);
		self
	}

	/// Set the sort order
	pub fn sort(mut self, sort: Document) -> Self {
		self.sort = Some(sort);
		self
	}

	/// Set the projection
	pub fn projection(mut self, projection: Document) -> Self {
		self.projection = Some(projection);
		self
	}

	/// Set the cursor batch size
	pub fn batch_size(mut self, batch_size: u32) -> Self {
		self.batch_size = Some(batch_size);
		self
	}
}

/// Outcome of an update/replace operation
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
	/// Number of documents matched by the filter
	pub matched_count: u64,
	/// Number of documents actually modified
	pub modified_count: u64,
	/// ID of the upserted document, when an upsert happened
	pub upserted_id: Option<Bson>,
}

impl UpdateOutcome {
	/// Create a new outcome
	pub fn new(matched_count: u64, modified_count: u64, upserted_id: Option<Bson>) -> Self {
		Self {
			matched_count,
			modified_count,
			upserted_id,
		}
	}
}

/// Specification for an index to create
///
/// # Example
///
/// ```rust
/// use reinhardt_mongo::types::IndexSpec;
/// use bson::doc;
///
/// let spec = IndexSpec::new(doc! { "email": 1 })
///     .name("idx_email")
///     .unique(true);
/// ```
#[derive(Debug, Clone)]
pub struct IndexSpec {
	/// Indexed fields and their sort order
	pub keys: Document,
	/// Index name; server-generated when unset
	pub name: Option<String>,
	/// Whether the index enforces uniqueness
	pub unique: bool,
}

impl IndexSpec {
	/// Create a spec over the given keys
	pub fn new(keys: Document) -> Self {
		Self {
			keys,
			name: None,
			unique: false,
		}
	}

	/// Set the index name
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Set whether the index is unique
	pub fn unique(mut self, unique: bool) -> Self {
		self.unique = unique;
		self
	}
}
