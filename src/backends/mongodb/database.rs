//! MongoDB database adapter

use async_trait::async_trait;
use bson::doc;
use mongodb::{Client, Database};

use super::MongoCollection;
use crate::error::Result;
use crate::traits::DatabaseOps;
use crate::types::CollectionOptions;

/// A live MongoDB database handle
///
/// # Example
///
/// ```rust,no_run
/// use reinhardt_mongo::backends::mongodb::MongoDatabase;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let db = MongoDatabase::connect("mongodb://localhost:27017", "myapp").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MongoDatabase {
	database: Database,
}

impl MongoDatabase {
	/// Wrap an already-open driver database handle
	pub fn new(database: Database) -> Self {
		Self { database }
	}

	/// Connect to MongoDB and select a database
	///
	/// # Arguments
	///
	/// * `url` - MongoDB connection string (e.g. "mongodb://localhost:27017")
	/// * `database_name` - Database name to use
	pub async fn connect(url: &str, database_name: &str) -> Result<Self> {
		let client = Client::with_uri_str(url).await?;
		Ok(Self::new(client.database(database_name)))
	}

	/// The underlying driver database handle
	pub fn inner(&self) -> &Database {
		&self.database
	}
}

#[async_trait]
impl DatabaseOps for MongoDatabase {
	type Collection = MongoCollection;

	/// Creates the named collection, or opens it if it already exists.
	///
	/// An existing collection is opened without issuing a create command,
	/// so a retried create lands here once a concurrent creator has won
	/// the race. The create command itself goes through `run_command` with
	/// the assembled options document, which lets option keys this crate
	/// does not recognize reach the server unmodified.
	async fn create_collection(
		&self,
		name: &str,
		options: &CollectionOptions,
	) -> Result<MongoCollection> {
		let existing = self.database.list_collection_names().await?;

		if !existing.iter().any(|n| n == name) {
			let mut command = doc! { "create": name };
			command.extend(options.to_document());
			self.database.run_command(command).await?;
		}

		Ok(MongoCollection::new(self.database.clone(), name))
	}

	fn name(&self) -> &str {
		self.database.name()
	}
}
