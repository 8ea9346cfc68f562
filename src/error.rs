//! Error types for the collection proxy
//!
//! The proxy never wraps or reclassifies errors on its own: every error a
//! caller sees was produced by the driver adapter and classified exactly
//! once, when it crossed the driver boundary. The retry layer only consults
//! the classification to decide whether another attempt is allowed.

use thiserror::Error;

/// Result type for proxy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for proxied collection operations
#[derive(Debug, Error)]
pub enum Error {
	/// Network/socket-level failure reaching the server (transient)
	#[error("Connection failure: {0}")]
	Connection(String),

	/// Server-rejected operation (e.g. a duplicate-creation conflict)
	#[error("Operation failure: {0}")]
	Operation(String),

	/// BSON serialization/deserialization error
	#[error("Serialization error: {0}")]
	Serialization(String),

	/// Invalid arguments handed to the driver
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),

	/// Any other driver-internal error
	#[error("Driver error: {0}")]
	Driver(String),
}

impl Error {
	/// Returns `true` for transient connection-level failures.
	///
	/// These are the only errors the forwarding retry loop will retry.
	pub fn is_connection_failure(&self) -> bool {
		matches!(self, Error::Connection(_))
	}

	/// Returns `true` for server-reported operation failures.
	///
	/// Construction retries these exactly once to step over the
	/// concurrent create-collection race; everywhere else they are fatal
	/// on first occurrence.
	pub fn is_operation_failure(&self) -> bool {
		matches!(self, Error::Operation(_))
	}
}

impl From<mongodb::error::Error> for Error {
	fn from(err: mongodb::error::Error) -> Self {
		use mongodb::error::ErrorKind;

		match *err.kind {
			ErrorKind::Io(_) => Error::Connection(err.to_string()),
			ErrorKind::ServerSelection { .. } => Error::Connection(err.to_string()),
			ErrorKind::ConnectionPoolCleared { .. } => Error::Connection(err.to_string()),
			ErrorKind::Command(_) => Error::Operation(err.to_string()),
			ErrorKind::Write(_) => Error::Operation(err.to_string()),
			ErrorKind::InvalidArgument { .. } => Error::InvalidArgument(err.to_string()),
			_ => Error::Driver(err.to_string()),
		}
	}
}

// In bson v3.x, both ser::Error and de::Error are type aliases for bson::error::Error
impl From<bson::error::Error> for Error {
	fn from(err: bson::error::Error) -> Self {
		Error::Serialization(err.to_string())
	}
}
