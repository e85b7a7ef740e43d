/* src/loader/error.rs */

use std::sync::Arc;

use super::Encoding;

/// Core error type for the loader module.
///
/// Cheap to clone so the same failure can go to the caller and to event subscribers.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
	/// The source does not exist.
	#[error("not found")]
	NotFound,

	/// IO error from the source, other than not-found.
	#[error("io error: {0}")]
	Io(#[source] Arc<std::io::Error>),

	/// The bytes are not valid text in the configured encoding.
	#[error("invalid {encoding} text: {reason}")]
	Encoding { encoding: Encoding, reason: String },

	/// The encoding identifier is not recognised.
	#[error("unknown encoding: {0}")]
	UnknownEncoding(String),

	/// The text is not well-formed JSON.
	#[error("parse error: {0}")]
	Parse(#[source] Arc<serde_json::Error>),

	/// Well-formed JSON whose shape does not fit the target type.
	#[error("schema mismatch: {0}")]
	SchemaMismatch(#[source] Arc<serde_json::Error>),

	/// Validation error from validator crate.
	#[cfg(feature = "validate")]
	#[error("validation failed: {0}")]
	Validation(#[from] validator::ValidationErrors),

	/// The source holds no text, typically a save caught between truncate and write.
	#[error("empty document")]
	Empty,

	/// Rejected by a caller-supplied check.
	#[error("check failed: {0}")]
	Check(String),
}

impl From<std::io::Error> for LoadError {
	fn from(e: std::io::Error) -> Self {
		if e.kind() == std::io::ErrorKind::NotFound {
			Self::NotFound
		} else {
			Self::Io(Arc::new(e))
		}
	}
}

impl LoadError {
	/// True when the failure is the source being absent.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound)
	}
}
