/* src/loader/json.rs */

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::LoadError;

/// JSON decoding in two explicit steps: syntax, then shape.
///
/// Keeping the steps apart lets callers tell a malformed file
/// ([`LoadError::Parse`]) from a well-formed document that does not fit
/// the target type ([`LoadError::SchemaMismatch`]).
pub struct Json;

impl Json {
	/// Parses text into an untyped JSON document.
	pub fn parse_value(text: &str) -> Result<Value, LoadError> {
		serde_json::from_str(text).map_err(|e| LoadError::Parse(Arc::new(e)))
	}

	/// Converts an untyped document into `T`.
	pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, LoadError> {
		serde_json::from_value(value).map_err(|e| LoadError::SchemaMismatch(Arc::new(e)))
	}

	/// Parses text straight into `T`.
	pub fn parse<T: DeserializeOwned>(text: &str) -> Result<T, LoadError> {
		Self::decode(Self::parse_value(text)?)
	}
}
