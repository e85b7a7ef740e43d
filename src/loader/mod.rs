/* src/loader/mod.rs */

//!
//! Reading raw bytes from a source and decoding them into a typed value.
//!
//! The pipeline is: stat, read, decode text ([`Encoding`]), parse JSON
//! syntax, decode into `T` ([`Json`]). Each step fails with its own
//! [`LoadError`] variant.

mod encoding;
mod error;
mod json;
mod source;

pub use encoding::Encoding;
pub use error::LoadError;
pub use json::Json;
pub use source::{FileSource, MemorySource};

use std::path::Path;
use std::time::SystemTime;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Abstract data source that retrieves raw bytes by path.
#[async_trait]
pub trait Source: Send + Sync {
	/// Read raw data as a vector of bytes.
	async fn read(&self, path: &Path) -> Result<Vec<u8>, LoadError>;

	/// Modification time of the resource. Fails with [`LoadError::NotFound`] when absent.
	async fn modified(&self, path: &Path) -> Result<SystemTime, LoadError>;

	/// Check if the resource exists at the given path.
	async fn exists(&self, path: &Path) -> bool {
		self.modified(path).await.is_ok()
	}
}

/// A successfully decoded value and the modification time seen before reading it.
#[derive(Debug)]
pub struct Loaded<T> {
	pub value: T,
	/// `None` when the platform does not report modification times.
	pub modified: Option<SystemTime>,
}

/// Combines a [`Source`] with a text [`Encoding`] and JSON decoding.
#[derive(Debug, Clone)]
pub struct Loader<S> {
	source: S,
	encoding: Encoding,
}

impl<S> Loader<S>
where
	S: Source,
{
	/// Creates a new Loader.
	pub const fn new(source: S, encoding: Encoding) -> Self {
		Self { source, encoding }
	}

	pub const fn encoding(&self) -> Encoding {
		self.encoding
	}

	pub fn source(&self) -> &S {
		&self.source
	}

	/// Loads and decodes the document at `path`.
	pub async fn load<T>(&self, path: &Path) -> Result<Loaded<T>, LoadError>
	where
		T: DeserializeOwned,
	{
		// Stat before reading: a write landing in between leaves a newer
		// mtime on disk than the one recorded, so the next check reloads.
		let modified = self.modified(path).await?;
		let bytes = self.source.read(path).await?;
		let text = self.encoding.decode(&bytes)?;
		if text.trim().is_empty() {
			return Err(LoadError::Empty);
		}
		let value = Json::parse(&text)?;

		Ok(Loaded { value, modified })
	}

	/// Current modification time, `None` when unsupported by the platform.
	pub async fn modified(&self, path: &Path) -> Result<Option<SystemTime>, LoadError> {
		match self.source.modified(path).await {
			Ok(time) => Ok(Some(time)),
			Err(LoadError::Io(e)) if e.kind() == std::io::ErrorKind::Unsupported => Ok(None),
			Err(e) => Err(e),
		}
	}
}
