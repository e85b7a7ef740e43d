/* src/loader/source/memory.rs */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;

use super::super::{LoadError, Source};

/// A simple in-memory source useful for testing and embedded defaults.
#[derive(Debug, Default)]
pub struct MemorySource {
	data: BTreeMap<PathBuf, (Vec<u8>, SystemTime)>,
}

impl MemorySource {
	/// Creates a new empty MemorySource.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts data into the source with an explicit modification time.
	pub fn insert(&mut self, path: impl Into<PathBuf>, value: impl Into<Vec<u8>>, modified: SystemTime) {
		self.data.insert(path.into(), (value.into(), modified));
	}

	/// Removes data from the source.
	pub fn remove(&mut self, path: &Path) -> bool {
		self.data.remove(path).is_some()
	}
}

#[async_trait]
impl Source for MemorySource {
	async fn read(&self, path: &Path) -> Result<Vec<u8>, LoadError> {
		self.data
			.get(path)
			.map(|(bytes, _)| bytes.clone())
			.ok_or(LoadError::NotFound)
	}

	async fn modified(&self, path: &Path) -> Result<SystemTime, LoadError> {
		self.data
			.get(path)
			.map(|(_, modified)| *modified)
			.ok_or(LoadError::NotFound)
	}
}
