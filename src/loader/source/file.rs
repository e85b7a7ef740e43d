/* src/loader/source/file.rs */

use std::path::Path;
use std::time::SystemTime;

use async_trait::async_trait;
use tokio::fs;

use super::super::{LoadError, Source};

/// A file system source backed by tokio::fs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl FileSource {
	pub const fn new() -> Self {
		Self
	}
}

#[async_trait]
impl Source for FileSource {
	async fn read(&self, path: &Path) -> Result<Vec<u8>, LoadError> {
		Ok(fs::read(path).await?)
	}

	async fn modified(&self, path: &Path) -> Result<SystemTime, LoadError> {
		let metadata = fs::metadata(path).await?;
		Ok(metadata.modified()?)
	}
}
