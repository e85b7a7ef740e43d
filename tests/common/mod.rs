/* tests/common/mod.rs */

#![allow(dead_code)]

use std::fs::File;
use std::path::Path;
use std::time::{Duration, SystemTime};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use watched_config::WatchedConfigBuilder;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
	pub retries: u32,
}

/// Writes `body` and pins the file's modification time to `mtime`.
pub fn write_with_mtime(path: &Path, body: &str, mtime: SystemTime) -> std::io::Result<()> {
	std::fs::write(path, body)?;
	File::options().write(true).open(path)?.set_modified(mtime)
}

pub fn later(base: SystemTime, secs: u64) -> SystemTime {
	base + Duration::from_secs(secs)
}

pub fn earlier(base: SystemTime, secs: u64) -> SystemTime {
	base - Duration::from_secs(secs)
}

/// Turns watching off where the feature exists; reloads then only happen on explicit checks.
pub fn unwatched<T>(builder: WatchedConfigBuilder<T>) -> WatchedConfigBuilder<T>
where
	T: DeserializeOwned + Send + Sync + 'static,
{
	#[cfg(feature = "watch")]
	let builder = builder.watching(false);
	builder
}
