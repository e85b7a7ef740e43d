/* src/holder/meta.rs */

use std::path::PathBuf;
use std::time::SystemTime;

use crate::loader::Encoding;

/// Metadata associated with the current config value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
	/// Source file path.
	pub source: PathBuf,
	/// Text encoding the source is decoded with.
	pub encoding: Encoding,
	/// Wall-clock time when the value was installed.
	pub loaded_at: SystemTime,
	/// Modification time of the source as observed by the load.
	///
	/// Reloads only happen when the file reports a strictly later time.
	pub modified: SystemTime,
	/// Version number, 1 for the initial load and incremented on each reload.
	pub version: u64,
}
