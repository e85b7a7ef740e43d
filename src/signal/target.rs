/* src/signal/target.rs */

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::{Result, WatchError};

/// A single file, watched through its parent directory.
///
/// Watching the directory rather than the file keeps the watch alive when
/// an editor saves by writing a temporary file and renaming it over the
/// original, which replaces the inode a file-level watch is attached to.
#[derive(Debug, Clone)]
pub(crate) struct FileTarget {
	dir: PathBuf,
	file_name: OsString,
}

impl FileTarget {
	pub(crate) fn new(path: &Path) -> Result<Self> {
		let file_name = path
			.file_name()
			.ok_or_else(|| WatchError::Config(format!("Not a file path: {:?}", path)))?
			.to_os_string();

		let dir = match path.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
			_ => PathBuf::from("."),
		};

		if !dir.is_dir() {
			return Err(WatchError::Config(format!(
				"Directory does not exist: {:?}",
				dir
			)));
		}

		Ok(Self { dir, file_name })
	}

	pub(crate) fn dir(&self) -> &Path {
		&self.dir
	}

	/// The directory watch is non-recursive, so the file name alone identifies the target.
	pub(crate) fn matches(&self, path: &Path) -> bool {
		path.file_name() == Some(self.file_name.as_os_str())
	}
}
