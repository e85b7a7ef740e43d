/* src/controller/error.rs */

use thiserror::Error;

use crate::loader::LoadError;
#[cfg(feature = "watch")]
use crate::signal::WatchError;

/// Errors that can occur in the WatchedConfig controller.
#[derive(Debug, Error)]
pub enum Error {
	#[error("Load error: {0}")]
	Load(#[from] LoadError),

	#[cfg(feature = "watch")]
	#[error("Watch error: {0}")]
	Watch(#[from] WatchError),
}

impl Error {
	/// The underlying load failure, if this is one.
	pub fn as_load(&self) -> Option<&LoadError> {
		match self {
			Self::Load(e) => Some(e),
			#[cfg(feature = "watch")]
			Self::Watch(_) => None,
		}
	}
}
