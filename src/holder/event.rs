/* src/holder/event.rs */

use std::path::PathBuf;
use std::sync::Arc;

use super::Meta;
use crate::loader::LoadError;

/// Events emitted by the slot when the held config changes or fails to change.
#[derive(Debug)]
pub enum HoldEvent<T> {
	/// The value was replaced by a successful reload.
	Updated {
		old: Arc<T>,
		new: Arc<T>,
		meta: Meta,
	},
	/// A reload was attempted and failed. The previous value is still held.
	Failed {
		source: PathBuf,
		error: LoadError,
	},
	/// The source disappeared. The previous value is still held.
	Missing { source: PathBuf },
}

impl<T> Clone for HoldEvent<T> {
	fn clone(&self) -> Self {
		match self {
			Self::Updated { old, new, meta } => Self::Updated {
				old: Arc::clone(old),
				new: Arc::clone(new),
				meta: meta.clone(),
			},
			Self::Failed { source, error } => Self::Failed {
				source: source.clone(),
				error: error.clone(),
			},
			Self::Missing { source } => Self::Missing {
				source: source.clone(),
			},
		}
	}
}
