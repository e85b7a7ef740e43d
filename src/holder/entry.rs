/* src/holder/entry.rs */

use std::sync::Arc;

use super::Meta;

/// A loaded config value together with the metadata of the load that produced it.
#[derive(Debug)]
pub struct Entry<T> {
	/// The config value wrapped in Arc for efficient sharing.
	pub value: Arc<T>,
	/// Metadata about this entry.
	pub meta: Meta,
}

impl<T> Clone for Entry<T> {
	fn clone(&self) -> Self {
		Self {
			value: Arc::clone(&self.value),
			meta: self.meta.clone(),
		}
	}
}
