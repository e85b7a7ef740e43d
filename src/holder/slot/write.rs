/* src/holder/slot/write.rs */

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::SystemTime;

#[cfg(feature = "events")]
use super::super::HoldEvent;
use super::super::{Entry, Meta};
use super::Slot;

impl<T> Slot<T> {
	/// Replaces the held value wholesale and returns the previous one.
	///
	/// Source and encoding carry over from the current entry; `loaded_at`
	/// is stamped now and the version is bumped by one.
	pub fn replace(&self, value: T, modified: SystemTime) -> Arc<T> {
		let value = Arc::new(value);
		let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
		let loaded_at = SystemTime::now();

		let previous = self.inner.rcu(|current| Entry {
			value: Arc::clone(&value),
			meta: Meta {
				source: current.meta.source.clone(),
				encoding: current.meta.encoding,
				loaded_at,
				modified,
				version,
			},
		});

		#[cfg(feature = "events")]
		{
			let meta = self.inner.load().meta.clone();
			let _ = self.events.send(HoldEvent::Updated {
				old: Arc::clone(&previous.value),
				new: Arc::clone(&value),
				meta,
			});
		}

		Arc::clone(&previous.value)
	}

	/// Broadcasts an event to subscribers. Sending with no subscribers is not an error.
	#[cfg(feature = "events")]
	pub(crate) fn emit(&self, event: HoldEvent<T>) {
		let _ = self.events.send(event);
	}
}
