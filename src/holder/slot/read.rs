/* src/holder/slot/read.rs */

use std::sync::Arc;
use std::sync::atomic::Ordering;

#[cfg(feature = "events")]
use super::super::HoldEvent;
use super::super::{Entry, Meta};
use super::Slot;

impl<T> Slot<T> {
	/// Gets the current value. This is a wait-free operation.
	pub fn get(&self) -> Arc<T> {
		Arc::clone(&self.inner.load().value)
	}

	/// Gets the metadata of the current value.
	pub fn meta(&self) -> Meta {
		self.inner.load().meta.clone()
	}

	/// Gets the full entry (value + metadata) as one consistent snapshot.
	pub fn entry(&self) -> Entry<T> {
		Entry::clone(&self.inner.load())
	}

	/// Returns the version of the current value.
	pub fn version(&self) -> u64 {
		self.version.load(Ordering::SeqCst)
	}

	/// Subscribes to slot change events.
	#[cfg(feature = "events")]
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<HoldEvent<T>> {
		self.events.subscribe()
	}
}
