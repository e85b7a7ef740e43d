/* src/holder/slot/mod.rs */

mod read;
mod write;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::time::SystemTime;

use arc_swap::ArcSwap;

#[cfg(feature = "events")]
use super::HoldEvent;
use super::{Entry, Meta};
use crate::loader::Encoding;

/// Default event channel capacity.
#[cfg(feature = "events")]
pub const DEFAULT_EVENT_CAPACITY: usize = 100;

/// Thread-safe holder of a single config value with atomic replacement.
///
/// Uses RCU (Read-Copy-Update) for wait-free reads. The value and its
/// metadata live in one [`Entry`] behind one pointer, so a reader never
/// observes a new value paired with stale metadata or the reverse.
/// A reader that keeps an `Arc<T>` across a replace keeps the old value.
pub struct Slot<T> {
	pub(crate) inner: ArcSwap<Entry<T>>,
	pub(crate) version: AtomicU64,
	#[cfg(feature = "events")]
	pub(crate) events: tokio::sync::broadcast::Sender<HoldEvent<T>>,
}

impl<T> Slot<T> {
	/// Creates a slot holding the initially loaded value at version 1.
	pub fn new(value: T, source: PathBuf, encoding: Encoding, modified: SystemTime) -> Self {
		let entry = Entry {
			value: Arc::new(value),
			meta: Meta {
				source,
				encoding,
				loaded_at: SystemTime::now(),
				modified,
				version: 1,
			},
		};

		Self {
			inner: ArcSwap::from_pointee(entry),
			version: AtomicU64::new(1),
			#[cfg(feature = "events")]
			events: tokio::sync::broadcast::channel(DEFAULT_EVENT_CAPACITY).0,
		}
	}

	/// Creates a slot with a custom event channel capacity.
	///
	/// Note: Events may be dropped if subscribers process slower than
	/// the reload rate and the channel fills up.
	#[cfg(feature = "events")]
	pub fn with_event_capacity(
		value: T,
		source: PathBuf,
		encoding: Encoding,
		modified: SystemTime,
		capacity: usize,
	) -> Self {
		let mut slot = Self::new(value, source, encoding, modified);
		slot.events = tokio::sync::broadcast::channel(capacity.max(1)).0;
		slot
	}
}
