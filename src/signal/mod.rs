/* src/signal/mod.rs */

//!
//! File-change notifications for a single config file.
//!
//! Every notification that concerns the target file is forwarded in the
//! order the OS (or the poller) delivers it. Nothing is debounced or
//! coalesced: deciding whether a notification is a real change is left to
//! the consumer, which compares modification times.

use std::path::PathBuf;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod target;
mod watcher;
mod worker;

pub use watcher::Watcher;

/// Custom error type for the signal module.
#[derive(thiserror::Error, Debug)]
pub enum WatchError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Notify error: {0}")]
	Notify(#[from] notify::Error),

	#[error("Invalid configuration: {0}")]
	Config(String),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, WatchError>;

/// Which notification facility drives the watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Backend {
	/// The platform's native mechanism (inotify, FSEvents, ReadDirectoryChanges).
	#[default]
	Native,
	/// Stat the file at a fixed interval and report when its metadata changes.
	///
	/// Works on network and virtual file systems where native events are not delivered.
	Poll { interval: Duration },
}

/// Configuration for the watcher behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WatchConfig {
	/// Notification facility.
	pub backend: Backend,

	/// Capacity of the channels between the notifier thread and subscribers.
	pub channel_capacity: usize,
}

impl Default for WatchConfig {
	fn default() -> Self {
		Self {
			backend: Backend::Native,
			channel_capacity: 64,
		}
	}
}

impl WatchConfig {
	/// A polling configuration with the given interval.
	pub fn poll(interval: Duration) -> Self {
		Self {
			backend: Backend::Poll { interval },
			..Self::default()
		}
	}
}

/// The kind of filesystem event we care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EventKind {
	/// File was created (including being renamed into place).
	Create,
	/// File content or metadata was modified.
	Modify,
	/// File was removed.
	Remove,
}

/// A simplified, high-level filesystem event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Event {
	/// The path the event was reported for.
	pub path: PathBuf,
	pub kind: EventKind,
}
