/* src/controller/mod.rs */

//!
//! The [`WatchedConfig`] controller, tying the holder, loader and signal
//! modules together.

#[cfg(feature = "watch")]
use tokio::task::AbortHandle;

#[cfg(feature = "watch")]
use crate::signal::Watcher;

#[cfg(feature = "watch")]
pub(crate) struct WatchState {
	pub watcher: Watcher,
	pub abort_handle: AbortHandle,
}

#[cfg(feature = "watch")]
impl WatchState {
	pub(crate) fn stop(self) {
		self.watcher.stop();
		self.abort_handle.abort();
	}
}

mod error;
mod reload;
mod watched;

pub use error::Error;
pub use reload::{CheckFn, ErrorHook, ReloadOutcome};
pub use watched::{ConfigHolder, WatchedConfig, WatchedConfigBuilder};
