/* src/controller/watched.rs */

//!
//! Single-file JSON configuration with reload on modification.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use serde::de::DeserializeOwned;

#[cfg(feature = "events")]
use crate::holder::HoldEvent;
use crate::holder::{Entry, Meta};
use crate::loader::{Encoding, FileSource, LoadError, Loader};
#[cfg(feature = "watch")]
use crate::signal::{WatchConfig, Watcher};

use super::Error;
#[cfg(feature = "watch")]
use super::WatchState;
use super::reload::{CheckFn, ErrorHook, ReloadOutcome, Shared};

/// A typed JSON configuration file that keeps itself current.
///
/// Construction reads and decodes the file before returning and, unless
/// disabled, starts watching it. Each change notification whose reported
/// modification time is strictly later than the last one seen reloads the
/// file and replaces the held value wholesale. A failed reload keeps the
/// last good value.
///
/// Nothing is debounced, so a plain (non-atomic) save can be observed
/// half-written. An empty read fails with [`LoadError::Empty`] and is logged
/// at `warn`; a partially written document surfaces as a transient parse
/// failure. Either way the next notification for the finished write reloads.
///
/// Readers get an `Arc<T>` snapshot from [`value`](WatchedConfig::value);
/// a snapshot held across a reload keeps showing the old value.
pub struct WatchedConfig<T> {
	shared: Arc<Shared<T>>,
	#[cfg(feature = "watch")]
	watch_state: Option<WatchState>,
}

/// Alternative name for [`WatchedConfig`].
pub type ConfigHolder<T> = WatchedConfig<T>;

#[cfg(feature = "watch")]
impl<T> Drop for WatchedConfig<T> {
	fn drop(&mut self) {
		if let Some(state) = self.watch_state.take() {
			state.stop();
		}
	}
}

/// Builder for WatchedConfig.
pub struct WatchedConfigBuilder<T> {
	path: PathBuf,
	encoding: Encoding,
	#[cfg(feature = "watch")]
	watch: Option<WatchConfig>,
	check: Option<CheckFn<T>>,
	on_error: Option<ErrorHook>,
	#[cfg(feature = "events")]
	event_capacity: usize,
}

impl<T> WatchedConfigBuilder<T>
where
	T: DeserializeOwned + Send + Sync + 'static,
{
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			encoding: Encoding::default(),
			#[cfg(feature = "watch")]
			watch: Some(WatchConfig::default()),
			check: None,
			on_error: None,
			#[cfg(feature = "events")]
			event_capacity: crate::holder::DEFAULT_EVENT_CAPACITY,
		}
	}

	pub fn encoding(mut self, encoding: Encoding) -> Self {
		self.encoding = encoding;
		self
	}

	/// Watch with the given configuration once loaded.
	#[cfg(feature = "watch")]
	pub fn watch_config(mut self, config: WatchConfig) -> Self {
		self.watch = Some(config);
		self
	}

	/// Enable or disable watching. Disabled holders only reload on
	/// [`check_now`](WatchedConfig::check_now) or [`reload`](WatchedConfig::reload).
	#[cfg(feature = "watch")]
	pub fn watching(mut self, enabled: bool) -> Self {
		self.watch = match (enabled, self.watch.take()) {
			(false, _) => None,
			(true, Some(config)) => Some(config),
			(true, None) => Some(WatchConfig::default()),
		};
		self
	}

	/// Adds a check run on every decoded value. A failing check fails the
	/// load just like a parse error. Checks run in the order they were added.
	pub fn check<F>(mut self, f: F) -> Self
	where
		F: Fn(&T) -> Result<(), LoadError> + Send + Sync + 'static,
	{
		let check: CheckFn<T> = match self.check.take() {
			None => Arc::new(f),
			Some(prev) => Arc::new(move |value: &T| {
				prev(value)?;
				f(value)
			}),
		};
		self.check = Some(check);
		self
	}

	/// Called with every failure after construction (reload, stat, check).
	pub fn on_error<F>(mut self, f: F) -> Self
	where
		F: Fn(&LoadError) + Send + Sync + 'static,
	{
		self.on_error = Some(Arc::new(f));
		self
	}

	#[cfg(feature = "events")]
	pub fn event_capacity(mut self, capacity: usize) -> Self {
		self.event_capacity = capacity;
		self
	}

	/// Loads the file and, if enabled, starts watching it.
	///
	/// Watching spawns a task, so this must run inside a tokio runtime.
	pub async fn open(self) -> Result<WatchedConfig<T>, Error> {
		let path = tokio::fs::canonicalize(&self.path)
			.await
			.unwrap_or_else(|_| self.path.clone());

		#[cfg(feature = "events")]
		let event_capacity = self.event_capacity;
		#[cfg(not(feature = "events"))]
		let event_capacity = 0;

		let shared = Shared::open(
			path,
			Loader::new(FileSource::new(), self.encoding),
			self.check,
			self.on_error,
			event_capacity,
		)
		.await?;

		#[allow(unused_mut)]
		let mut config = WatchedConfig {
			shared: Arc::new(shared),
			#[cfg(feature = "watch")]
			watch_state: None,
		};

		#[cfg(feature = "watch")]
		if let Some(watch) = self.watch {
			config.start_watching(watch)?;
		}

		Ok(config)
	}
}

#[cfg(feature = "validate")]
impl<T> WatchedConfigBuilder<T>
where
	T: DeserializeOwned + validator::Validate + Send + Sync + 'static,
{
	/// Runs `validator` rules on every decoded value.
	pub fn validate(self) -> Self {
		self.check(|value: &T| value.validate().map_err(LoadError::Validation))
	}
}

impl<T> WatchedConfig<T>
where
	T: DeserializeOwned + Send + Sync + 'static,
{
	pub fn builder(path: impl Into<PathBuf>) -> WatchedConfigBuilder<T> {
		WatchedConfigBuilder::new(path)
	}

	/// Loads a UTF-8 file and watches it with the default configuration.
	pub async fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
		Self::builder(path).open().await
	}

	/// Loads a file in the given encoding and watches it with the default configuration.
	pub async fn open_with_encoding(
		path: impl Into<PathBuf>,
		encoding: Encoding,
	) -> Result<Self, Error> {
		Self::builder(path).encoding(encoding).open().await
	}

	/// Returns the current value. Never touches the file.
	///
	/// Consecutive calls return the same `Arc` until a reload happens.
	pub fn value(&self) -> Arc<T> {
		self.shared.slot.get()
	}

	/// The current value and its metadata as one consistent snapshot.
	pub fn entry(&self) -> Entry<T> {
		self.shared.slot.entry()
	}

	pub fn meta(&self) -> Meta {
		self.shared.slot.meta()
	}

	/// Modification time of the file as of the last successful load.
	pub fn last_modified(&self) -> SystemTime {
		self.shared.slot.meta().modified
	}

	/// When the current value was installed.
	pub fn loaded_at(&self) -> SystemTime {
		self.shared.slot.meta().loaded_at
	}

	/// 1 after construction, incremented by every successful reload.
	pub fn version(&self) -> u64 {
		self.shared.slot.version()
	}

	pub fn path(&self) -> &Path {
		&self.shared.path
	}

	pub fn encoding(&self) -> Encoding {
		self.shared.loader.encoding()
	}

	/// Does what a change notification does: reloads if the file's
	/// modification time is strictly later than the last one seen.
	///
	/// Failures are also logged and reported to hooks and subscribers.
	pub async fn check_now(&self) -> Result<ReloadOutcome, Error> {
		Ok(self.shared.check_now().await?)
	}

	/// Reloads unconditionally. Returns the new version.
	pub async fn reload(&self) -> Result<u64, Error> {
		Ok(self.shared.reload().await?)
	}

	/// Subscribes to reload events.
	#[cfg(feature = "events")]
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<HoldEvent<T>> {
		self.shared.slot.subscribe()
	}

	/// Reload events as a `Stream`.
	#[cfg(feature = "stream")]
	pub fn stream(&self) -> crate::holder::EventStream<T> {
		self.shared.slot.stream()
	}

	/// Attaches a filesystem watcher, replacing any previous one.
	///
	/// Must be called inside a tokio runtime.
	#[cfg(feature = "watch")]
	pub fn start_watching(&mut self, config: WatchConfig) -> Result<(), Error> {
		self.stop_watching();

		let watcher = Watcher::new(&self.shared.path, config)?;
		let mut rx = watcher.subscribe();
		let shared = Arc::clone(&self.shared);

		let handle = tokio::spawn(async move {
			use tokio::sync::broadcast::error::RecvError;

			tracing::info!("Started watching config {:?}", shared.path);
			// Catch writes that landed between the initial load and the watch.
			let _ = shared.check_now().await;
			loop {
				match rx.recv().await {
					Ok(event) => {
						tracing::debug!("{:?} on {:?}", event.kind, event.path);
					}
					Err(RecvError::Lagged(missed)) => {
						tracing::warn!("Missed {} notifications for {:?}", missed, shared.path);
					}
					Err(RecvError::Closed) => break,
				}
				// Failures are already logged and reported inside.
				let _ = shared.check_now().await;
			}
			tracing::info!("Stopped watching config {:?}", shared.path);
		});

		self.watch_state = Some(WatchState {
			watcher,
			abort_handle: handle.abort_handle(),
		});
		Ok(())
	}

	/// Attaches a filesystem watcher (consuming version).
	#[cfg(feature = "watch")]
	pub fn watch(mut self, config: WatchConfig) -> Result<Self, Error> {
		self.start_watching(config)?;
		Ok(self)
	}

	/// Releases the file watch. The held value stays readable and
	/// [`check_now`](WatchedConfig::check_now) keeps working.
	#[cfg(feature = "watch")]
	#[doc(alias = "unwatch")]
	pub fn stop_watching(&mut self) {
		if let Some(state) = self.watch_state.take() {
			state.stop();
		}
	}

	/// Returns true if the watcher is currently active.
	#[cfg(feature = "watch")]
	pub fn is_watching(&self) -> bool {
		self.watch_state.is_some()
	}
}

impl<T> std::fmt::Debug for WatchedConfig<T>
where
	T: std::fmt::Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let entry = self.shared.slot.entry();
		let mut s = f.debug_struct("WatchedConfig");
		s.field("path", &self.shared.path);
		s.field("value", &entry.value);
		s.field("version", &entry.meta.version);
		#[cfg(feature = "watch")]
		s.field("watching", &self.watch_state.is_some());
		s.finish_non_exhaustive()
	}
}
