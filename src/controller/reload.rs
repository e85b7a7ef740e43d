/* src/controller/reload.rs */

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

#[cfg(feature = "events")]
use crate::holder::HoldEvent;
use crate::holder::Slot;
use crate::loader::{FileSource, LoadError, Loaded, Loader};

/// Post-decode check applied to every loaded value.
pub type CheckFn<T> = Arc<dyn Fn(&T) -> Result<(), LoadError> + Send + Sync>;

/// Callback invoked with every reload failure.
pub type ErrorHook = Arc<dyn Fn(&LoadError) + Send + Sync>;

/// What a change check did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
	/// The file's modification time advanced and the new value is installed.
	Reloaded { version: u64 },
	/// The modification time did not advance past the last one seen.
	Unchanged,
	/// The file is gone. The previous value is kept.
	Missing,
}

/// Reload only when the file reports a strictly later modification time.
pub(crate) fn advanced(seen: SystemTime, current: SystemTime) -> bool {
	current > seen
}

/// State shared between the owning handle and the watch task.
pub(crate) struct Shared<T> {
	pub(crate) slot: Slot<T>,
	pub(crate) loader: Loader<FileSource>,
	pub(crate) path: PathBuf,
	check: Option<CheckFn<T>>,
	on_error: Option<ErrorHook>,
	/// Latest modification time a reload was attempted for.
	///
	/// Also serializes reloads, so the watch task and a manual check never
	/// interleave. Advances even when the attempt fails, so a broken file
	/// is reported once per write rather than once per notification.
	seen: Mutex<SystemTime>,
}

impl<T> Shared<T>
where
	T: DeserializeOwned + Send + Sync + 'static,
{
	/// Performs the initial load. Fails instead of producing a half-initialized holder.
	pub(crate) async fn open(
		path: PathBuf,
		loader: Loader<FileSource>,
		check: Option<CheckFn<T>>,
		on_error: Option<ErrorHook>,
		event_capacity: usize,
	) -> Result<Self, LoadError> {
		let loaded = load_checked(&loader, &path, check.as_ref()).await?;
		let modified = loaded.modified.unwrap_or_else(SystemTime::now);

		#[cfg(feature = "events")]
		let slot = Slot::with_event_capacity(
			loaded.value,
			path.clone(),
			loader.encoding(),
			modified,
			event_capacity,
		);
		#[cfg(not(feature = "events"))]
		let slot = {
			let _ = event_capacity;
			Slot::new(loaded.value, path.clone(), loader.encoding(), modified)
		};

		info!("Loaded config {:?} ({})", path, loader.encoding());

		Ok(Self {
			slot,
			loader,
			path,
			check,
			on_error,
			seen: Mutex::new(modified),
		})
	}

	/// Handles one change notification: stat, compare, reload if advanced.
	pub(crate) async fn check_now(&self) -> Result<ReloadOutcome, LoadError> {
		let mut seen = self.seen.lock().await;

		let current = match self.loader.modified(&self.path).await {
			// No modification times on this platform: every notification counts.
			Ok(None) => SystemTime::now(),
			Ok(Some(time)) => time,
			Err(LoadError::NotFound) => {
				warn!("Config {:?} is missing, keeping last loaded value", self.path);
				#[cfg(feature = "events")]
				self.slot.emit(HoldEvent::Missing {
					source: self.path.clone(),
				});
				return Ok(ReloadOutcome::Missing);
			}
			Err(e) => return Err(self.report(e)),
		};

		if !advanced(*seen, current) {
			debug!("Config {:?} not modified since {:?}", self.path, *seen);
			return Ok(ReloadOutcome::Unchanged);
		}

		let previous = std::mem::replace(&mut *seen, current);
		match self.install().await {
			Ok(version) => Ok(ReloadOutcome::Reloaded { version }),
			// The writer has truncated but not yet written. Keep the old
			// watermark so a write within the same mtime tick still reloads.
			Err(LoadError::Empty) => {
				*seen = previous;
				Err(self.report(LoadError::Empty))
			}
			Err(e) => Err(self.report(e)),
		}
	}

	/// Reloads regardless of the modification time.
	pub(crate) async fn reload(&self) -> Result<u64, LoadError> {
		let mut seen = self.seen.lock().await;
		match self.install().await {
			Ok(version) => {
				*seen = (*seen).max(self.slot.meta().modified);
				Ok(version)
			}
			Err(e) => Err(self.report(e)),
		}
	}

	/// Caller must hold `seen`.
	async fn install(&self) -> Result<u64, LoadError> {
		let loaded = load_checked(&self.loader, &self.path, self.check.as_ref()).await?;
		let modified = loaded.modified.unwrap_or_else(SystemTime::now);

		self.slot.replace(loaded.value, modified);
		let meta = self.slot.meta();

		info!(
			reloaded_at = unix_seconds(meta.loaded_at),
			"Config reloaded: {:?} (version {})", self.path, meta.version
		);
		Ok(meta.version)
	}

	fn report(&self, e: LoadError) -> LoadError {
		if matches!(e, LoadError::Empty) {
			warn!("Config {:?} is empty, keeping last loaded value", self.path);
		} else {
			error!("Failed to reload config {:?}: {}", self.path, e);
		}

		if let Some(hook) = &self.on_error {
			hook(&e);
		}

		#[cfg(feature = "events")]
		self.slot.emit(HoldEvent::Failed {
			source: self.path.clone(),
			error: e.clone(),
		});

		e
	}
}

async fn load_checked<T>(
	loader: &Loader<FileSource>,
	path: &std::path::Path,
	check: Option<&CheckFn<T>>,
) -> Result<Loaded<T>, LoadError>
where
	T: DeserializeOwned,
{
	let loaded = loader.load::<T>(path).await?;
	if let Some(check) = check {
		check(&loaded.value)?;
	}
	Ok(loaded)
}

fn unix_seconds(time: SystemTime) -> u64 {
	time.duration_since(UNIX_EPOCH)
		.map(|d| d.as_secs())
		.unwrap_or_default()
}
