/* src/signal/watcher.rs */

use std::path::Path;
use std::sync::Mutex;

use notify::{PollWatcher, RecursiveMode, Watcher as NotifyWatcher};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use super::target::FileTarget;
use super::worker::forward_events;
use super::{Backend, Event, Result, WatchConfig};

/// Watches one file and broadcasts every notification about it.
///
/// Must be created inside a tokio runtime. Monitoring stops on
/// [`stop`](Watcher::stop) or when the watcher is dropped.
pub struct Watcher {
	internal: Mutex<Option<Box<dyn NotifyWatcher + Send>>>,
	task_handle: JoinHandle<()>,
	event_tx: broadcast::Sender<Event>,
}

impl Watcher {
	/// Creates a new Watcher and starts monitoring immediately.
	#[must_use = "Watcher must be kept alive"]
	pub fn new(path: &Path, config: WatchConfig) -> Result<Self> {
		let capacity = config.channel_capacity.max(1);
		let target = FileTarget::new(path)?;
		let (raw_tx, raw_rx) = mpsc::channel(capacity);

		let handler = move |res: notify::Result<notify::Event>| {
			let _ = raw_tx.blocking_send(res);
		};

		let mut internal: Box<dyn NotifyWatcher + Send> = match config.backend {
			Backend::Native => Box::new(notify::recommended_watcher(handler)?),
			Backend::Poll { interval } => Box::new(PollWatcher::new(
				handler,
				notify::Config::default().with_poll_interval(interval),
			)?),
		};

		internal.watch(target.dir(), RecursiveMode::NonRecursive)?;

		let (user_tx, _) = broadcast::channel(capacity);
		let tx_clone = user_tx.clone();

		let task_handle = tokio::spawn(async move {
			forward_events(raw_rx, tx_clone, target).await;
		});

		Ok(Self {
			internal: Mutex::new(Some(internal)),
			task_handle,
			event_tx: user_tx,
		})
	}

	pub fn subscribe(&self) -> broadcast::Receiver<Event> {
		self.event_tx.subscribe()
	}

	/// Releases the OS watch and stops forwarding. Subscribers see the channel close.
	pub fn stop(&self) {
		if let Ok(mut internal) = self.internal.lock() {
			internal.take();
		}
		self.task_handle.abort();
	}
}

impl Drop for Watcher {
	fn drop(&mut self) {
		self.stop();
	}
}
