/* src/signal/worker.rs */

use tokio::sync::{broadcast, mpsc};

use super::target::FileTarget;
use super::{Event, EventKind};

pub(crate) async fn forward_events(
	mut raw_rx: mpsc::Receiver<notify::Result<notify::Event>>,
	user_tx: broadcast::Sender<Event>,
	target: FileTarget,
) {
	while let Some(res) = raw_rx.recv().await {
		match res {
			Ok(event) => {
				for event in translate(event, &target) {
					tracing::trace!("{:?} {:?}", event.kind, event.path);
					let _ = user_tx.send(event);
				}
			}
			Err(e) => tracing::error!("Notify error: {:?}", e),
		}
	}
}

fn translate(event: notify::Event, target: &FileTarget) -> Vec<Event> {
	use notify::EventKind as NK;
	let kind = match event.kind {
		NK::Create(_) => EventKind::Create,
		NK::Remove(_) => EventKind::Remove,
		// Unclassified events may still carry a write.
		NK::Modify(_) | NK::Any | NK::Other => EventKind::Modify,
		NK::Access(_) => return Vec::new(),
	};

	event
		.paths
		.into_iter()
		.filter(|path| target.matches(path))
		.map(|path| Event { path, kind })
		.collect()
}
