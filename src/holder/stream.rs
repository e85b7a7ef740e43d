/* src/holder/stream.rs */

use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use super::{HoldEvent, Slot};

/// [`HoldEvent`]s as a `Stream`. Yields an error item when events were dropped.
pub struct EventStream<T> {
	inner: BroadcastStream<HoldEvent<T>>,
}

impl<T> futures_util::Stream for EventStream<T>
where
	T: Send + Sync + 'static,
{
	type Item = Result<HoldEvent<T>, BroadcastStreamRecvError>;

	fn poll_next(
		mut self: std::pin::Pin<&mut Self>,
		cx: &mut std::task::Context<'_>,
	) -> std::task::Poll<Option<Self::Item>> {
		std::pin::Pin::new(&mut self.inner).poll_next(cx)
	}
}

impl<T> Slot<T>
where
	T: Send + Sync + 'static,
{
	pub fn stream(&self) -> EventStream<T> {
		EventStream {
			inner: BroadcastStream::new(self.subscribe()),
		}
	}
}
