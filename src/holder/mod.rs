/* src/holder/mod.rs */

//!
//! Lock-free storage for the current configuration value.

mod entry;
#[cfg(feature = "events")]
mod event;
mod meta;
mod slot;
#[cfg(feature = "stream")]
mod stream;

pub use entry::Entry;
#[cfg(feature = "events")]
pub use event::HoldEvent;
pub use meta::Meta;
#[cfg(feature = "events")]
pub use slot::DEFAULT_EVENT_CAPACITY;
pub use slot::Slot;
#[cfg(feature = "stream")]
pub use stream::EventStream;
