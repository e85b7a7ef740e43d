/* src/lib.rs */

//!
//! A typed JSON configuration file that reloads itself when the file's
//! modification time advances.
//!
//! The crate is split into four modules:
//!
//! - **holder**: Lock-free, atomically replaced storage for the current value.
//! - **loader**: Byte sources, text encodings and JSON decoding.
//! - **signal**: Filesystem notifications for a single file.
//! - **controller**: [`WatchedConfig`], integrating the above.
//!
//! ## Feature Flags
//!
//! - `watch` (default): Enables the `signal` module and automatic reloading.
//! - `events` (default): Enables reload event broadcasting.
//! - `stream`: Exposes reload events as a `futures` `Stream`.
//! - `validate`: Enables `validator` rules as a load step.
//! - `serde`: Derives `Serialize`/`Deserialize` for watcher configuration.
//! - `full`: Enables all features.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use serde::Deserialize;
//! use watched_config::WatchedConfig;
//!
//! #[derive(Debug, Deserialize)]
//! struct Settings {
//! 	retries: u32,
//! }
//!
//! # async fn run() -> Result<(), watched_config::Error> {
//! let config = WatchedConfig::<Settings>::open("settings.json").await?;
//! println!("retries = {}", config.value().retries);
//! # Ok(())
//! # }
//! ```
//!
//! See `demos/basic.rs` for a complete example.

pub mod controller;
pub mod holder;
pub mod loader;

#[cfg(feature = "watch")]
pub mod signal;

pub use controller::{ConfigHolder, Error, ReloadOutcome, WatchedConfig, WatchedConfigBuilder};
pub use loader::{Encoding, LoadError};
#[cfg(feature = "watch")]
pub use signal::{Backend, WatchConfig};
