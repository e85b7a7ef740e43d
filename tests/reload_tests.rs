/* tests/reload_tests.rs */

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{Settings, earlier, later, unwatched, write_with_mtime};
use serde_json::json;
use watched_config::{Encoding, Error, LoadError, ReloadOutcome, WatchedConfig};

async fn open_unwatched(path: &std::path::Path) -> WatchedConfig<Settings> {
	unwatched(WatchedConfig::<Settings>::builder(path))
		.open()
		.await
		.unwrap()
}

#[tokio::test]
async fn test_construct_loads_value() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("settings.json");
	std::fs::write(&path, "{\"retries\": 3}")?;

	let config = open_unwatched(&path).await;

	assert_eq!(config.value().retries, 3);
	assert!(Arc::ptr_eq(&config.value(), &config.value()));
	assert_eq!(config.version(), 1);
	assert_eq!(config.encoding(), Encoding::Utf8);
	assert_eq!(config.last_modified(), std::fs::metadata(&path)?.modified()?);
	#[cfg(feature = "watch")]
	assert!(!config.is_watching());
	Ok(())
}

#[tokio::test]
async fn test_construct_missing_file_fails() {
	let dir = tempfile::tempdir().unwrap();
	let err = WatchedConfig::<Settings>::open(dir.path().join("absent.json"))
		.await
		.unwrap_err();

	assert!(matches!(err, Error::Load(LoadError::NotFound)));
}

#[tokio::test]
async fn test_construct_malformed_json_fails() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("broken.json");
	std::fs::write(&path, "{invalid").unwrap();

	let err = WatchedConfig::<Settings>::open(&path).await.unwrap_err();
	assert!(matches!(err.as_load(), Some(LoadError::Parse(_))));
}

#[tokio::test]
async fn test_construct_wrong_shape_is_schema_mismatch() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("array.json");
	std::fs::write(&path, "[1,2,3]").unwrap();

	let err = WatchedConfig::<Settings>::open(&path).await.unwrap_err();
	assert!(matches!(err.as_load(), Some(LoadError::SchemaMismatch(_))));
}

#[tokio::test]
async fn test_untyped_holder_exposes_array_uncoerced() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("array.json");
	std::fs::write(&path, "[1,2,3]").unwrap();

	let config = unwatched(WatchedConfig::<serde_json::Value>::builder(&path))
		.open()
		.await
		.unwrap();

	assert_eq!(*config.value(), json!([1, 2, 3]));
}

#[tokio::test]
async fn test_later_mtime_reloads() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("settings.json");
	std::fs::write(&path, "{\"retries\": 3}")?;

	let config = open_unwatched(&path).await;
	let before = config.value();
	let next = later(config.last_modified(), 5);

	write_with_mtime(&path, "{\"retries\": 5}", next)?;

	// Nothing changes until a notification or an explicit check.
	assert_eq!(config.value().retries, 3);

	let outcome = config.check_now().await?;
	assert_eq!(outcome, ReloadOutcome::Reloaded { version: 2 });
	assert_eq!(config.value().retries, 5);
	assert_eq!(config.last_modified(), next);
	assert_eq!(config.version(), 2);
	assert_eq!(before.retries, 3);
	Ok(())
}

#[tokio::test]
async fn test_equal_or_earlier_mtime_is_ignored() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("settings.json");
	std::fs::write(&path, "{\"retries\": 3}")?;

	let config = open_unwatched(&path).await;
	let base = config.last_modified();

	write_with_mtime(&path, "{\"retries\": 7}", base)?;
	assert_eq!(config.check_now().await?, ReloadOutcome::Unchanged);

	write_with_mtime(&path, "{\"retries\": 8}", earlier(base, 5))?;
	assert_eq!(config.check_now().await?, ReloadOutcome::Unchanged);

	assert_eq!(config.value().retries, 3);
	assert_eq!(config.last_modified(), base);
	assert_eq!(config.version(), 1);
	Ok(())
}

#[tokio::test]
async fn test_failed_reload_keeps_last_good_value() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("settings.json");
	std::fs::write(&path, "{\"retries\": 3}")?;

	let failures = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&failures);
	let config = unwatched(WatchedConfig::<Settings>::builder(&path))
		.on_error(move |_| {
			counter.fetch_add(1, Ordering::SeqCst);
		})
		.open()
		.await?;
	let base = config.last_modified();

	write_with_mtime(&path, "{invalid", later(base, 5))?;
	let err = config.check_now().await.unwrap_err();
	assert!(matches!(err.as_load(), Some(LoadError::Parse(_))));
	assert_eq!(config.value().retries, 3);
	assert_eq!(config.last_modified(), base);
	assert_eq!(failures.load(Ordering::SeqCst), 1);

	// Same broken write, repeated notification: not retried.
	assert_eq!(config.check_now().await?, ReloadOutcome::Unchanged);
	assert_eq!(failures.load(Ordering::SeqCst), 1);

	write_with_mtime(&path, "{\"retries\": 4}", later(base, 10))?;
	assert_eq!(
		config.check_now().await?,
		ReloadOutcome::Reloaded { version: 2 }
	);
	assert_eq!(config.value().retries, 4);
	Ok(())
}

#[tokio::test]
async fn test_missing_file_keeps_value_until_recreated() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("settings.json");
	std::fs::write(&path, "{\"retries\": 3}")?;

	let config = open_unwatched(&path).await;
	let base = config.last_modified();

	std::fs::remove_file(&path)?;
	assert_eq!(config.check_now().await?, ReloadOutcome::Missing);
	assert_eq!(config.value().retries, 3);

	write_with_mtime(&path, "{\"retries\": 9}", later(base, 5))?;
	assert!(matches!(
		config.check_now().await?,
		ReloadOutcome::Reloaded { .. }
	));
	assert_eq!(config.value().retries, 9);
	Ok(())
}

#[tokio::test]
async fn test_truncated_read_retries_at_same_mtime() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("settings.json");
	std::fs::write(&path, "{\"retries\": 3}")?;

	let config = open_unwatched(&path).await;
	let next = later(config.last_modified(), 5);

	// A plain save seen between truncate and write.
	write_with_mtime(&path, "", next)?;
	let err = config.check_now().await.unwrap_err();
	assert!(matches!(err.as_load(), Some(LoadError::Empty)));
	assert_eq!(config.value().retries, 3);

	// The finished write lands within the same mtime tick.
	write_with_mtime(&path, "{\"retries\": 4}", next)?;
	assert_eq!(
		config.check_now().await?,
		ReloadOutcome::Reloaded { version: 2 }
	);
	assert_eq!(config.value().retries, 4);
	assert_eq!(config.last_modified(), next);
	Ok(())
}

#[tokio::test]
async fn test_construct_empty_file_fails() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("empty.json");
	std::fs::write(&path, " \n").unwrap();

	let err = WatchedConfig::<Settings>::open(&path).await.unwrap_err();
	assert!(matches!(err, Error::Load(LoadError::Empty)));
}

#[tokio::test]
async fn test_forced_reload_ignores_mtime() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("settings.json");
	std::fs::write(&path, "{\"retries\": 3}")?;

	let config = open_unwatched(&path).await;
	write_with_mtime(&path, "{\"retries\": 6}", config.last_modified())?;

	assert_eq!(config.reload().await?, 2);
	assert_eq!(config.value().retries, 6);
	Ok(())
}

#[tokio::test]
async fn test_checks_run_in_order_and_reject() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("settings.json");
	std::fs::write(&path, "{\"retries\": 3}")?;

	let config = unwatched(WatchedConfig::<Settings>::builder(&path))
		.check(|s: &Settings| {
			if s.retries == 0 {
				Err(LoadError::Check("retries must be positive".into()))
			} else {
				Ok(())
			}
		})
		.check(|s: &Settings| {
			if s.retries > 10 {
				Err(LoadError::Check("too many retries".into()))
			} else {
				Ok(())
			}
		})
		.open()
		.await?;
	let base = config.last_modified();

	write_with_mtime(&path, "{\"retries\": 0}", later(base, 1))?;
	let err = config.check_now().await.unwrap_err();
	assert_eq!(err.to_string(), "Load error: check failed: retries must be positive");

	write_with_mtime(&path, "{\"retries\": 11}", later(base, 2))?;
	let err = config.check_now().await.unwrap_err();
	assert!(err.to_string().contains("too many retries"));

	assert_eq!(config.value().retries, 3);
	Ok(())
}

#[tokio::test]
async fn test_utf16_file() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("wide.json");
	let bytes: Vec<u8> = "{\"retries\": 2}"
		.encode_utf16()
		.flat_map(u16::to_le_bytes)
		.collect();
	std::fs::write(&path, bytes)?;

	let config = unwatched(WatchedConfig::<Settings>::builder(&path))
		.encoding("utf-16le".parse()?)
		.open()
		.await?;

	assert_eq!(config.value().retries, 2);
	assert_eq!(config.meta().encoding, Encoding::Utf16Le);
	Ok(())
}

#[cfg(feature = "events")]
#[tokio::test]
async fn test_events_report_updates_and_failures() -> Result<(), Box<dyn std::error::Error>> {
	use watched_config::holder::HoldEvent;

	let dir = tempfile::tempdir()?;
	let path = dir.path().join("settings.json");
	std::fs::write(&path, "{\"retries\": 3}")?;

	let config = open_unwatched(&path).await;
	let mut rx = config.subscribe();
	let base = config.last_modified();

	write_with_mtime(&path, "{\"retries\": 4}", later(base, 1))?;
	config.check_now().await?;
	match rx.try_recv()? {
		HoldEvent::Updated { old, new, meta } => {
			assert_eq!(old.retries, 3);
			assert_eq!(new.retries, 4);
			assert_eq!(meta.version, 2);
		}
		other => panic!("Expected Updated, got {:?}", other),
	}

	write_with_mtime(&path, "[]", later(base, 2))?;
	assert!(config.check_now().await.is_err());
	match rx.try_recv()? {
		HoldEvent::Failed { source, error } => {
			assert_eq!(source, config.path());
			assert!(matches!(error, LoadError::SchemaMismatch(_)));
		}
		other => panic!("Expected Failed, got {:?}", other),
	}

	std::fs::remove_file(&path)?;
	config.check_now().await?;
	assert!(matches!(rx.try_recv()?, HoldEvent::Missing { .. }));
	Ok(())
}
