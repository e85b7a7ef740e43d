/* demos/basic.rs */

use std::fs;
use std::time::Duration;

use serde::Deserialize;
use watched_config::{ReloadOutcome, WatchedConfig};

#[derive(Debug, Deserialize)]
struct AppConfig {
	name: String,
	port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// 0. Prepare a real file
	let config_path = "example_config.json";
	fs::write(config_path, b"{\"name\": \"watched-demo\", \"port\": 8080}")?;
	println!("Created {}", config_path);

	// 1. Load and start watching
	let config = WatchedConfig::<AppConfig>::builder(config_path)
		.on_error(|e| eprintln!("Reload failed, keeping previous config: {}", e))
		.open()
		.await?;

	let current = config.value();
	println!("Initial config: {:?} (Port: {})", current, current.port);

	#[cfg(feature = "events")]
	{
		let mut rx = config.subscribe();
		tokio::spawn(async move {
			while let Ok(event) = rx.recv().await {
				println!("Event: {:?}", event);
			}
		});
	}

	println!(
		"Watching for changes on {}... (Edit the file to see updates)",
		config_path
	);
	println!("Waiting 20 seconds...");

	// 2. Loop to display config
	for _ in 0..10 {
		tokio::time::sleep(Duration::from_secs(2)).await;
		let current = config.value();
		println!(
			"Current config: {} on port {} (version {})",
			current.name,
			current.port,
			config.version()
		);
	}

	// 3. A final explicit check, as a notification would do
	if let ReloadOutcome::Reloaded { version } = config.check_now().await? {
		println!("Picked up a late change (version {})", version);
	}

	// Cleanup
	drop(config);
	fs::remove_file(config_path)?;
	println!("Done.");
	Ok(())
}
