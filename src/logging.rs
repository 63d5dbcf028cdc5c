//! Process-wide `tracing` subscriber

use palme_conf::Settings;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{EnvFilter, fmt};

/// Failure to install the subscriber
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
	#[error("invalid log level {level:?}: {source}")]
	InvalidLevel {
		level: String,
		#[source]
		source: tracing_subscriber::filter::ParseError,
	},
}

/// Install a formatted subscriber filtered by `settings.log_level`
///
/// `RUST_LOG` takes precedence when it holds a valid directive. When a global
/// subscriber is already installed, this call leaves it in place.
pub fn init(settings: &Settings) -> Result<(), LoggingError> {
	let filter = build_filter(settings)?;
	let fmt_layer = fmt::layer()
		.with_writer(std::io::stderr)
		.with_target(true)
		.with_file(settings.debug)
		.with_line_number(settings.debug);

	if tracing_subscriber::registry()
		.with(filter)
		.with(fmt_layer)
		.try_init()
		.is_err()
	{
		tracing::debug!("global subscriber already installed");
	}
	Ok(())
}

fn build_filter(settings: &Settings) -> Result<EnvFilter, LoggingError> {
	if let Ok(filter) = EnvFilter::try_from_default_env() {
		return Ok(filter);
	}
	EnvFilter::try_new(&settings.log_level).map_err(|source| LoggingError::InvalidLevel {
		level: settings.log_level.clone(),
		source,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;

	#[rstest]
	#[serial(palme_env)]
	fn test_invalid_level_is_reported() {
		// SAFETY: serialized with every other test touching the environment
		unsafe { std::env::remove_var("RUST_LOG") };
		let settings = Settings {
			log_level: "palme=loud".to_string(),
			..Settings::default()
		};

		let result = build_filter(&settings);

		assert!(matches!(result, Err(LoggingError::InvalidLevel { .. })));
	}

	#[rstest]
	#[serial(palme_env)]
	fn test_repeated_init_is_harmless() {
		let settings = Settings::default();

		assert!(init(&settings).is_ok());
		assert!(init(&settings).is_ok());
	}
}
