//! Settings layering tests
//!
//! Verifies precedence between defaults, TOML files and environment variables.

use palme_conf::{DefaultSource, EnvSource, Settings, SettingsBuilder, SettingsError, TomlFileSource};
use rstest::*;
use serde_json::json;
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

#[fixture]
fn settings_file() -> NamedTempFile {
	let mut file = NamedTempFile::new().unwrap();
	writeln!(
		file,
		r#"
log_level = "debug"

[complex]
max_floor = 10

[form]
option_label_prefix = "Piso"
"#
	)
	.unwrap();
	file
}

#[rstest]
fn test_toml_overrides_defaults(settings_file: NamedTempFile) {
	// Arrange
	let builder = SettingsBuilder::new()
		.add_source(DefaultSource::new().with_value("log_level", json!("warn")))
		.add_source(TomlFileSource::new(settings_file.path()));

	// Act
	let settings = builder.build().unwrap();

	// Assert
	assert_eq!(settings.log_level, "debug");
	assert_eq!(settings.complex.max_floor, 10);
	assert_eq!(settings.complex.min_floor, 1);
	assert_eq!(settings.form.option_label_prefix, "Piso");
	assert_eq!(settings.form.no_apartments, "no apartments available");
}

#[rstest]
fn test_registration_order_does_not_matter(settings_file: NamedTempFile) {
	// Arrange: defaults registered last still lose against the file
	let builder = SettingsBuilder::new()
		.add_source(TomlFileSource::new(settings_file.path()))
		.add_source(DefaultSource::new().with_value("log_level", json!("warn")));

	// Act
	let settings = builder.build().unwrap();

	// Assert
	assert_eq!(settings.log_level, "debug");
}

#[rstest]
fn test_malformed_toml_reports_source() {
	// Arrange
	let mut file = NamedTempFile::new().unwrap();
	writeln!(file, "log_level = ").unwrap();

	// Act
	let result = SettingsBuilder::new()
		.add_source(TomlFileSource::new(file.path()))
		.build();

	// Assert
	match result {
		Err(SettingsError::Source {
			source_description, ..
		}) => assert!(source_description.starts_with("TOML file:")),
		other => panic!("expected source error, got {:?}", other),
	}
}

#[rstest]
#[serial(palme_env)]
fn test_environment_wins_over_file(settings_file: NamedTempFile) {
	// Arrange
	// SAFETY: serialized with every other test touching the environment
	unsafe {
		std::env::set_var("PALME_TEST_LAYER_COMPLEX__MAX_FLOOR", "12");
		std::env::set_var("PALME_TEST_LAYER_DEBUG", "on");
	}

	// Act
	let settings = SettingsBuilder::new()
		.add_source(TomlFileSource::new(settings_file.path()))
		.add_source(EnvSource::new("PALME_TEST_LAYER_"))
		.build();

	// SAFETY: see above
	unsafe {
		std::env::remove_var("PALME_TEST_LAYER_COMPLEX__MAX_FLOOR");
		std::env::remove_var("PALME_TEST_LAYER_DEBUG");
	}

	// Assert
	let settings = settings.unwrap();
	assert_eq!(settings.complex.max_floor, 12);
	assert!(settings.debug);
	assert_eq!(settings.log_level, "debug");
}

#[rstest]
#[serial(palme_env)]
fn test_from_env_and_file_with_missing_file() {
	let settings = Settings::from_env_and_file("/nonexistent/palme.toml").unwrap();

	assert_eq!(settings.complex, Settings::default().complex);
}

#[rstest]
#[case::integer("1", "1")]
#[case::boolean("true", "true")]
#[case::text("Piso", "Piso")]
fn test_numeric_looking_env_value_fills_text_setting(#[case] raw: &str, #[case] expected: &str) {
	// Arrange
	let env = EnvSource::new("PALME_");
	let values = env.collect([(
		"PALME_FORM__OPTION_LABEL_PREFIX".to_string(),
		raw.to_string(),
	)]);
	let mut defaults = DefaultSource::new();
	for (key, value) in values {
		defaults = defaults.with_value(key, value);
	}

	// Act
	let settings = SettingsBuilder::new().add_source(defaults).build().unwrap();

	// Assert
	assert_eq!(settings.form.option_label_prefix, expected);
	assert_eq!(settings.form.missing_name, "please enter the resident's full name.");
}
