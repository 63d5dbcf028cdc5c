//! Typed settings and the builder that assembles them from sources

use crate::ENV_PREFIX;
use crate::sources::{ConfigSource, EnvSource, SourceError, TomlFileSource};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Errors raised while building [`Settings`]
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("failed to load {source_description}: {error}")]
	Source {
		source_description: String,
		#[source]
		error: SourceError,
	},

	#[error("invalid settings: {0}")]
	Invalid(#[from] serde_json::Error),

	#[error("inconsistent settings: {0}")]
	Inconsistent(String),
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Development mode flag
	pub debug: bool,

	/// Default `tracing` filter directive (overridden by `RUST_LOG`)
	#[serde(deserialize_with = "text")]
	pub log_level: String,

	/// Physical layout rules of the complex
	pub complex: ComplexSettings,

	/// User-facing strings of the resident form
	pub form: FormSettings,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			debug: false,
			log_level: "info".to_string(),
			complex: ComplexSettings::default(),
			form: FormSettings::default(),
		}
	}
}

impl Settings {
	/// Load settings from an optional TOML file and `PALME_` environment variables
	///
	/// A missing file is not an error; built-in defaults fill every key that
	/// neither source sets.
	pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		SettingsBuilder::new()
			.add_source(TomlFileSource::new(path.as_ref()))
			.add_source(EnvSource::new(ENV_PREFIX))
			.build()
	}

	fn check(&self) -> Result<(), SettingsError> {
		let complex = &self.complex;
		if complex.min_building_number > complex.max_building_number {
			return Err(SettingsError::Inconsistent(format!(
				"building numbers {}..={} are empty",
				complex.min_building_number, complex.max_building_number
			)));
		}
		if complex.min_floor > complex.max_floor {
			return Err(SettingsError::Inconsistent(format!(
				"floors {}..={} are empty",
				complex.min_floor, complex.max_floor
			)));
		}
		if complex.max_residents_per_apartment == 0 {
			return Err(SettingsError::Inconsistent(
				"max_residents_per_apartment must be at least 1".to_string(),
			));
		}
		Ok(())
	}
}

/// Layout rules of the residential complex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexSettings {
	pub min_building_number: u32,
	pub max_building_number: u32,
	pub min_floor: i32,
	pub max_floor: i32,
	/// Buildings numbered up to this value use doors `A`/`B`, the rest `I`/`D`
	pub ab_doors_up_to: u32,
	pub max_residents_per_apartment: usize,
}

impl Default for ComplexSettings {
	fn default() -> Self {
		Self {
			min_building_number: 1,
			max_building_number: 32,
			min_floor: 1,
			max_floor: 8,
			ab_doors_up_to: 22,
			max_residents_per_apartment: 6,
		}
	}
}

/// Strings shown by the resident form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
	#[serde(deserialize_with = "text")]
	pub apartment_placeholder: String,
	#[serde(deserialize_with = "text")]
	pub info_placeholder: String,
	#[serde(deserialize_with = "text")]
	pub no_apartments: String,
	#[serde(deserialize_with = "text")]
	pub option_label_prefix: String,
	#[serde(deserialize_with = "text")]
	pub info_building_label: String,
	#[serde(deserialize_with = "text")]
	pub info_floor_label: String,
	#[serde(deserialize_with = "text")]
	pub info_apartment_label: String,
	#[serde(deserialize_with = "text")]
	pub missing_name: String,
	#[serde(deserialize_with = "text")]
	pub missing_type: String,
	#[serde(deserialize_with = "text")]
	pub missing_apartment: String,
	#[serde(deserialize_with = "text")]
	pub missing_building_or_floor: String,
}

impl Default for FormSettings {
	fn default() -> Self {
		Self {
			apartment_placeholder: "select an apartment".to_string(),
			info_placeholder: "select an apartment to view information".to_string(),
			no_apartments: "no apartments available".to_string(),
			option_label_prefix: "Apartamento".to_string(),
			info_building_label: "Building".to_string(),
			info_floor_label: "Floor".to_string(),
			info_apartment_label: "Apartment".to_string(),
			missing_name: "please enter the resident's full name.".to_string(),
			missing_type: "please select the resident type.".to_string(),
			missing_apartment: "please select an apartment.".to_string(),
			missing_building_or_floor: "please select both the building and the floor.".to_string(),
		}
	}
}

/// Read a text setting that a source may have typed as a number or bool
///
/// Environment values such as `PALME_FORM__OPTION_LABEL_PREFIX=1` arrive as
/// numbers; text fields take them back as written.
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: serde::Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Scalar {
		Text(String),
		Integer(i64),
		Float(f64),
		Bool(bool),
	}

	Ok(match Scalar::deserialize(deserializer)? {
		Scalar::Text(text) => text,
		Scalar::Integer(n) => n.to_string(),
		Scalar::Float(n) => n.to_string(),
		Scalar::Bool(b) => b.to_string(),
	})
}

/// Builder merging configuration sources into [`Settings`]
///
/// # Examples
///
/// ```
/// use palme_conf::{DefaultSource, SettingsBuilder};
/// use serde_json::json;
///
/// let settings = SettingsBuilder::new()
///     .add_source(DefaultSource::new().with_value("complex", json!({"max_floor": 12})))
///     .build()
///     .unwrap();
///
/// assert_eq!(settings.complex.max_floor, 12);
/// // Keys not provided keep their built-in defaults
/// assert_eq!(settings.complex.min_floor, 1);
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	/// Create a builder with no sources
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a configuration source
	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Merge all sources and convert the result into [`Settings`]
	pub fn build(mut self) -> Result<Settings, SettingsError> {
		// Stable sort keeps registration order among equal priorities
		self.sources.sort_by_key(|source| source.priority());

		let mut merged = Map::new();
		for source in &self.sources {
			let values = source.load().map_err(|error| SettingsError::Source {
				source_description: source.description(),
				error,
			})?;
			tracing::debug!(
				source = %source.description(),
				keys = values.len(),
				"merging settings source"
			);
			for (key, value) in values {
				merge_value(&mut merged, key, value);
			}
		}

		let settings: Settings = serde_json::from_value(Value::Object(merged))?;
		settings.check()?;
		Ok(settings)
	}
}

fn merge_value(target: &mut Map<String, Value>, key: String, value: Value) {
	match target.get_mut(&key) {
		Some(Value::Object(existing)) if value.is_object() => {
			if let Value::Object(incoming) = value {
				for (k, v) in incoming {
					merge_value(existing, k, v);
				}
			}
		}
		_ => {
			target.insert(key, value);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sources::DefaultSource;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_defaults_without_sources() {
		let settings = SettingsBuilder::new().build().unwrap();

		assert_eq!(settings, Settings::default());
		assert_eq!(settings.form.option_label_prefix, "Apartamento");
		assert_eq!(settings.complex.max_residents_per_apartment, 6);
	}

	#[rstest]
	fn test_nested_tables_merge_key_by_key() {
		let mut target = Map::new();
		merge_value(&mut target, "form".to_string(), json!({"a": 1, "b": 2}));
		merge_value(&mut target, "form".to_string(), json!({"b": 3}));

		assert_eq!(Value::Object(target), json!({"form": {"a": 1, "b": 3}}));
	}

	#[rstest]
	fn test_inconsistent_floor_range_rejected() {
		let result = SettingsBuilder::new()
			.add_source(
				DefaultSource::new().with_value("complex", json!({"min_floor": 5, "max_floor": 2})),
			)
			.build();

		assert!(matches!(result, Err(SettingsError::Inconsistent(_))));
	}

	#[rstest]
	fn test_wrong_type_is_invalid() {
		let result = SettingsBuilder::new()
			.add_source(DefaultSource::new().with_value("debug", json!("not-a-bool")))
			.build();

		assert!(matches!(result, Err(SettingsError::Invalid(_))));
	}
}
