//! Configuration sources for the layered settings system
//!
//! Each source produces a map of top-level keys to JSON values. Sources are
//! merged by [`SettingsBuilder`](crate::SettingsBuilder) in ascending
//! priority, so a source with a higher priority overrides the keys it sets.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

/// Separator between nesting levels in environment variable names.
///
/// `PALME_COMPLEX__MAX_FLOOR=10` sets `complex.max_floor`.
pub const NESTING_SEPARATOR: &str = "__";

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

/// Environment variable configuration source
///
/// Only variables starting with the prefix are considered. The prefix is
/// stripped, the remainder is lower-cased and split on
/// [`NESTING_SEPARATOR`] to address nested tables.
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	/// Create a source reading variables with the given prefix
	///
	/// # Examples
	///
	/// ```
	/// use palme_conf::{ConfigSource, EnvSource};
	///
	/// let source = EnvSource::new("PALME_");
	/// assert_eq!(source.description(), "Environment variables (prefix: PALME_)");
	/// ```
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
		}
	}

	/// Build the configuration map from an explicit list of variables
	///
	/// # Examples
	///
	/// ```
	/// use palme_conf::EnvSource;
	/// use serde_json::json;
	///
	/// let source = EnvSource::new("PALME_");
	/// let map = source.collect(vec![
	///     ("PALME_DEBUG".to_string(), "yes".to_string()),
	///     ("PALME_COMPLEX__MAX_FLOOR".to_string(), "10".to_string()),
	///     ("HOME".to_string(), "/root".to_string()),
	/// ]);
	///
	/// assert_eq!(map.get("debug"), Some(&json!(true)));
	/// assert_eq!(map.get("complex"), Some(&json!({"max_floor": 10})));
	/// assert!(!map.contains_key("home"));
	/// ```
	pub fn collect<I>(&self, vars: I) -> IndexMap<String, Value>
	where
		I: IntoIterator<Item = (String, String)>,
	{
		let mut config = IndexMap::new();

		for (key, value) in vars {
			let Some(clean_key) = key.strip_prefix(&self.prefix) else {
				continue;
			};
			let lower_key = clean_key.to_lowercase();
			let path: Vec<&str> = lower_key
				.split(NESTING_SEPARATOR)
				.filter(|segment| !segment.is_empty())
				.collect();
			let Some((last, parents)) = path.split_last() else {
				continue;
			};

			let parsed_value = parse_env_value(last, &value);
			insert_nested(&mut config, parents, last, parsed_value);
		}

		config
	}
}

fn parse_env_value(key: &str, value: &str) -> Value {
	if key == "debug" {
		match value.trim().to_lowercase().as_str() {
			"true" | "1" | "yes" | "on" => return Value::Bool(true),
			"false" | "0" | "no" | "off" => return Value::Bool(false),
			_ => {}
		}
	}

	if let Ok(num) = value.parse::<i64>() {
		Value::Number(num.into())
	} else if let Ok(b) = value.parse::<bool>() {
		Value::Bool(b)
	} else {
		Value::String(value.to_string())
	}
}

fn insert_nested(config: &mut IndexMap<String, Value>, parents: &[&str], key: &str, value: Value) {
	let Some((first, rest)) = parents.split_first() else {
		config.insert(key.to_string(), value);
		return;
	};

	let entry = config
		.entry((*first).to_string())
		.or_insert_with(|| Value::Object(Map::new()));
	if !entry.is_object() {
		*entry = Value::Object(Map::new());
	}

	let mut current = entry;
	for segment in rest {
		let Value::Object(map) = current else {
			return;
		};
		let next = map
			.entry((*segment).to_string())
			.or_insert_with(|| Value::Object(Map::new()));
		if !next.is_object() {
			*next = Value::Object(Map::new());
		}
		current = next;
	}

	if let Value::Object(map) = current {
		map.insert(key.to_string(), value);
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.collect(std::env::vars()))
	}

	fn priority(&self) -> u8 {
		100 // Highest priority
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

/// TOML file configuration source
///
/// A missing file yields an empty map so optional settings files need no
/// special handling.
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	/// Create a new TOML file configuration source
	///
	/// # Examples
	///
	/// ```
	/// use palme_conf::{ConfigSource, TomlFileSource};
	///
	/// let source = TomlFileSource::new("settings/does-not-exist.toml");
	/// assert!(source.load().unwrap().is_empty());
	/// ```
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		if !self.path.exists() {
			tracing::debug!(path = %self.path.display(), "settings file not found, skipping");
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let toml_value: toml::Value = toml::from_str(&content)?;
		let json_value = serde_json::to_value(toml_value)?;

		let map = json_value
			.as_object()
			.ok_or_else(|| SourceError::Parse("Expected table at root".to_string()))?;

		Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
	}

	fn priority(&self) -> u8 {
		50 // Medium priority
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Default values configuration source
pub struct DefaultSource {
	values: IndexMap<String, Value>,
}

impl DefaultSource {
	/// Create an empty default values source
	pub fn new() -> Self {
		Self {
			values: IndexMap::new(),
		}
	}

	/// Add a default value
	///
	/// # Examples
	///
	/// ```
	/// use palme_conf::{ConfigSource, DefaultSource};
	/// use serde_json::json;
	///
	/// let source = DefaultSource::new().with_value("log_level", json!("debug"));
	/// assert_eq!(source.load().unwrap().get("log_level"), Some(&json!("debug")));
	/// ```
	pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
		self.values.insert(key.into(), value);
		self
	}
}

impl Default for DefaultSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0 // Lowest priority
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}
