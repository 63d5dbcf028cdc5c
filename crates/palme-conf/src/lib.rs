//! Settings management for Palme Residents
//!
//! Settings are assembled from several [`ConfigSource`]s merged in priority
//! order (environment variables > TOML file > defaults) and then converted
//! into the typed [`Settings`] structure.
//!
//! ## Example
//!
//! ```
//! use palme_conf::{DefaultSource, SettingsBuilder};
//! use serde_json::json;
//!
//! let settings = SettingsBuilder::new()
//!     .add_source(DefaultSource::new().with_value("debug", json!(true)))
//!     .build()
//!     .unwrap();
//!
//! assert!(settings.debug);
//! assert_eq!(settings.complex.max_floor, 8);
//! ```

pub mod settings;
pub mod sources;

pub use settings::{ComplexSettings, FormSettings, Settings, SettingsBuilder, SettingsError};
pub use sources::{ConfigSource, DefaultSource, EnvSource, SourceError, TomlFileSource};

/// Prefix used for environment variable overrides (e.g. `PALME_LOG_LEVEL`).
pub const ENV_PREFIX: &str = "PALME_";
