//! Layered settings.
//!
//! # Examples
//!
//! ```rust,no_run
//! use palme::conf::Settings;
//!
//! let settings = Settings::from_env_and_file("palme.toml").unwrap();
//! ```

pub use palme_conf::*;
