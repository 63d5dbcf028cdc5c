//! # Palme Residents
//!
//! Management of a residential complex: numbered buildings, apartments laid
//! out by floor and door, and the people living in them.
//!
//! ## Crates
//!
//! - [`conf`] - layered settings (defaults, TOML file, `PALME_` environment)
//! - [`core`] - the domain model and the thread-safe [`Directory`](core::Directory)
//! - [`forms`] - the cascading building → floor → apartment selector and the
//!   resident form validation
//!
//! [`intake`] ties the selector to the directory and [`logging`] installs the
//! `tracing` subscriber.
//!
//! ## Quick Example
//!
//! ```
//! use palme::conf::Settings;
//! use palme::core::{Directory, SeedOptions, seed_complex};
//! use palme::forms::{HtmlSelectorView, SelectorEvent};
//! use palme::intake::ResidentIntake;
//! use std::sync::Arc;
//!
//! let settings = Settings::default();
//! palme::logging::init(&settings).unwrap();
//!
//! let directory = Arc::new(Directory::from_settings(&settings.complex));
//! seed_complex(&directory, &SeedOptions { buildings: 2, max_tenants: 1, clear: false });
//!
//! let building = directory.building_by_number(2).unwrap();
//! let mut intake = ResidentIntake::open(directory, HtmlSelectorView::new(), &settings);
//! intake.handle(SelectorEvent::BuildingChanged(building.id.to_string()));
//! intake.handle(SelectorEvent::FloorChanged("5".to_string()));
//!
//! assert!(intake.selector().view().options_html().contains("Apartamento 5A"));
//! ```

pub mod conf;
pub mod core;
pub mod forms;
pub mod intake;
pub mod logging;

pub use intake::{IntakeError, ResidentIntake};
