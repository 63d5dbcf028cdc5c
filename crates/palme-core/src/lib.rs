//! Domain model of a residential complex
//!
//! A complex has numbered buildings, each with a fixed number of floors and
//! two apartments per floor. The door convention depends on the building
//! number: low buildings use `A`/`B`, high buildings `I`/`D`. Every apartment
//! holds at most one owner and a bounded number of residents.
//!
//! [`Directory`] is the thread-safe registry that enforces these rules and
//! feeds the resident form with [`ApartmentRecords`](palme_forms::ApartmentRecords).

pub mod directory;
pub mod error;
pub mod models;
pub mod rules;
pub mod seed;

pub use directory::{ApartmentFilter, Directory, ResidentFilter};
pub use error::{DirectoryError, DirectoryResult};
pub use models::{Apartment, Building, NewResident, Resident, ResidentKind};
pub use rules::ComplexRules;
pub use seed::{SeedOptions, SeedReport, seed_complex};
