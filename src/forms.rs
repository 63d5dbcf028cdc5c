//! Cascading apartment selector and resident form validation.

pub use palme_forms::*;
