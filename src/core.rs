//! Buildings, apartments, residents and the directory that holds them.

pub use palme_core::*;
