//! Domain types shared across all shop services.
//!
//! Identifiers and peer payloads. Plain serde types with no framework dependencies.

pub mod id;
pub mod peer;
pub mod product;
pub mod user;
