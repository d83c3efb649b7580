//! Shared HTTP plumbing for shop services: error envelope, health checks,
//! request-id middleware, tracing setup, and wire-format serde helpers.

pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
