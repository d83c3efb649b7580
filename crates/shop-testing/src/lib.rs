//! Test utilities for shop services.
//!
//! Provides `StubPeer`, an in-process HTTP server standing in for a peer service.
//! Dev-dependency only.

pub mod peer;
