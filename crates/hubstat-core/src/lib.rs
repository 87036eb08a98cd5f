//! hubstat core: transport-agnostic monitoring contracts, protocol names, and errors.
//!
//! This crate defines the surface shared between a messaging host and the
//! exporter: the `Monitoring` hooks the host calls, the collaborator traits the
//! exporter reads gauges from, and the error type. It carries no transport or
//! runtime dependencies so a host can implement the traits without pulling in
//! an HTTP stack.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Hooks are called from the host's hot path and must never bring it down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod monitoring;
pub mod protocol;
pub mod services;

/// Shared result type.
pub use error::{HubStatError, Result};
pub use monitoring::Monitoring;
