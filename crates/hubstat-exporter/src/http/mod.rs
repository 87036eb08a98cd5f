//! HTTP surface: one logical endpoint serving the snapshot as JSON.
//!
//! Every path is routed to the same handler; only the method matters.

pub mod error;
pub mod handler;
pub mod router;

pub use error::ApiError;
pub use router::build_router;
