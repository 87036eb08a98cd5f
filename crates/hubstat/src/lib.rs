//! Top-level facade crate for hubstat.
//!
//! Re-exports core types and the exporter library so hosts can depend on a single crate.

pub mod core {
    pub use hubstat_core::*;
}

pub mod exporter {
    pub use hubstat_exporter::*;
}
