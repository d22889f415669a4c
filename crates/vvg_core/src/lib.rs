//! VVG Core - batch conversion logic for Verse Voice Generator
//!
//! This crate contains all business logic with zero CLI dependencies:
//! dataset loading, settings, the synthesis engine port, and the batch
//! conversion driver. The binary crate is a thin front-end over it.

pub mod batch;
pub mod config;
pub mod dataset;
pub mod synth;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
