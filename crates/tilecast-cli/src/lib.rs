//! Support code for the `tilecast` binary.
//!
//! All file I/O happens here. The library crates only ever see trees, ids
//! and frame indices.

pub mod config;
pub mod input;
pub mod store;
pub mod tree;

pub use config::Config;
