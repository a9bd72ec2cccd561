//! Benchmark support crate for geonet.
//!
//! Provides seeded synthetic position tables and parameter types used by the
//! Criterion benchmarks for pair enumeration and closest-first
//! reconstruction.

pub mod error;
pub mod params;
pub mod source;
