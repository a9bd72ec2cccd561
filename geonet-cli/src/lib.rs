//! Support library for the `geonet` binary.
//!
//! Exposes the command pipeline and logging setup so tests and doctests can
//! drive a reconstruction without spawning a subprocess.

pub mod cli;
pub mod logging;
