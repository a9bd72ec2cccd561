//! Command-line interface for closest-first network reconstruction.
//!
//! The single `reconstruct` command loads an `id x y` position file, connects
//! the requested number of closest pairs, and prints the resulting edge list.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, OutputFormat, ReconstructCommand, render_summary,
    run_cli,
};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
