//! Fixture builders shared by the CLI unit tests.

use std::fs;
use std::io;
use std::path::PathBuf;

use tempfile::TempDir;

use super::commands::run_command;
use super::{CliError, OutputFormat, ReconstructCommand};

/// Four nodes: three within unit distance of the origin, one far away.
pub(super) const CORNER: &str = "id x y\n0 0 0\n1 1 0\n2 0 1\n3 10 10\n";

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_positions(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

pub(super) fn command(path: PathBuf, edges: i64) -> ReconstructCommand {
    ReconstructCommand {
        path,
        edges,
        name: None,
        format: OutputFormat::Text,
    }
}

pub(super) fn run_command_expecting_error(cmd: ReconstructCommand, panic_msg: &str) -> CliError {
    match run_command(cmd) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
