//! Command implementations and argument parsing for the `geonet` CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use geonet_core::{ReconstructError, Reconstruction, reconstruct_signed};
use geonet_providers_positions::{PositionProvider, PositionProviderError};
use serde::Serialize;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "geonet",
    about = "Rebuild a geometric network by connecting its closest node pairs."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Connect the N closest pairs of a position table.
    Reconstruct(ReconstructCommand),
}

/// Options accepted by the `reconstruct` command.
#[derive(Debug, Args, Clone)]
pub struct ReconstructCommand {
    /// Whitespace-delimited `id x y` file, one node per line.
    pub path: PathBuf,

    /// Number of edges to reconstruct.
    #[arg(long, allow_negative_numbers = true)]
    pub edges: i64,

    /// Override name for the data source (defaults to the file stem).
    #[arg(long)]
    pub name: Option<String>,

    /// Output encoding for the edge list.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Encodings accepted by `--format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Header lines followed by tab-separated `source target distance` rows.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    /// The position file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The position file could not be parsed.
    #[error(transparent)]
    Positions(#[from] PositionProviderError),
    /// Reconstruction rejected the input.
    #[error(transparent)]
    Core(#[from] ReconstructError),
}

/// Outcome of a `reconstruct` command, ready for rendering.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name of the position source.
    pub data_source: String,
    /// Requested output encoding.
    pub format: OutputFormat,
    /// The reconstructed network.
    pub reconstruction: Reconstruction,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the file cannot be read or parsed, or when the
/// reconstruction rejects the node count or edge target.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use geonet_cli::cli::{Cli, Command, OutputFormat, ReconstructCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "1 0 0\n2 1 0\n3 0 5\n")?;
/// let cli = Cli {
///     command: Command::Reconstruct(ReconstructCommand {
///         path: file.path().to_path_buf(),
///         edges: 1,
///         name: None,
///         format: OutputFormat::Text,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.reconstruction.edge_count(), 1);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Reconstruct(command) => {
            Span::current().record("command", field::display("reconstruct"));
            run_command(command)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(path = field::Empty, edges = command.edges, data_source = field::Empty),
)]
pub(super) fn run_command(command: ReconstructCommand) -> Result<ExecutionSummary, CliError> {
    let ReconstructCommand {
        path,
        edges,
        name,
        format,
    } = command;
    let span = Span::current();
    span.record("path", field::display(path.display()));

    let chosen_name = derive_data_source_name(&path, name.as_deref());
    span.record("data_source", field::display(&chosen_name));
    let reader = open_position_reader(&path)?;
    let provider = PositionProvider::try_from_reader(chosen_name, reader)?;
    let reconstruction = reconstruct_signed(provider.positions(), edges)?;

    info!(
        data_source = provider.name(),
        nodes = reconstruction.graph().node_count(),
        edges = reconstruction.edge_count(),
        "command completed"
    );
    Ok(ExecutionSummary {
        data_source: provider.name().to_owned(),
        format,
        reconstruction,
    })
}

#[instrument(name = "cli.open_position_reader", err, fields(path = field::Empty))]
pub(super) fn open_position_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "positions".to_owned())
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    data_source: &'a str,
    nodes: usize,
    edges: usize,
    radius: Option<f64>,
    cutoff_tie: bool,
    edge_list: Vec<EdgeRow>,
}

#[derive(Serialize)]
struct EdgeRow {
    source: u64,
    target: u64,
    distance: f64,
}

impl<'a> SummaryDocument<'a> {
    fn new(summary: &'a ExecutionSummary) -> Self {
        let reconstruction = &summary.reconstruction;
        Self {
            data_source: &summary.data_source,
            nodes: reconstruction.graph().node_count(),
            edges: reconstruction.edge_count(),
            radius: reconstruction.radius(),
            cutoff_tie: reconstruction.cutoff_tie(),
            edge_list: reconstruction
                .edges()
                .iter()
                .map(|pair| EdgeRow {
                    source: pair.source().get(),
                    target: pair.target().get(),
                    distance: pair.distance(),
                })
                .collect(),
        }
    }
}

/// Renders `summary` to `writer` in its requested format.
///
/// Text output is a short header followed by one tab-separated
/// `source target distance` row per edge, in insertion order.
///
/// # Errors
/// Returns [`io::Error`] if writing or JSON encoding fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use geonet_cli::cli::{ExecutionSummary, OutputFormat, render_summary};
/// # use geonet_core::{NodeId, Point, Positions, reconstruct};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let positions = Positions::try_from_iter([
///     (NodeId::new(1), Point::new(0.0, 0.0)),
///     (NodeId::new(2), Point::new(3.0, 4.0)),
/// ])?;
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     format: OutputFormat::Text,
///     reconstruction: reconstruct(&positions, 1)?,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.ends_with("1\t2\t5\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary.format {
        OutputFormat::Text => render_text(summary, writer),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &SummaryDocument::new(summary))?;
            writeln!(writer)
        }
    }
}

fn render_text(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let reconstruction = &summary.reconstruction;
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(writer, "nodes: {}", reconstruction.graph().node_count())?;
    writeln!(writer, "edges: {}", reconstruction.edge_count())?;
    match reconstruction.radius() {
        Some(radius) => writeln!(writer, "radius: {radius}")?,
        None => writeln!(writer, "radius: none")?,
    }
    writeln!(writer, "cutoff tie: {}", reconstruction.cutoff_tie())?;
    for pair in reconstruction.edges() {
        writeln!(
            writer,
            "{}\t{}\t{}",
            pair.source(),
            pair.target(),
            pair.distance()
        )?;
    }
    Ok(())
}
