//! Unit tests for the `reconstruct` command and its rendering.

use std::path::Path;

use clap::Parser;
use geonet_core::ReconstructError;
use geonet_providers_positions::PositionProviderError;
use geonet_test_support::trace_capture::capture;
use rstest::rstest;
use tracing::Level;

use super::commands::{derive_data_source_name, run_command};
use super::test_helpers::{
    CORNER, command, run_command_expecting_error, temp_dir, write_positions,
};
use super::{Cli, CliError, Command, OutputFormat, render_summary, run_cli};

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[rstest]
#[case::override_name("/tmp/stations.txt", Some("override"), "override")]
#[case::stem_with_extension("/tmp/stations.txt", None, "stations")]
#[case::stem_without_extension("/tmp/stations", None, "stations")]
#[case::missing_stem("", None, "positions")]
fn derive_data_source_name_selects_expected_name(
    #[case] raw_path: &str,
    #[case] override_name: Option<&'static str>,
    #[case] expected: &str,
) {
    assert_eq!(derive_data_source_name(Path::new(raw_path), override_name), expected);
}

#[rstest]
fn reconstruct_connects_closest_pairs() -> TestResult {
    let dir = temp_dir();
    let path = write_positions(&dir, "corner.txt", CORNER)?;
    let cli = Cli {
        command: Command::Reconstruct(command(path, 2)),
    };

    let summary = run_cli(cli)?;
    assert_eq!(summary.data_source, "corner");
    let endpoints: Vec<(u64, u64)> = summary
        .reconstruction
        .edges()
        .iter()
        .map(|pair| (pair.source().get(), pair.target().get()))
        .collect();
    assert_eq!(endpoints, [(0, 1), (0, 2)]);
    Ok(())
}

#[rstest]
#[case::too_many(7, 7)]
#[case::negative(-1, -1)]
fn rejects_out_of_range_targets(#[case] edges: i64, #[case] requested: i128) -> TestResult {
    let dir = temp_dir();
    let path = write_positions(&dir, "corner.txt", CORNER)?;
    let err = run_command_expecting_error(command(path, edges), "target must be rejected");
    assert!(matches!(
        err,
        CliError::Core(ReconstructError::InvalidTarget { requested: got, available: 6 })
            if got == requested
    ));
    Ok(())
}

#[rstest]
fn rejects_single_node_files() -> TestResult {
    let dir = temp_dir();
    let path = write_positions(&dir, "lonely.txt", "7 1 1\n")?;
    let err = run_command_expecting_error(command(path, 0), "one node cannot form pairs");
    assert!(matches!(
        err,
        CliError::Core(ReconstructError::InvalidInput { nodes: 1 })
    ));
    Ok(())
}

#[rstest]
fn rejects_empty_files() -> TestResult {
    let dir = temp_dir();
    let path = write_positions(&dir, "empty.txt", "# no rows\n")?;
    let err = run_command_expecting_error(command(path, 0), "empty input must fail");
    assert!(matches!(
        err,
        CliError::Positions(PositionProviderError::EmptyInput)
    ));
    Ok(())
}

#[rstest]
fn reports_missing_files() {
    let dir = temp_dir();
    let path = dir.path().join("missing.txt");
    let err = run_command_expecting_error(command(path.clone(), 1), "missing file must fail");
    match err {
        CliError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn text_summary_lists_header_and_edges() -> TestResult {
    let dir = temp_dir();
    let path = write_positions(&dir, "corner.txt", CORNER)?;
    let mut cmd = command(path, 2);
    cmd.name = Some("survey".into());
    let summary = run_command(cmd)?;

    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert_eq!(
        text,
        "data source: survey\nnodes: 4\nedges: 2\nradius: 1\ncutoff tie: false\n0\t1\t1\n0\t2\t1\n"
    );
    Ok(())
}

#[rstest]
fn text_summary_without_edges_reports_no_radius() -> TestResult {
    let dir = temp_dir();
    let path = write_positions(&dir, "corner.txt", CORNER)?;
    let summary = run_command(command(path, 0))?;

    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert!(text.contains("edges: 0\n"));
    assert!(text.contains("radius: none\n"));
    assert!(text.ends_with("cutoff tie: false\n"));
    Ok(())
}

#[rstest]
fn json_summary_round_trips_through_serde() -> TestResult {
    let dir = temp_dir();
    let path = write_positions(&dir, "square.txt", "1 0 0\n2 1 0\n3 1 1\n4 0 1\n")?;
    let mut cmd = command(path, 2);
    cmd.format = OutputFormat::Json;
    let summary = run_command(cmd)?;

    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let document: serde_json::Value = serde_json::from_slice(&buffer)?;
    assert_eq!(document["data_source"], "square");
    assert_eq!(document["nodes"], 4);
    assert_eq!(document["edges"], 2);
    assert_eq!(document["radius"], 1.0);
    assert_eq!(document["cutoff_tie"], true);
    assert_eq!(document["edge_list"][1]["source"], 1);
    assert_eq!(document["edge_list"][1]["target"], 4);
    Ok(())
}

#[rstest]
#[case(&["geonet", "reconstruct", "nodes.txt", "--edges", "3"], 3, OutputFormat::Text)]
#[case(&["geonet", "reconstruct", "nodes.txt", "--edges", "-2", "--format", "json"], -2, OutputFormat::Json)]
fn clap_parses_reconstruct_arguments(
    #[case] args: &[&str],
    #[case] edges: i64,
    #[case] format: OutputFormat,
) {
    let cli = Cli::try_parse_from(args).expect("arguments must parse");
    let Command::Reconstruct(parsed) = cli.command;
    assert_eq!(parsed.edges, edges);
    assert_eq!(parsed.format, format);
    assert_eq!(parsed.path, Path::new("nodes.txt"));
}

#[rstest]
#[case::missing_edges(&["geonet", "reconstruct", "nodes.txt"])]
#[case::non_numeric_edges(&["geonet", "reconstruct", "nodes.txt", "--edges", "many"])]
#[case::unknown_format(&["geonet", "reconstruct", "nodes.txt", "--edges", "1", "--format", "csv"])]
fn clap_rejects_invalid_arguments(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[rstest]
fn run_command_records_spans() -> TestResult {
    let dir = temp_dir();
    let path = write_positions(&dir, "corner.txt", CORNER)?;
    let cli = Cli {
        command: Command::Reconstruct(command(path.clone(), 3)),
    };

    let (summary, layer) = capture(|| run_cli(cli));
    assert_eq!(summary?.reconstruction.edge_count(), 3);

    let run = layer.span_named("cli.run").expect("cli.run span must exist");
    assert_eq!(run.field("command"), Some("reconstruct"));

    let execute = layer
        .span_named("cli.execute")
        .expect("cli.execute span must exist");
    assert_eq!(execute.field("edges"), Some("3"));
    assert_eq!(execute.field("data_source"), Some("corner"));
    let expected_path = path.display().to_string();
    assert_eq!(execute.field("path"), Some(expected_path.as_str()));

    let open = layer
        .span_named("cli.open_position_reader")
        .expect("cli.open_position_reader span must exist");
    assert_eq!(open.field("path"), Some(expected_path.as_str()));

    let core = layer
        .span_named("core.reconstruct")
        .expect("core.reconstruct span must exist");
    assert_eq!(core.field("available"), Some("6"));
    Ok(())
}

#[rstest]
fn failed_command_emits_error_event() -> TestResult {
    let dir = temp_dir();
    let path = write_positions(&dir, "corner.txt", CORNER)?;

    let (result, layer) = capture(|| run_command(command(path, 50)));
    assert!(result.is_err());
    let errors = layer.events_at(Level::ERROR);
    assert!(
        errors
            .iter()
            .any(|event| event.field("error").is_some_and(|msg| msg.contains("0..=6")))
    );
    Ok(())
}
