use super::commands::run_command;
use super::*;

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use reachgraph_core::{GraphError, PathAnswer, SessionBuilder};
use reachgraph_test_support::tracing::RecordingLayer;
use rstest::rstest;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const TRIANGLE_SCRIPT: &str = "\
# two edges through B
add A
add B
add C
select A
select B
select B
select C
calculate
query A C
remove B
query A B
calculate
query A C
";

#[rstest]
fn run_script_file_reports_matrices_and_answers() -> TestResult {
    let dir = temp_dir();
    let path = create_script(&dir, "triangle.rg", TRIANGLE_SCRIPT)?;

    let summary = run_cli(run_cli_args(Some(path), LabelOrderArg::Lexicographic, 1))?;

    let answers: Vec<PathAnswer> = summary
        .reports
        .iter()
        .filter_map(|report| match report {
            Report::Query { answer, .. } => Some(*answer),
            Report::Calculation(_) => None,
        })
        .collect();
    assert_eq!(
        answers,
        [
            PathAnswer::Reachable,
            PathAnswer::Unavailable,
            PathAnswer::Unreachable
        ]
    );
    assert_eq!((summary.nodes, summary.edges), (2, 0));
    let Some(Report::Calculation(first)) = summary.reports.first() else {
        panic!("first report must be a calculation");
    };
    assert_eq!(first.closure().to_rows(), vec![vec![1, 1, 1]; 3]);
    Ok(())
}

#[rstest]
fn missing_script_is_an_io_error() {
    let dir = temp_dir();
    let path = dir.path().join("absent.rg");

    let err = run_cli(run_cli_args(Some(path.clone()), LabelOrderArg::Lexicographic, 1))
        .expect_err("missing files must fail");

    assert!(matches!(err, CliError::Io { path: ref reported, .. } if *reported == path));
}

#[rstest]
#[case::natural(LabelOrderArg::Natural, 9, ["9", "10", "11"])]
#[case::lexicographic(LabelOrderArg::Lexicographic, 9, ["10", "11", "9"])]
fn run_options_configure_the_session(
    #[case] order: LabelOrderArg,
    #[case] first_label: u64,
    #[case] expected: [&str; 3],
) -> TestResult {
    let dir = temp_dir();
    let path = create_script(&dir, "placed.rg", "place\nplace\nplace\ncalculate\n")?;

    let summary = run_command(RunCommand {
        script: Some(path),
        label_order: order,
        first_label,
    })?;

    let Some(Report::Calculation(calculation)) = summary.reports.first() else {
        panic!("calculate must produce a report");
    };
    assert_eq!(calculation.matrix().header(), expected);
    Ok(())
}

#[rstest]
fn parse_errors_stop_before_any_command_runs() {
    let layer = RecordingLayer::default();

    let err = layer
        .in_scope(|| execute_script("add A\nadd B C\n", SessionBuilder::new()))
        .expect_err("extra argument must fail");

    assert!(matches!(err, CliError::Parse(ref parse) if parse.line() == 2));
    assert!(layer.events_with_message("node added").is_empty());
}

#[rstest]
fn unknown_labels_report_their_line() {
    let err = execute_script("add A\n\nselect B\n", SessionBuilder::new())
        .expect_err("B does not exist");

    match err {
        CliError::UnknownLabel { line, label } => {
            assert_eq!(line, 3);
            assert_eq!(label, "B");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn duplicate_labels_surface_core_error() {
    let err = execute_script("add A\nadd A\n", SessionBuilder::new())
        .expect_err("duplicate labels must fail");

    assert!(matches!(
        err,
        CliError::Core(GraphError::DuplicateLabel { ref label }) if label == "A"
    ));
}

#[rstest]
fn script_execution_records_spans() -> TestResult {
    let layer = RecordingLayer::default();

    layer.in_scope(|| execute_script("add A\ncalculate\n", SessionBuilder::new()))?;

    let spans = layer.spans_named("cli.script");
    let span = spans.first().expect("cli.script span must exist");
    assert_eq!(span.fields.get("lines"), Some(&"2".to_owned()));
    assert_eq!(layer.spans_named("core.calculate").len(), 1);
    assert_eq!(layer.events_with_message("executing script command").len(), 2);
    Ok(())
}

#[rstest]
fn render_summary_outputs_tab_separated_matrices() -> TestResult {
    let summary = execute_script(
        "add B\nadd A\nselect A\nselect B\ncalculate\nquery A B\nquery A Z\n",
        SessionBuilder::new(),
    )?;
    let mut buffer = Vec::new();

    render_summary(&summary, &mut buffer)?;

    let text = String::from_utf8(buffer)?;
    let expected = "\
adjacency:
\tA\tB
A\t0\t1
B\t1\t0
closure:
\tA\tB
A\t1\t1
B\t1\t1
A -> B: yes
A -> Z: unavailable
nodes: 2
edges: 1
";
    assert_eq!(text, expected);
    Ok(())
}

#[rstest]
fn clap_parses_run_options() -> TestResult {
    let cli = Cli::try_parse_from([
        "reachgraph",
        "run",
        "graph.rg",
        "--label-order",
        "natural",
        "--first-label",
        "4",
    ])?;

    let Command::Run(run) = cli.command;
    assert_eq!(run.script, Some(PathBuf::from("graph.rg")));
    assert_eq!(run.label_order, LabelOrderArg::Natural);
    assert_eq!(run.first_label, 4);
    Ok(())
}

#[rstest]
fn clap_defaults_to_stdin_and_lexicographic_order() -> TestResult {
    let cli = Cli::try_parse_from(["reachgraph", "run"])?;

    let Command::Run(run) = cli.command;
    assert_eq!(run.script, None);
    assert_eq!(run.label_order, LabelOrderArg::Lexicographic);
    assert_eq!(run.first_label, 1);
    Ok(())
}

#[rstest]
#[case::unknown_order(&["reachgraph", "run", "--label-order", "random"])]
#[case::negative_label(&["reachgraph", "run", "--first-label", "-1"])]
fn clap_rejects_invalid_options(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

fn run_cli_args(script: Option<PathBuf>, label_order: LabelOrderArg, first_label: u64) -> Cli {
    Cli {
        command: Command::Run(RunCommand {
            script,
            label_order,
            first_label,
        }),
    }
}

fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

fn create_script(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}
