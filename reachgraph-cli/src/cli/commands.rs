//! Command implementations and argument parsing for the reachgraph CLI.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use reachgraph_core::{
    Calculation, GraphError, LabelOrder, NodeId, PathAnswer, Session, SessionBuilder,
};
use thiserror::Error;
use tracing::{Span, debug, field, info, instrument};

use super::script::{ScriptCommand, ScriptError, ScriptLine, parse_script};

const DEFAULT_FIRST_LABEL: u64 = 1;
const STDIN_PATH: &str = "<stdin>";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "reachgraph",
    about = "Build undirected graphs from a command script and report their reachability."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Execute a command script.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Script to execute; commands are read from stdin when omitted.
    pub script: Option<PathBuf>,

    /// Order of the matrix header.
    #[arg(long = "label-order", value_enum, default_value_t = LabelOrderArg::Lexicographic)]
    pub label_order: LabelOrderArg,

    /// Number used for the first automatically placed node.
    #[arg(
        long = "first-label",
        default_value_t = DEFAULT_FIRST_LABEL,
        value_parser = clap::value_parser!(u64),
    )]
    pub first_label: u64,
}

/// Header orders selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LabelOrderArg {
    /// Plain string order.
    Lexicographic,
    /// Numeric runs compared by value.
    Natural,
}

impl From<LabelOrderArg> for LabelOrder {
    fn from(value: LabelOrderArg) -> Self {
        match value {
            LabelOrderArg::Lexicographic => Self::Lexicographic,
            LabelOrderArg::Natural => Self::Natural,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The script could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The script is malformed.
    #[error(transparent)]
    Parse(#[from] ScriptError),
    /// A command named a label that is not in the graph.
    #[error("line {line}: no node is labelled `{label}`")]
    UnknownLabel {
        /// 1-based line number.
        line: usize,
        /// The missing label.
        label: String,
    },
    /// A graph operation failed.
    #[error(transparent)]
    Core(#[from] GraphError),
}

/// Output produced by a single script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Result of `calculate`.
    Calculation(Calculation),
    /// Result of `query`.
    Query {
        /// Source label.
        from: String,
        /// Target label.
        to: String,
        /// The answer.
        answer: PathAnswer,
    },
}

/// Summarises the outcome of executing a script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionSummary {
    /// Reports in script order.
    pub reports: Vec<Report>,
    /// Nodes left in the graph.
    pub nodes: usize,
    /// Edges left in the graph.
    pub edges: usize,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading, parsing or executing the script fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use reachgraph_cli::cli::{Cli, Command, LabelOrderArg, RunCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "add A\nadd B\nselect A\nselect B\ncalculate\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         script: Some(file.path().to_path_buf()),
///         label_order: LabelOrderArg::Lexicographic,
///         first_label: 1,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.edges, 1);
/// assert_eq!(summary.reports.len(), 1);
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
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(script = field::Empty, label_order = ?command.label_order),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let text = read_script(command.script.as_deref())?;
    let builder = SessionBuilder::new()
        .with_label_order(command.label_order.into())
        .with_first_label(command.first_label);
    let summary = execute_script(&text, builder)?;

    info!(
        reports = summary.reports.len(),
        nodes = summary.nodes,
        edges = summary.edges,
        "command completed"
    );
    Ok(summary)
}

fn read_script(path: Option<&Path>) -> Result<String, CliError> {
    let span = Span::current();
    if let Some(path) = path {
        span.record("script", field::display(path.display()));
        return fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    span.record("script", field::display(STDIN_PATH));
    let mut text = String::new();
    io::stdin()
        .lock()
        .read_to_string(&mut text)
        .map_err(|source| CliError::Io {
            path: PathBuf::from(STDIN_PATH),
            source,
        })?;
    Ok(text)
}

/// Runs the script `text` against a session configured by `builder`.
///
/// # Errors
/// Returns [`CliError::Parse`] for malformed scripts before any command runs,
/// [`CliError::UnknownLabel`] when a command names an absent node and
/// [`CliError::Core`] when a graph operation fails.
///
/// # Examples
/// ```
/// use reachgraph_cli::cli::{Report, execute_script};
/// use reachgraph_core::{PathAnswer, SessionBuilder};
///
/// let summary = execute_script("add A\nloop A\ncalculate\nquery A A\n", SessionBuilder::new())?;
/// assert!(matches!(
///     summary.reports.last(),
///     Some(Report::Query { answer: PathAnswer::Reachable, .. })
/// ));
/// # Ok::<(), reachgraph_cli::cli::CliError>(())
/// ```
#[instrument(name = "cli.script", err, skip(text, builder), fields(lines = field::Empty))]
pub fn execute_script(text: &str, builder: SessionBuilder) -> Result<ExecutionSummary, CliError> {
    let lines = parse_script(text)?;
    Span::current().record("lines", lines.len());

    let mut session = builder.build();
    let mut reports = Vec::new();
    for line in lines {
        if let Some(report) = execute_line(&mut session, line)? {
            reports.push(report);
        }
    }
    Ok(ExecutionSummary {
        reports,
        nodes: session.graph().node_count(),
        edges: session.graph().edge_count(),
    })
}

fn execute_line(session: &mut Session, line: ScriptLine) -> Result<Option<Report>, CliError> {
    let ScriptLine { number, command } = line;
    debug!(line = number, command = ?command, "executing script command");
    match command {
        ScriptCommand::Add(label) => {
            session.add_node(label)?;
        }
        ScriptCommand::Place => {
            session.place_node()?;
        }
        ScriptCommand::Select(label) => {
            let id = resolve(session, number, label)?;
            session.select_node(id, false)?;
        }
        ScriptCommand::Loop(label) => {
            let id = resolve(session, number, label)?;
            session.select_node(id, true)?;
        }
        ScriptCommand::Cancel => {
            session.cancel_selection();
        }
        ScriptCommand::Remove(label) => {
            let id = resolve(session, number, label)?;
            session.remove_node(id)?;
        }
        ScriptCommand::Calculate => return Ok(Some(Report::Calculation(session.calculate()))),
        ScriptCommand::Query { from, to } => {
            let answer = session.query(&from, &to);
            return Ok(Some(Report::Query { from, to, answer }));
        }
    }
    Ok(None)
}

fn resolve(session: &Session, line: usize, label: String) -> Result<NodeId, CliError> {
    session
        .node_id(&label)
        .ok_or(CliError::UnknownLabel { line, label })
}
