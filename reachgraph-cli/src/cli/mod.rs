//! Command-line interface orchestration for reachgraph.
//!
//! The `run` command reads a line-oriented script, replays it against a
//! [`reachgraph_core::Session`] and collects the matrices and path answers it
//! asks for.

mod commands;
mod render;
mod script;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, LabelOrderArg, Report, RunCommand, execute_script,
    run_cli,
};
pub use render::render_summary;
pub use script::{ScriptCommand, ScriptError, ScriptLine, parse_script};

#[cfg(test)]
mod tests;
