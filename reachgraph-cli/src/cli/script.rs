//! Line-oriented command scripts.
//!
//! One command per line, tokens separated by whitespace. Everything after a
//! `#` is a comment and blank lines are skipped.

use thiserror::Error;

/// A parsed script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// `add LABEL`
    Add(String),
    /// `place`
    Place,
    /// `select LABEL`
    Select(String),
    /// `loop LABEL`
    Loop(String),
    /// `cancel`
    Cancel,
    /// `remove LABEL`
    Remove(String),
    /// `calculate`
    Calculate,
    /// `query FROM TO`
    Query {
        /// Source label.
        from: String,
        /// Target label.
        to: String,
    },
}

/// A command together with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// Line number in the script.
    pub number: usize,
    /// The command on that line.
    pub command: ScriptCommand,
}

/// Errors raised while parsing a script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The first token is not a known command.
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand {
        /// 1-based line number.
        line: usize,
        /// The unrecognised token.
        command: String,
    },
    /// A required argument is absent.
    #[error("line {line}: `{command}` expects {expected} argument(s), found {found}")]
    ArgumentCount {
        /// 1-based line number.
        line: usize,
        /// Command name.
        command: &'static str,
        /// Arguments the command takes.
        expected: usize,
        /// Arguments supplied.
        found: usize,
    },
}

impl ScriptError {
    /// Line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnknownCommand { line, .. } | Self::ArgumentCount { line, .. } => *line,
        }
    }
}

/// Parses `text` into commands.
///
/// # Errors
/// Returns [`ScriptError`] for the first malformed line.
///
/// # Examples
/// ```
/// use reachgraph_cli::cli::{ScriptCommand, parse_script};
///
/// let lines = parse_script("# demo\nadd A\n\nquery A A\n")?;
/// assert_eq!(lines[0].number, 2);
/// assert_eq!(lines[0].command, ScriptCommand::Add("A".into()));
/// assert_eq!(lines[1].number, 4);
/// # Ok::<(), reachgraph_cli::cli::ScriptError>(())
/// ```
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut lines = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let content = raw.split_once('#').map_or(raw, |(code, _)| code);
        let tokens: Vec<&str> = content.split_whitespace().collect();
        let Some((&name, args)) = tokens.split_first() else {
            continue;
        };
        let number = index + 1;
        lines.push(ScriptLine {
            number,
            command: parse_command(number, name, args)?,
        });
    }
    Ok(lines)
}

fn parse_command(line: usize, name: &str, args: &[&str]) -> Result<ScriptCommand, ScriptError> {
    let command = match name {
        "add" => ScriptCommand::Add(single(line, "add", args)?),
        "place" => none(line, "place", args, ScriptCommand::Place)?,
        "select" => ScriptCommand::Select(single(line, "select", args)?),
        "loop" => ScriptCommand::Loop(single(line, "loop", args)?),
        "cancel" => none(line, "cancel", args, ScriptCommand::Cancel)?,
        "remove" => ScriptCommand::Remove(single(line, "remove", args)?),
        "calculate" => none(line, "calculate", args, ScriptCommand::Calculate)?,
        "query" => match args {
            [from, to] => ScriptCommand::Query {
                from: (*from).to_owned(),
                to: (*to).to_owned(),
            },
            _ => return Err(arity(line, "query", 2, args)),
        },
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_owned(),
            });
        }
    };
    Ok(command)
}

fn single(line: usize, command: &'static str, args: &[&str]) -> Result<String, ScriptError> {
    match args {
        [label] => Ok((*label).to_owned()),
        _ => Err(arity(line, command, 1, args)),
    }
}

fn none(
    line: usize,
    command: &'static str,
    args: &[&str],
    parsed: ScriptCommand,
) -> Result<ScriptCommand, ScriptError> {
    if args.is_empty() {
        Ok(parsed)
    } else {
        Err(arity(line, command, 0, args))
    }
}

const fn arity(line: usize, command: &'static str, expected: usize, args: &[&str]) -> ScriptError {
    ScriptError::ArgumentCount {
        line,
        command,
        expected,
        found: args.len(),
    }
}
