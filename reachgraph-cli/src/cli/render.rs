//! Plain-text rendering of execution summaries.

use std::io::{self, Write};

use reachgraph_core::PathAnswer;

use super::commands::{ExecutionSummary, Report};

/// Renders `summary` to `writer` in a human-readable text format.
///
/// Matrices are tab separated with the header as the first row and column.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use reachgraph_cli::cli::{execute_script, render_summary};
/// # use reachgraph_core::SessionBuilder;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = execute_script("add A\ncalculate\nquery A A\n", SessionBuilder::new())?;
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.contains("A -> A: no"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    for report in &summary.reports {
        match report {
            Report::Calculation(calculation) => {
                let matrix = calculation.matrix();
                render_matrix(&mut writer, "adjacency", matrix.header(), &matrix.to_rows())?;
                let reach = calculation.closure();
                render_matrix(&mut writer, "closure", reach.header(), &reach.to_rows())?;
            }
            Report::Query { from, to, answer } => {
                writeln!(writer, "{from} -> {to}: {}", answer_text(*answer))?;
            }
        }
    }
    writeln!(writer, "nodes: {}", summary.nodes)?;
    writeln!(writer, "edges: {}", summary.edges)?;
    Ok(())
}

fn render_matrix(
    writer: &mut impl Write,
    title: &str,
    header: &[String],
    rows: &[Vec<u8>],
) -> io::Result<()> {
    writeln!(writer, "{title}:")?;
    for label in header {
        write!(writer, "\t{label}")?;
    }
    writeln!(writer)?;
    for (label, row) in header.iter().zip(rows) {
        write!(writer, "{label}")?;
        for cell in row {
            write!(writer, "\t{cell}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

const fn answer_text(answer: PathAnswer) -> &'static str {
    match answer {
        PathAnswer::Reachable => "yes",
        PathAnswer::Unreachable => "no",
        PathAnswer::Unavailable => "unavailable",
    }
}
