//! Captured process output and the two report renderings

use crate::{command::CommandSpec, error::Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;

/// Everything a finished child process left behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ProcessResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Machine-readable report shape used by [`ReportFormat::Json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub command: Vec<String>,
    pub working_dir: PathBuf,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl Report {
    pub fn new(command: &CommandSpec, result: &ProcessResult) -> Self {
        Self {
            command: command.argv(),
            working_dir: command.working_dir.clone(),
            stdout: result.stdout.clone(),
            stderr: result.stderr.clone(),
            exit_code: result.exit_code,
        }
    }
}

/// Every block ends in a newline, so captured text that already ends in one
/// is followed by an empty line.
pub fn render_text(result: &ProcessResult) -> String {
    format!(
        "STDOUT:\n{}\n\nSTDERR:\n{}\n\nReturn code: {}\n",
        result.stdout, result.stderr, result.exit_code
    )
}

pub fn render_json(command: &CommandSpec, result: &ProcessResult) -> Result<String> {
    let mut json = serde_json::to_string_pretty(&Report::new(command, result))?;
    json.push('\n');
    Ok(json)
}

pub fn write_report<W: Write>(
    out: &mut W,
    format: ReportFormat,
    command: &CommandSpec,
    result: &ProcessResult,
) -> Result<()> {
    let rendered = match format {
        ReportFormat::Text => render_text(result),
        ReportFormat::Json => render_json(command, result)?,
    };
    out.write_all(rendered.as_bytes())?;
    out.flush()?;
    Ok(())
}
