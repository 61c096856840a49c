use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;
use testrun_core::{CommandRunner, CommandSpec};
use tracing::debug;

use super::{RunOptions, run_command};

pub fn exec_command<R, W>(
    runner: &R,
    argv: Vec<String>,
    working_dir: PathBuf,
    options: &RunOptions,
    out: &mut W,
) -> Result<i32>
where
    R: CommandRunner + ?Sized,
    W: Write,
{
    debug!("Executing argv: {:?}", argv);
    let command = CommandSpec::from_argv(argv, working_dir)?;
    run_command(runner, &command, options, out)
}
