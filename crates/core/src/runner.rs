//! Spawns a command, captures both output streams and waits for it to exit

use crate::{
    command::CommandSpec,
    error::{Error, Result},
    report::ProcessResult,
};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Anything that can turn a [`CommandSpec`] into a finished [`ProcessResult`].
pub trait CommandRunner {
    fn run(&self, command: &CommandSpec) -> Result<ProcessResult>;
}

/// Runs commands as real child processes of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandSpec) -> Result<ProcessResult> {
        if command.program.is_empty() {
            return Err(Error::EmptyCommand);
        }
        validate_working_dir(&command.working_dir)?;

        debug!(
            "Spawning `{}` in {}",
            command.to_shell_command(),
            command.working_dir.display()
        );

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .current_dir(&command.working_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in &command.env {
            cmd.env(key, value);
        }

        let child = cmd.spawn().map_err(|source| Error::Launch {
            program: command.program.clone(),
            source,
        })?;

        let output = child.wait_with_output().map_err(|source| Error::Capture {
            program: command.program.clone(),
            source,
        })?;

        let exit_code = exit_code_of(output.status);
        debug!("`{}` exited with {}", command.program, exit_code);

        Ok(ProcessResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code,
        })
    }
}

/// Checked before spawning so a bad directory never creates a child.
pub fn validate_working_dir(dir: &Path) -> Result<()> {
    if !dir.is_absolute() {
        return Err(Error::RelativeWorkingDir(dir.to_path_buf()));
    }
    match std::fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(Error::NotADirectory(dir.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::WorkingDirNotFound(dir.to_path_buf()))
        }
        Err(source) => Err(Error::WorkingDirInaccessible {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

/// Signal-terminated children report the negated signal number.
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}
