use anyhow::{Context, Result};
use std::io::Write;
use testrun_core::{CommandRunner, CommandSpec, ProcessResult, ReportFormat, write_report};
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub format: ReportFormat,
    pub propagate_exit_code: bool,
    pub dry_run: bool,
}

/// Runs `command` (or describes it on a dry run), writes the report to `out`
/// and returns the exit code this process should finish with.
pub fn run_command<R, W>(
    runner: &R,
    command: &CommandSpec,
    options: &RunOptions,
    out: &mut W,
) -> Result<i32>
where
    R: CommandRunner + ?Sized,
    W: Write,
{
    let shell_cmd = command.to_shell_command();

    if options.dry_run {
        writeln!(out, "{shell_cmd}")?;
        writeln!(out, "Working directory: {}", command.working_dir.display())?;
        if !command.env.is_empty() {
            writeln!(out, "Environment variables:")?;
            for (key, value) in &command.env {
                writeln!(out, "  {key}={value}")?;
            }
        }
        return Ok(0);
    }

    info!("Running: {}", shell_cmd);
    info!("Working directory: {}", command.working_dir.display());

    let result = runner
        .run(command)
        .with_context(|| format!("Failed to execute: {shell_cmd}"))?;

    write_report(out, options.format, command, &result).context("Failed to write report")?;

    Ok(exit_code_for(&result, options.propagate_exit_code))
}

fn exit_code_for(result: &ProcessResult, propagate: bool) -> i32 {
    match (propagate, result.exit_code) {
        (false, _) => 0,
        (true, code) if code < 0 => 1,
        (true, code) => code,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use testrun_core::Error;

    /// Hands out a fixed result and remembers what it was asked to run.
    pub(crate) struct ScriptedRunner {
        pub result: ProcessResult,
        pub calls: RefCell<Vec<CommandSpec>>,
    }

    impl ScriptedRunner {
        pub(crate) fn new(stdout: &str, stderr: &str, exit_code: i32) -> Self {
            Self {
                result: ProcessResult {
                    stdout: stdout.to_string(),
                    stderr: stderr.to_string(),
                    exit_code,
                },
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, command: &CommandSpec) -> testrun_core::Result<ProcessResult> {
            self.calls.borrow_mut().push(command.clone());
            Ok(self.result.clone())
        }
    }

    struct FailingRunner;

    impl CommandRunner for FailingRunner {
        fn run(&self, command: &CommandSpec) -> testrun_core::Result<ProcessResult> {
            Err(Error::WorkingDirNotFound(command.working_dir.clone()))
        }
    }

    fn echo() -> CommandSpec {
        CommandSpec::from_argv(["echo", "hello"], "/work").unwrap()
    }

    #[test]
    fn test_text_report_and_zero_exit() {
        let runner = ScriptedRunner::new("hello\n", "", 0);
        let mut out = Vec::new();

        let code = run_command(&runner, &echo(), &RunOptions::default(), &mut out).unwrap();

        assert_eq!(code, 0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "STDOUT:\nhello\n\n\nSTDERR:\n\n\nReturn code: 0\n"
        );
        assert_eq!(runner.calls.borrow().len(), 1);
    }

    #[test]
    fn test_child_failure_not_propagated_by_default() {
        let runner = ScriptedRunner::new("", "boom\n", 101);
        let mut out = Vec::new();

        let code = run_command(&runner, &echo(), &RunOptions::default(), &mut out).unwrap();

        assert_eq!(code, 0);
        assert!(String::from_utf8(out).unwrap().ends_with("Return code: 101\n"));
    }

    #[test]
    fn test_child_failure_propagated_on_request() {
        let options = RunOptions {
            propagate_exit_code: true,
            ..Default::default()
        };

        let runner = ScriptedRunner::new("", "", 101);
        let code = run_command(&runner, &echo(), &options, &mut Vec::new()).unwrap();
        assert_eq!(code, 101);

        let killed = ScriptedRunner::new("", "", -9);
        let code = run_command(&killed, &echo(), &options, &mut Vec::new()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn test_dry_run_does_not_execute() {
        let runner = ScriptedRunner::new("", "", 0);
        let command = echo().with_env("RUST_LOG", "debug");
        let options = RunOptions {
            dry_run: true,
            ..Default::default()
        };
        let mut out = Vec::new();

        run_command(&runner, &command, &options, &mut out).unwrap();

        assert!(runner.calls.borrow().is_empty());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "echo hello\nWorking directory: /work\nEnvironment variables:\n  RUST_LOG=debug\n"
        );
    }

    #[test]
    fn test_launch_error_prints_no_report() {
        let mut out = Vec::new();
        let err = run_command(&FailingRunner, &echo(), &RunOptions::default(), &mut out)
            .unwrap_err();

        assert!(out.is_empty());
        let launch = err.downcast_ref::<Error>().unwrap();
        assert!(launch.is_launch_error());
    }
}
