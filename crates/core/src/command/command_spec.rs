use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// A fully resolved child process description: argument vector, working
/// directory and extra environment.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
            env: Vec::new(),
        }
    }

    /// Build from an argument vector whose first element is the program.
    pub fn from_argv<I, S>(argv: I, working_dir: impl Into<PathBuf>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next().ok_or(Error::EmptyCommand)?;
        if program.is_empty() {
            return Err(Error::EmptyCommand);
        }

        Ok(Self {
            program,
            args: argv.collect(),
            working_dir: working_dir.into(),
            env: Vec::new(),
        })
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// The complete argument vector, program first.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        argv
    }

    pub fn to_shell_command(&self) -> String {
        let mut cmd = String::new();
        for (i, arg) in self.argv().iter().enumerate() {
            if i > 0 {
                cmd.push(' ');
            }
            cmd.push_str(&shell_quote(arg));
        }
        cmd
    }
}

fn shell_quote(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }
    if arg.contains('\'') {
        return format!("'{}'", arg.replace('\'', r"'\''"));
    }
    let needs_quotes = arg.starts_with('~')
        || arg.contains(|c: char| c.is_whitespace() || "\"$`\\|&;<>()*?#!{}[]".contains(c));
    if needs_quotes {
        format!("'{arg}'")
    } else {
        arg.to_string()
    }
}
