//! Builds the argument vector for running one test through an external test tool

use super::CommandSpec;
use crate::error::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEFAULT_COMMAND: &str = "cargo";
pub const DEFAULT_SUBCOMMAND: &str = "test";

/// Test binary args used when nothing else is configured: show test output.
pub fn default_test_binary_args() -> Vec<String> {
    vec!["--nocapture".to_string()]
}

/// One invocation of the test tool, e.g. `cargo test my::test -- --nocapture`
#[derive(Debug, Clone, PartialEq)]
pub struct TestInvocation {
    pub command: String,
    /// May hold several words, e.g. `nextest run`
    pub subcommand: String,
    pub channel: Option<String>,
    pub test_filter: Option<String>,
    pub package: Option<String>,
    pub features: Vec<String>,
    pub extra_args: Vec<String>,
    pub test_binary_args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl Default for TestInvocation {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
            subcommand: DEFAULT_SUBCOMMAND.to_string(),
            channel: None,
            test_filter: None,
            package: None,
            features: Vec::new(),
            extra_args: Vec::new(),
            test_binary_args: default_test_binary_args(),
            env: BTreeMap::new(),
        }
    }
}

impl TestInvocation {
    pub fn new(test_filter: impl Into<String>) -> Self {
        Self {
            test_filter: Some(test_filter.into()),
            ..Default::default()
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn with_subcommand(mut self, subcommand: impl Into<String>) -> Self {
        self.subcommand = subcommand.into();
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features.extend(features.into_iter().map(Into::into));
        self
    }

    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Replaces the args forwarded to the test binary after `--`.
    pub fn with_test_binary_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.test_binary_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn to_argv(&self) -> Vec<String> {
        let mut argv = vec![self.command.clone()];

        if let Some(channel) = &self.channel {
            argv.push(format!("+{channel}"));
        }

        argv.extend(self.subcommand.split_whitespace().map(String::from));

        if let Some(filter) = &self.test_filter {
            if !filter.is_empty() {
                argv.push(filter.clone());
            }
        }

        if let Some(pkg) = &self.package {
            if !pkg.is_empty() {
                argv.push("--package".to_string());
                argv.push(pkg.clone());
            }
        }

        let features: Vec<&str> = self
            .features
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .collect();
        if !features.is_empty() {
            argv.push("--features".to_string());
            argv.push(features.join(","));
        }

        argv.extend(self.extra_args.iter().cloned());

        if !self.test_binary_args.is_empty() {
            argv.push("--".to_string());
            argv.extend(self.test_binary_args.iter().cloned());
        }

        argv
    }

    pub fn into_command(self, working_dir: impl Into<PathBuf>) -> Result<CommandSpec> {
        let mut command = CommandSpec::from_argv(self.to_argv(), working_dir)?;
        for (key, value) in self.env {
            command = command.with_env(key, value);
        }
        Ok(command)
    }
}
