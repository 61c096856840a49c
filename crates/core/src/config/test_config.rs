use crate::command::TestInvocation;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The `test` section of a config file. Every field is optional and only
/// replaces the built-in default when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TestConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcommand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_test_binary_args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_env: Option<HashMap<String, String>>,
}

impl TestConfig {
    pub fn apply_to(&self, mut invocation: TestInvocation) -> TestInvocation {
        if let Some(command) = &self.command {
            invocation.command = command.clone();
        }
        if let Some(subcommand) = &self.subcommand {
            invocation.subcommand = subcommand.clone();
        }
        if let Some(channel) = &self.channel {
            invocation.channel = Some(channel.clone());
        }
        if let Some(package) = &self.package {
            invocation.package = Some(package.clone());
        }
        if let Some(features) = &self.features {
            invocation.features.extend(features.iter().cloned());
        }
        if let Some(args) = &self.extra_args {
            invocation.extra_args.extend(args.iter().cloned());
        }
        if let Some(args) = &self.extra_test_binary_args {
            invocation.test_binary_args = args.clone();
        }
        if let Some(env) = &self.extra_env {
            invocation
                .env
                .extend(env.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        invocation
    }
}
