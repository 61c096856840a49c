//! testrun - run one test through an external test tool and report its output
//!
//! This crate provides functionality to:
//! - Build the argument vector for a single test invocation (`cargo test <filter> -- --nocapture`)
//! - Run any argument vector as a child process in a given working directory
//! - Capture stdout, stderr and the exit code, and render them as a report
pub mod command;
pub mod config;
pub mod error;
pub mod report;
pub mod runner;

// Re-export commonly used types and traits
pub use error::{Error, Result};

// Re-export main API components
pub use command::{CommandSpec, TestInvocation};
pub use config::{Config, LoadedConfig, TestConfig};
pub use report::{ProcessResult, Report, ReportFormat, render_json, render_text, write_report};
pub use runner::{CommandRunner, SystemRunner};
