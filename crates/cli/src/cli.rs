use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::env;
use std::path::PathBuf;
use testrun_core::{
    LoadedConfig, ReportFormat, SystemRunner,
    config::{Config, ROOT_ENV_VAR, resolve_working_dir},
};
use tracing::{debug, warn};

use crate::commands::{RunOptions, exec_command, init_command, test_command};

#[derive(Parser, Debug)]
#[command(name = "testrun")]
#[command(version, about, long_about = None)]
#[command(after_help = concat!(
    "ENVIRONMENT:\n",
    "    TESTRUN_ROOT=<dir>    Directory commands run in (overridden by --cwd)\n",
    "    RUST_LOG=debug        Enable debug logging"
))]
pub struct Cli {
    /// Directory the command runs in
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Config file to use instead of searching for .testrun.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Exit with the child's exit code instead of 0
    #[arg(long, global = true)]
    pub propagate_exit_code: bool,

    /// Print the command without executing it
    #[arg(short, long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a single test through the test tool (default: cargo test <FILTER> -- --nocapture)
    #[command(visible_alias = "t")]
    Test(TestArgs),
    /// Run an arbitrary command and report its output
    #[command(visible_alias = "x")]
    Exec {
        /// Program followed by its arguments
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "COMMAND"
        )]
        argv: Vec<String>,
    },
    /// Write a starter .testrun.json
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct TestArgs {
    /// Test name or path filter, e.g. stdlib::numeric_ops::tests::test_add
    pub filter: Option<String>,

    /// Package to test
    #[arg(short, long)]
    pub package: Option<String>,

    /// Features to enable (comma separated or repeated)
    #[arg(short = 'F', long, value_delimiter = ',')]
    pub features: Vec<String>,

    /// Toolchain channel, e.g. nightly
    #[arg(long)]
    pub channel: Option<String>,

    /// Extra argument for the test tool, before `--` (repeatable)
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub extra_args: Vec<String>,

    /// Arguments forwarded to the test binary
    #[arg(last = true, value_name = "TEST_BINARY_ARGS")]
    pub test_args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

impl Cli {
    /// Execute the command, returning the exit code for this process
    pub fn execute(self) -> Result<i32> {
        let current_dir = env::current_dir().context("Failed to get current directory")?;

        let loaded = match Config::discover(self.config.as_deref(), &current_dir) {
            Ok(loaded) => loaded,
            // init may be about to replace a missing or broken config
            Err(e) if matches!(self.command, Commands::Init { .. }) => {
                warn!("Ignoring configuration for init: {e}");
                LoadedConfig::default()
            }
            Err(e) => return Err(anyhow::Error::new(e).context("Failed to load configuration")),
        };
        let env_root = env::var(ROOT_ENV_VAR).ok();
        let working_dir =
            resolve_working_dir(self.cwd.as_deref(), env_root.as_deref(), &loaded, &current_dir);
        debug!("Resolved working directory: {}", working_dir.display());

        let options = RunOptions {
            format: self
                .format
                .map(ReportFormat::from)
                .or(loaded.config.format)
                .unwrap_or_default(),
            propagate_exit_code: self.propagate_exit_code
                || loaded.config.propagate_exit_code.unwrap_or(false),
            dry_run: self.dry_run,
        };

        let runner = SystemRunner::new();
        let mut stdout = std::io::stdout().lock();

        match self.command {
            Commands::Test(args) => test_command(
                &runner,
                args,
                loaded.config.test.as_ref(),
                working_dir,
                &options,
                &mut stdout,
            ),
            Commands::Exec { argv } => {
                exec_command(&runner, argv, working_dir, &options, &mut stdout)
            }
            Commands::Init { force } => {
                init_command(&working_dir, force, options.dry_run)?;
                Ok(0)
            }
        }
    }
}
