pub mod exec;
pub mod init;
pub mod run;

pub use exec::exec_command;
pub use init::init_command;
pub use run::{RunOptions, run_command};
pub use test::{build_invocation, test_command};
