//! Command description and test-tool invocation building

pub mod command_spec;
pub mod test_invocation;

// Re-export commonly used types
pub use command_spec::CommandSpec;
pub use test_invocation::TestInvocation;
