//! CLI command handlers, one file per subcommand.

mod completions;
mod config;
pub(crate) mod exec;
pub(crate) mod tcp;

pub use completions::run_completions;
pub use config::run_config;
pub use exec::run_exec;
pub use tcp::run_tcp;
