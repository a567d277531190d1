// CLI module - Command line interface
pub mod args;
pub mod commands;
pub mod output;

pub use args::{Args, Command, FormatArg};
pub use commands::{execute_command, CommandExecutor};
pub use output::{ConsoleLogger, Logger, MemoryLogger};
