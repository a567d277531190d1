//! Hotload Library
//!
//! Command execution core of a release-management CLI for over-the-air
//! mobile app updates: typed commands are validated, gated behind
//! confirmation when destructive, run against a management service and
//! rendered as JSON or tables.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use cli::{CommandExecutor, ConsoleLogger, Logger, MemoryLogger};
pub use crate::core::{AutoConfirm, Confirmer, ManagementSdk, NoopPackager, Packager};
pub use domain::command::{Command, OutputFormat};
pub use domain::config::HotloadConfig;
pub use domain::error::{HotloadError, HotloadResult};
