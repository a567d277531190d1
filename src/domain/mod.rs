// Domain module - Records, commands, configuration and errors
pub mod command;
pub mod config;
pub mod error;
pub mod model;
