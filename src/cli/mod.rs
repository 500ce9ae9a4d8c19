//! Command-line interface for Redline.

pub mod commands;

pub use commands::Cli;
