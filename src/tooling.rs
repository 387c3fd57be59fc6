//! Tooling & Integration Layer
//!
//! Command-line glue around the store. Everything user-facing lives here.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
