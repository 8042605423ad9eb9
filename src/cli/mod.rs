//! Command-line interface module.

mod args;
pub mod copy;

pub use args::Cli;
