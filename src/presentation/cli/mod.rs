//! CLI module

mod commands;
mod report;
mod runner;

pub use commands::{Cli, Commands};
pub use report::{FileReport, Outcome};
pub use runner::{CheckRequest, check_files, run};
