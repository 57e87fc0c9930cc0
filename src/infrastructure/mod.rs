//! Infrastructure layer
//!
//! Adapters between the outside world and the validation core: reading
//! uploads from disk and reading options from a config file.

pub mod config;
pub mod file_loader;

pub use config::{ConfigError, load_options, parse_options};
pub use file_loader::{FileLoader, LoadError, LoadedFile, TypeHint};
