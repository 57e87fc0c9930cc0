//! Crate-wide error types

pub mod error;

pub use error::{Result, ScanFault, ValidationError};
