//! Data transfer objects

mod validation_options;

pub use validation_options::{DEFAULT_MAX_SIZE_BYTES, ValidationOptions, format_size_limit};
