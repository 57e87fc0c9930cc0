//! Application layer
//!
//! Use cases that orchestrate the domain services, plus the convenience
//! entry points built on the default registry.

mod checks;
pub mod dto;
mod validate_upload;

pub use checks::{
    detect_file_type, list_supported_types, matches_signature, matches_signature_named,
    scan_content, scan_content_as, validate, validate_as,
};
pub use validate_upload::ValidateUploadUseCase;
