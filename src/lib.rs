//! Upload gatekeeper: decides whether an untrusted buffer is safe to accept.
//!
//! Two stages run over every buffer. The leading bytes must match a magic
//! signature of the declared type (with structural marker checks for PDF and
//! a relaxed prologue check for SVG), and the content must not carry script,
//! PDF action or active-SVG markers. See [`validate`] for the full pipeline.

pub mod application;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::dto::{DEFAULT_MAX_SIZE_BYTES, ValidationOptions};
pub use application::{
    ValidateUploadUseCase, detect_file_type, list_supported_types, matches_signature,
    matches_signature_named, scan_content, scan_content_as, validate, validate_as,
};
pub use crate::core::{ScanFault, ValidationError};
pub use domain::entities::{FileSignature, FileType, PatternRule, Stage, Verdict};
