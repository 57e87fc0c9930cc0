//! Domain services
//!
//! Signature matching, structural checks and content scanning. Every service
//! is a pure function of its inputs over read-only static tables.

mod content_scanner;
pub mod pattern_corpus;
mod signature_registry;
mod type_check;

pub use content_scanner::ContentScanner;
pub use signature_registry::SignatureRegistry;
pub use type_check::{TypeMismatch, check_type, infer_type};
