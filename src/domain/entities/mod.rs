//! Domain entities
//!
//! Core business objects: what a signature is, what a suspicious pattern is
//! and what a verdict looks like.

mod file_signature;
mod pattern_rule;
mod verdict;

pub use file_signature::{FileSignature, FileType};
pub use pattern_rule::PatternRule;
pub use verdict::{Stage, Verdict};
