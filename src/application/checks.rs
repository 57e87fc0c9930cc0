//! Entry points over the default registry and corpus
//!
//! Thin wrappers for callers that do not need a custom registry. All of them
//! are pure and safe to call from any number of threads at once.

use crate::application::ValidateUploadUseCase;
use crate::application::dto::ValidationOptions;
use crate::core::Result;
use crate::domain::entities::{FileType, Verdict};
use crate::domain::services::{ContentScanner, SignatureRegistry, infer_type};
use std::collections::BTreeSet;

/// Runs the full pipeline against a declared type name or extension
pub fn validate(data: &[u8], declared_type: &str, options: &ValidationOptions) -> Result<Verdict> {
    ValidateUploadUseCase::with_default_signatures().execute(data, declared_type, options)
}

/// Runs the full pipeline against a resolved type
pub fn validate_as(data: &[u8], file_type: FileType, options: &ValidationOptions) -> Verdict {
    ValidateUploadUseCase::with_default_signatures().execute_as(data, file_type, options)
}

/// True when `data` starts with any accepted prefix of `file_type`
pub fn matches_signature(data: &[u8], file_type: FileType) -> bool {
    SignatureRegistry::global().matches(data, file_type)
}

/// Like [`matches_signature`], resolving the type from its name first
pub fn matches_signature_named(data: &[u8], type_name: &str) -> Result<bool> {
    let file_type = type_name.parse::<FileType>()?;
    Ok(matches_signature(data, file_type))
}

/// Guesses the file type from the leading bytes
pub fn detect_file_type(data: &[u8]) -> Option<FileType> {
    SignatureRegistry::global().detect(data)
}

/// Scans content, applying the format rules of the inferred type
///
/// The type comes from the leading signature, or from SVG markup behind
/// whitespace or a BOM, matching what `validate` accepts as that type.
pub fn scan_content(data: &[u8], whitelist: &BTreeSet<String>) -> Verdict {
    scan_content_as(data, infer_type(SignatureRegistry::global(), data), whitelist)
}

/// Scans content with the format rules of `file_type`, if any
pub fn scan_content_as(data: &[u8], file_type: Option<FileType>, whitelist: &BTreeSet<String>) -> Verdict {
    ContentScanner::for_type(file_type).scan(data, whitelist)
}

/// Logical names of every supported type
pub fn list_supported_types() -> Vec<&'static str> {
    SignatureRegistry::global()
        .enabled_types()
        .iter()
        .map(|ft| ft.type_name())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ValidationError;

    #[test]
    fn test_list_supported_types() {
        assert_eq!(
            list_supported_types(),
            ["jpeg", "png", "gif", "pdf", "svg", "zip"]
        );
    }

    #[test]
    fn test_matches_signature_named_rejects_unknown_type() {
        assert_eq!(
            matches_signature_named(b"\x7fELF", "elf"),
            Err(ValidationError::UnsupportedType("elf".to_string()))
        );
        assert_eq!(matches_signature_named(b"GIF87a", "GIF"), Ok(true));
        assert_eq!(matches_signature_named(b"GIF8", "gif"), Ok(false));
    }

    #[test]
    fn test_scan_content_uses_detected_type() {
        let pdf = b"%PDF-1.7\n<< /Launch /F (cmd.exe) >>\n%%EOF";
        let verdict = scan_content(pdf, &BTreeSet::new());
        assert!(!verdict.passed);
        assert!(verdict.message.contains("Launch"));

        let not_pdf = b"plain text mentioning /Launch";
        assert!(scan_content(not_pdf, &BTreeSet::new()).passed);
    }

    #[test]
    fn test_scan_content_applies_svg_rules_behind_whitespace() {
        let svg = b"\n  <svg xmlns=\"http://www.w3.org/2000/svg\"><foreignObject/></svg>";
        assert_eq!(detect_file_type(svg), None);

        let verdict = scan_content(svg, &BTreeSet::new());
        assert!(!verdict.passed);
        assert!(verdict.message.contains("foreignObject"));
        assert_eq!(
            validate(svg, "svg", &ValidationOptions::default()).unwrap().passed,
            verdict.passed
        );
    }
}
