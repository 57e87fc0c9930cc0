//! Type-specific structural checks
//!
//! Combines the signature match with the per-format marker checks. SVG is
//! widened (plain-text producers often skip any exact prefix) and PDF is
//! narrowed (a header without a trailer is truncated or not a PDF at all).

use crate::domain::entities::FileType;
use crate::domain::services::SignatureRegistry;
use memchr::memmem;
use regex::Regex;
use std::sync::LazyLock;

const PDF_HEADER: &[u8] = b"%PDF-";
const PDF_TRAILER: &[u8] = b"%%EOF";
const UTF8_BOM: char = '\u{feff}';

static SVG_OPEN_TAG: LazyLock<Option<Regex>> = LazyLock::new(|| match Regex::new(r"(?i)<svg[\s>/]") {
    Ok(re) => Some(re),
    Err(e) => {
        tracing::error!("SVG root pattern failed to compile, markup check disabled: {}", e);
        None
    }
});

/// Why a buffer was not accepted as its declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMismatch {
    /// None of the type's magic prefixes matched
    Signature,
    /// SVG: no signature, and no `<svg` root behind an XML or SVG prologue
    SvgMarkup,
    /// PDF: `%PDF-` header missing
    PdfHeader,
    /// PDF: `%%EOF` trailer missing
    PdfTrailer,
}

impl TypeMismatch {
    pub fn reason(&self) -> &'static str {
        match self {
            TypeMismatch::Signature => "leading bytes match no known signature",
            TypeMismatch::SvgMarkup => "no <svg> root element behind an XML or SVG prologue",
            TypeMismatch::PdfHeader => "missing %PDF- header",
            TypeMismatch::PdfTrailer => "missing %%EOF trailer",
        }
    }
}

/// Decides whether `data` is structurally acceptable as `file_type`
pub fn check_type(
    registry: &SignatureRegistry,
    data: &[u8],
    file_type: FileType,
) -> Result<(), TypeMismatch> {
    let signature_ok = registry.matches(data, file_type);

    match file_type {
        FileType::Svg => {
            if signature_ok || has_svg_markup(data) {
                Ok(())
            } else {
                Err(TypeMismatch::SvgMarkup)
            }
        }
        FileType::Pdf => {
            if !signature_ok {
                Err(TypeMismatch::Signature)
            } else if memmem::find(data, PDF_HEADER).is_none() {
                Err(TypeMismatch::PdfHeader)
            } else if memmem::find(data, PDF_TRAILER).is_none() {
                Err(TypeMismatch::PdfTrailer)
            } else {
                Ok(())
            }
        }
        FileType::Jpeg | FileType::Png | FileType::Gif | FileType::Zip => {
            if signature_ok {
                Ok(())
            } else {
                Err(TypeMismatch::Signature)
            }
        }
    }
}

/// Infers a buffer's type for callers that did not declare one
///
/// Signature detection first; failing that, text that `check_type` would
/// accept as SVG is treated as SVG so its content rules still apply.
pub fn infer_type(registry: &SignatureRegistry, data: &[u8]) -> Option<FileType> {
    registry
        .detect(data)
        .or_else(|| has_svg_markup(data).then_some(FileType::Svg))
}

/// True for text that opens an `<svg>` element and starts with a prologue
fn has_svg_markup(data: &[u8]) -> bool {
    let text = String::from_utf8_lossy(data);
    let trimmed = text.trim_start_matches(UTF8_BOM).trim();

    let has_root = match SVG_OPEN_TAG.as_ref() {
        Some(re) => re.is_match(trimmed),
        None => false,
    };

    has_root && (starts_with_ignore_case(trimmed, "<?xml") || starts_with_ignore_case(trimmed, "<svg"))
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
