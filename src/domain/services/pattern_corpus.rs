//! Suspicious-content pattern corpus
//!
//! Three static rule sets: generic markers checked for every upload, and
//! format-specific markers for SVG and PDF. Only PDF rules are named, and
//! only named rules can be whitelisted.
//!
//! These are heuristics. Legitimate files can trip them (a PDF with an XMP
//! `/Metadata` stream) and obfuscated payloads can slip past them; the
//! whitelist is the escape hatch for the former.

use crate::domain::entities::{FileType, PatternRule};
use std::sync::LazyLock;

/// Markers of active content that no accepted upload may carry
const GENERIC_PATTERNS: &[&str] = &[
    r"<script",
    r"javascript:",
    r"vbscript:",
    r"on(?:load|error|click|mouseover|focus|blur|submit)\s*=",
    r"eval\s*\(",
    r"document\.(?:cookie|write|location)",
    r"<iframe",
    r"<\?php",
    r"data:text/html",
];

/// Active SVG content: handlers, embedded documents, external entities
const SVG_PATTERNS: &[&str] = &[
    r"\bon[a-z]+\s*=",
    r"<foreignObject",
    r#"href\s*=\s*["']?\s*(?:javascript|data):"#,
    r"<embed",
    r"<object",
    r#"<set\b[^>]*attributeName\s*=\s*["']?on"#,
    r"<!ENTITY",
];

/// PDF action and embedding keys, by whitelist identifier
const PDF_PATTERNS: &[(&str, &str)] = &[
    ("Metadata", r"/Metadata"),
    ("OpenAction", r"/OpenAction"),
    ("JS", r"/JS\b"),
    ("JavaScript", r"/JavaScript"),
    ("Launch", r"/Launch"),
    ("EmbeddedFile", r"/EmbeddedFile"),
    ("XFA", r"/XFA"),
    ("Annots", r"/Annots"),
];

static GENERIC_RULES: LazyLock<Vec<PatternRule>> =
    LazyLock::new(|| compile_rules(GENERIC_PATTERNS.iter().map(|p| PatternRule::new(*p))));

static SVG_RULES: LazyLock<Vec<PatternRule>> =
    LazyLock::new(|| compile_rules(SVG_PATTERNS.iter().map(|p| PatternRule::new(*p))));

static PDF_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    compile_rules(
        PDF_PATTERNS
            .iter()
            .map(|(name, pattern)| PatternRule::named(*name, *pattern)),
    )
});

fn compile_rules<I>(rules: I) -> Vec<PatternRule>
where
    I: Iterator<Item = Result<PatternRule, regex::Error>>,
{
    rules
        .filter_map(|rule| match rule {
            Ok(rule) => Some(rule),
            Err(e) => {
                tracing::error!("dropping pattern rule that failed to compile: {}", e);
                None
            }
        })
        .collect()
}

/// Rules applied to every upload, against both textual views
pub fn generic_rules() -> &'static [PatternRule] {
    &GENERIC_RULES
}

/// Format-specific rules, if the format has any
pub fn rules_for(file_type: FileType) -> Option<&'static [PatternRule]> {
    match file_type {
        FileType::Pdf => Some(PDF_RULES.as_slice()),
        FileType::Svg => Some(SVG_RULES.as_slice()),
        FileType::Jpeg | FileType::Png | FileType::Gif | FileType::Zip => None,
    }
}

/// Identifiers that a whitelist may name
pub fn whitelistable_ids() -> impl Iterator<Item = &'static str> {
    PDF_PATTERNS.iter().map(|(name, _)| *name)
}
