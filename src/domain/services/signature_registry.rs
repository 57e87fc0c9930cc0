//! Signature registry service
//!
//! Manages the table of magic-number prefixes each supported file type may
//! start with. Matching a declared type is a plain prefix comparison; guessing
//! an undeclared type runs one Aho-Corasick pass over the buffer's head.

use crate::domain::entities::{FileSignature, FileType};
use aho_corasick::AhoCorasick;
use std::collections::HashMap;
use std::sync::LazyLock;

static DEFAULT_REGISTRY: LazyLock<SignatureRegistry> =
    LazyLock::new(SignatureRegistry::default_uploads);

/// Registry of file signatures for upload type checks
///
/// # Example
///
/// ```
/// use argos_shield::domain::services::SignatureRegistry;
/// use argos_shield::domain::entities::FileType;
///
/// let registry = SignatureRegistry::global();
/// let jpeg_data = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
/// assert!(registry.matches(jpeg_data, FileType::Jpeg));
/// assert_eq!(registry.detect(jpeg_data), Some(FileType::Jpeg));
/// ```
#[derive(Debug)]
pub struct SignatureRegistry {
    signatures: HashMap<FileType, Vec<FileSignature>>,
    enabled_types: Vec<FileType>,
    /// Aho-Corasick automaton over every registered header
    pattern_matcher: Option<AhoCorasick>,
    /// Maps pattern index to (FileType, signature index within that type)
    pattern_map: Vec<(FileType, usize)>,
    /// Longest registered header; detection never looks further than this
    max_header_len: usize,
}

impl SignatureRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            signatures: HashMap::new(),
            enabled_types: Vec::new(),
            pattern_matcher: None,
            pattern_map: Vec::new(),
            max_header_len: 0,
        }
    }

    /// Returns the process-wide registry with the default upload signatures
    pub fn global() -> &'static SignatureRegistry {
        &DEFAULT_REGISTRY
    }

    /// Creates a registry with the default upload signatures
    pub fn default_uploads() -> Self {
        let mut registry = Self::new();

        // JPEG: SOI marker followed by APP0 (JFIF) or APP1 (EXIF)
        registry.register(FileSignature::new(
            FileType::Jpeg,
            [0xFF, 0xD8, 0xFF, 0xE0],
            "JFIF",
        ));
        registry.register(FileSignature::new(
            FileType::Jpeg,
            [0xFF, 0xD8, 0xFF, 0xE1],
            "EXIF",
        ));

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        registry.register(FileSignature::new(
            FileType::Png,
            [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
            "PNG",
        ));

        registry.register(FileSignature::new(FileType::Gif, *b"GIF87a", "GIF87a"));
        registry.register(FileSignature::new(FileType::Gif, *b"GIF89a", "GIF89a"));

        registry.register(FileSignature::new(FileType::Pdf, *b"%PDF", "PDF"));

        // SVG is text; producers start with either the XML prologue or the root tag
        registry.register(FileSignature::new(FileType::Svg, *b"<?xml", "XML prologue"));
        registry.register(FileSignature::new(FileType::Svg, *b"<svg", "SVG root"));

        // ZIP: local file header, empty archive, spanned archive
        registry.register(FileSignature::new(
            FileType::Zip,
            [0x50, 0x4B, 0x03, 0x04],
            "local file header",
        ));
        registry.register(FileSignature::new(
            FileType::Zip,
            [0x50, 0x4B, 0x05, 0x06],
            "empty archive",
        ));
        registry.register(FileSignature::new(
            FileType::Zip,
            [0x50, 0x4B, 0x07, 0x08],
            "spanned archive",
        ));

        registry.build_pattern_matcher();
        registry
    }

    /// Registers a new file signature
    pub fn register(&mut self, signature: FileSignature) {
        let file_type = signature.file_type();

        if !self.enabled_types.contains(&file_type) {
            self.enabled_types.push(file_type);
        }

        self.max_header_len = self.max_header_len.max(signature.len());
        self.signatures.entry(file_type).or_default().push(signature);

        // Invalidate the pattern matcher - needs rebuild
        self.pattern_matcher = None;
    }

    /// Builds the Aho-Corasick automaton from registered signatures
    pub fn build_pattern_matcher(&mut self) {
        let mut patterns: Vec<&[u8]> = Vec::new();
        let mut pattern_map: Vec<(FileType, usize)> = Vec::new();

        for file_type in &self.enabled_types {
            if let Some(sigs) = self.signatures.get(file_type) {
                for (idx, sig) in sigs.iter().enumerate() {
                    patterns.push(sig.header());
                    pattern_map.push((*file_type, idx));
                }
            }
        }

        if !patterns.is_empty() {
            self.pattern_matcher = match AhoCorasick::new(&patterns) {
                Ok(matcher) => Some(matcher),
                Err(e) => {
                    tracing::warn!("signature automaton build failed, using linear scan: {}", e);
                    None
                }
            };
        }
        self.pattern_map = pattern_map;
    }

    /// Returns all registered signatures for a file type
    pub fn get_signatures(&self, file_type: FileType) -> &[FileSignature] {
        self.signatures
            .get(&file_type)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the enabled file types in registration order
    pub fn enabled_types(&self) -> &[FileType] {
        &self.enabled_types
    }

    /// Returns true when the type has at least one registered signature
    pub fn supports(&self, file_type: FileType) -> bool {
        !self.get_signatures(file_type).is_empty()
    }

    /// Checks `data` against every accepted prefix of `file_type`
    ///
    /// True iff any one signature matches. Signatures longer than the buffer
    /// simply do not match.
    pub fn matches(&self, data: &[u8], file_type: FileType) -> bool {
        self.find_signature(data, file_type).is_some()
    }

    /// Returns the first signature of `file_type` that prefixes `data`
    pub fn find_signature(&self, data: &[u8], file_type: FileType) -> Option<&FileSignature> {
        self.get_signatures(file_type)
            .iter()
            .find(|sig| sig.matches_header(data))
    }

    /// Guesses the file type from the leading bytes
    ///
    /// When several types match, the one registered first wins.
    pub fn detect(&self, data: &[u8]) -> Option<FileType> {
        let matcher = match &self.pattern_matcher {
            Some(m) => m,
            None => return self.detect_linear(data),
        };

        let head = &data[..data.len().min(self.max_header_len)];

        matcher
            .find_overlapping_iter(head)
            .filter(|mat| mat.start() == 0)
            .map(|mat| mat.pattern().as_usize())
            .min()
            .and_then(|idx| self.pattern_map.get(idx))
            .map(|(file_type, _)| *file_type)
    }

    /// Fallback linear search for when pattern matcher is not built
    fn detect_linear(&self, data: &[u8]) -> Option<FileType> {
        self.enabled_types
            .iter()
            .copied()
            .find(|file_type| self.matches(data, *file_type))
    }

    /// Returns the number of registered signatures
    pub fn signature_count(&self) -> usize {
        self.signatures.values().map(|v| v.len()).sum()
    }
}

impl Default for SignatureRegistry {
    fn default() -> Self {
        Self::default_uploads()
    }
}
