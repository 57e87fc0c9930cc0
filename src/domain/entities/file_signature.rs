//! File signature entity
//!
//! Represents the magic bytes that identify a specific file type. The
//! signature check is the first gate an upload has to pass.

use crate::core::ValidationError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Types of files the gatekeeper knows how to vet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// JPEG image format (JFIF and EXIF variants)
    Jpeg,
    /// PNG image format
    Png,
    /// GIF image format
    Gif,
    /// PDF document
    Pdf,
    /// SVG vector image (plain text XML)
    Svg,
    /// ZIP archive
    Zip,
}

impl FileType {
    /// Every supported type, in registry order
    pub const ALL: [FileType; 6] = [
        FileType::Jpeg,
        FileType::Png,
        FileType::Gif,
        FileType::Pdf,
        FileType::Svg,
        FileType::Zip,
    ];

    /// Returns the typical file extension for this file type
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Jpeg => "jpg",
            FileType::Png => "png",
            FileType::Gif => "gif",
            FileType::Pdf => "pdf",
            FileType::Svg => "svg",
            FileType::Zip => "zip",
        }
    }

    /// Returns the logical type name accepted by [`FileType::from_str`]
    pub fn type_name(&self) -> &'static str {
        match self {
            FileType::Jpeg => "jpeg",
            FileType::Png => "png",
            FileType::Gif => "gif",
            FileType::Pdf => "pdf",
            FileType::Svg => "svg",
            FileType::Zip => "zip",
        }
    }

    /// Returns a human-readable name for this file type
    pub fn name(&self) -> &'static str {
        match self {
            FileType::Jpeg => "JPEG Image",
            FileType::Png => "PNG Image",
            FileType::Gif => "GIF Image",
            FileType::Pdf => "PDF Document",
            FileType::Svg => "SVG Image",
            FileType::Zip => "ZIP Archive",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FileType {
    type Err = ValidationError;

    /// Parses a logical type name or a file extension.
    ///
    /// Matching is case-insensitive and tolerates a leading dot, so `"JPG"`,
    /// `".jpeg"` and `"jpeg"` all resolve to [`FileType::Jpeg`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "jpeg" | "jpg" | "jpe" => Ok(FileType::Jpeg),
            "png" => Ok(FileType::Png),
            "gif" => Ok(FileType::Gif),
            "pdf" => Ok(FileType::Pdf),
            "svg" => Ok(FileType::Svg),
            "zip" => Ok(FileType::Zip),
            _ => Err(ValidationError::UnsupportedType(s.to_string())),
        }
    }
}

/// A file signature: the exact byte prefix a file of some type starts with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSignature {
    /// The type of file this signature identifies
    file_type: FileType,
    /// The header bytes (magic bytes at the start of the file)
    header: Vec<u8>,
    /// Short label for the variant this prefix identifies (e.g. "JFIF")
    variant: &'static str,
}

impl FileSignature {
    /// Creates a new file signature
    pub fn new(file_type: FileType, header: impl Into<Vec<u8>>, variant: &'static str) -> Self {
        Self {
            file_type,
            header: header.into(),
            variant,
        }
    }

    /// Returns the file type this signature identifies
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Returns the header bytes
    pub fn header(&self) -> &[u8] {
        &self.header
    }

    /// Returns the variant label
    pub fn variant(&self) -> &'static str {
        self.variant
    }

    /// Returns the header length in bytes
    pub fn len(&self) -> usize {
        self.header.len()
    }

    /// Returns true for a zero-length header
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
    }

    /// Checks if the given data starts with this signature's header
    ///
    /// A buffer shorter than the header never matches.
    pub fn matches_header(&self, data: &[u8]) -> bool {
        if data.len() < self.header.len() {
            return false;
        }
        data[..self.header.len()] == self.header[..]
    }
}
