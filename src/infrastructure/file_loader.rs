//! File loader
//!
//! Reads an upload from disk into memory and works out which type it claims
//! to be. The validation core only ever sees the resulting bytes.

use crate::domain::services::{SignatureRegistry, infer_type};
use crate::domain::entities::FileType;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading an upload from disk
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not a regular file: {0}")]
    NotAFile(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl LoadError {
    fn from_io(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(path.display().to_string()),
            io::ErrorKind::PermissionDenied => LoadError::PermissionDenied(path.display().to_string()),
            _ => LoadError::Io(err),
        }
    }
}

/// Where the declared type of a loaded file came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeHint {
    /// Set explicitly by the caller
    Explicit(String),
    /// Taken from the path extension (may name an unsupported type)
    Extension(String),
    /// Guessed from the leading bytes (or SVG markup) of an extension-less file
    Detected(FileType),
    /// No extension and no recognizable signature
    Unknown,
}

/// A file read into memory, ready for validation
#[derive(Debug, Clone)]
pub struct LoadedFile {
    path: PathBuf,
    data: Vec<u8>,
    size_on_disk: u64,
    hint: TypeHint,
}

impl LoadedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Size reported by the filesystem, which may exceed `data().len()`
    /// when the loader stopped reading at its limit
    pub fn size_on_disk(&self) -> u64 {
        self.size_on_disk
    }

    pub fn hint(&self) -> &TypeHint {
        &self.hint
    }
}

/// Reads uploads from the local filesystem
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    /// Stop reading after this many bytes (plus one, so oversize still shows)
    read_limit: Option<u64>,
    /// Overrides extension and content detection
    declared_type: Option<String>,
}

impl FileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps how much of a file is read
    ///
    /// One byte past the cap is read so that an oversized file still looks
    /// oversized to the size check, without pulling all of it into memory.
    pub fn with_read_limit(mut self, limit: u64) -> Self {
        self.read_limit = Some(limit);
        self
    }

    /// Uses `declared_type` for every file instead of guessing
    pub fn with_declared_type(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = Some(declared_type.into());
        self
    }

    /// Reads `path` and resolves its type hint
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadedFile, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| LoadError::from_io(e, path))?;
        let metadata = file.metadata().map_err(|e| LoadError::from_io(e, path))?;

        if !metadata.is_file() {
            return Err(LoadError::NotAFile(path.display().to_string()));
        }

        let size_on_disk = metadata.len();
        let to_read = match self.read_limit {
            Some(limit) => size_on_disk.min(limit.saturating_add(1)),
            None => size_on_disk,
        };

        let mut data = Vec::with_capacity(usize::try_from(to_read).unwrap_or(0));
        file.take(to_read)
            .read_to_end(&mut data)
            .map_err(|e| LoadError::from_io(e, path))?;

        tracing::debug!(path = %path.display(), size_on_disk, read = data.len(), "loaded upload");

        let hint = self.resolve_hint(path, &data);

        Ok(LoadedFile {
            path: path.to_path_buf(),
            data,
            size_on_disk,
            hint,
        })
    }

    fn resolve_hint(&self, path: &Path, data: &[u8]) -> TypeHint {
        if let Some(declared) = &self.declared_type {
            return TypeHint::Explicit(declared.clone());
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if !ext.is_empty() => TypeHint::Extension(ext.to_ascii_lowercase()),
            _ => match infer_type(SignatureRegistry::global(), data) {
                Some(file_type) => TypeHint::Detected(file_type),
                None => TypeHint::Unknown,
            },
        }
    }
}
