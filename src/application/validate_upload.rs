//! Validate upload use case
//!
//! Runs the fixed pipeline over one buffer: size, type support, signature and
//! structure, content. The first failing stage decides the verdict.

use crate::application::dto::ValidationOptions;
use crate::core::{Result, ValidationError};
use crate::domain::entities::{FileType, Stage, Verdict};
use crate::domain::services::{ContentScanner, SignatureRegistry, check_type};

/// Validate upload use case
///
/// Borrows a signature registry and nothing else; running it has no side
/// effects beyond logging, so one instance can serve any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct ValidateUploadUseCase<'r> {
    signature_registry: &'r SignatureRegistry,
}

impl<'r> ValidateUploadUseCase<'r> {
    /// Creates a use case over the given registry
    pub fn new(signature_registry: &'r SignatureRegistry) -> Self {
        Self { signature_registry }
    }

    /// Validates `data` against a declared type name or extension
    ///
    /// A declared type the registry does not know is a caller error and comes
    /// back as `Err`, unless the size stage has already rejected the buffer.
    pub fn execute(&self, data: &[u8], declared_type: &str, options: &ValidationOptions) -> Result<Verdict> {
        if let Some(verdict) = self.check_size(data, options) {
            return Ok(verdict);
        }

        let file_type = declared_type
            .parse::<FileType>()
            .ok()
            .filter(|ft| self.signature_registry.supports(*ft))
            .ok_or_else(|| ValidationError::UnsupportedType(declared_type.to_string()))?;

        Ok(self.run_type_and_content(data, file_type, options))
    }

    /// Validates `data` against an already-resolved type
    pub fn execute_as(&self, data: &[u8], file_type: FileType, options: &ValidationOptions) -> Verdict {
        if let Some(verdict) = self.check_size(data, options) {
            return verdict;
        }
        self.run_type_and_content(data, file_type, options)
    }

    fn check_size(&self, data: &[u8], options: &ValidationOptions) -> Option<Verdict> {
        self.check_declared_size(data.len() as u64, options)
    }

    /// Runs the size stage alone on a size known without the bytes
    ///
    /// Lets a loader reject an oversized file from its metadata instead of
    /// reading it. `None` means the size is acceptable.
    pub fn check_declared_size(&self, size: u64, options: &ValidationOptions) -> Option<Verdict> {
        if size <= options.max_size_bytes {
            tracing::trace!(size, limit = options.max_size_bytes, "size check passed");
            return None;
        }

        let verdict = Verdict::fail(
            Stage::Size,
            format!(
                "File size {} bytes exceeds limit of {}",
                size,
                options.max_size_human()
            ),
        );
        tracing::info!(size, limit = options.max_size_bytes, "upload rejected at size stage");
        Some(verdict)
    }

    fn run_type_and_content(&self, data: &[u8], file_type: FileType, options: &ValidationOptions) -> Verdict {
        if let Err(mismatch) = check_type(self.signature_registry, data, file_type) {
            tracing::info!(%file_type, reason = mismatch.reason(), "upload rejected at signature stage");
            return Verdict::fail(
                Stage::Signature,
                format!(
                    "Invalid file signature for {}: {}",
                    file_type,
                    mismatch.reason()
                ),
            );
        }
        tracing::debug!(%file_type, "signature check passed");

        if options.check_content {
            let verdict = ContentScanner::for_type(Some(file_type)).scan(data, &options.whitelist);
            if !verdict.passed {
                tracing::info!(%file_type, message = %verdict.message, "upload rejected at content stage");
                return verdict;
            }
            tracing::debug!(%file_type, "content scan passed");
        }

        Verdict::pass(format!("File passed validation as {}", file_type))
    }
}

impl ValidateUploadUseCase<'static> {
    /// Creates with the default upload signatures
    pub fn with_default_signatures() -> Self {
        Self::new(SignatureRegistry::global())
    }
}

impl Default for ValidateUploadUseCase<'static> {
    fn default() -> Self {
        Self::with_default_signatures()
    }
}
