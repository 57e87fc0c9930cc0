use thiserror::Error;

/// Errors a caller receives instead of a verdict
///
/// These signal misuse of the API (asking for a type the registry does not
/// know), never a property of the untrusted content itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unsupported file type or extension: {0}")]
    UnsupportedType(String),
}

/// Faults raised while building the textual views of a buffer
///
/// Never escapes the scanner: the scan boundary folds it into a failing
/// verdict.
#[derive(Error, Debug)]
pub enum ScanFault {
    #[error("base64 round trip failed: {0}")]
    Base64(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
