//! Verdict entity
//!
//! The pass/fail outcome of vetting one buffer.

use serde::Serialize;
use std::fmt;

/// Pipeline stage that rejected a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Buffer larger than the configured limit
    Size,
    /// Magic bytes or structural markers did not match the declared type
    Signature,
    /// A suspicious pattern was found
    Content,
    /// The scanner itself failed while inspecting the buffer
    Internal,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Size => "size",
            Stage::Signature => "signature",
            Stage::Content => "content",
            Stage::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Outcome of a validation call
///
/// `message` is diagnostic only. Callers branch on `passed` (and, if they
/// care, on `stage`), never on the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub passed: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
}

impl Verdict {
    /// Creates a passing verdict
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
            stage: None,
        }
    }

    /// Creates a failing verdict attributed to `stage`
    pub fn fail(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
            stage: Some(stage),
        }
    }

    /// Returns true when the buffer was accepted
    pub fn is_pass(&self) -> bool {
        self.passed
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage {
            Some(stage) if !self.passed => write!(f, "[{}] {}", stage, self.message),
            _ => f.write_str(&self.message),
        }
    }
}
