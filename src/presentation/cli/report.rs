//! Per-file results and how they are printed

use crate::domain::entities::Verdict;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt::Write as _;

/// What happened to one file
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    /// The pipeline ran and produced a verdict
    Checked(Verdict),
    /// The file never reached the pipeline, or its type was unsupported
    Error { error: String },
}

/// Result line for one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl FileReport {
    pub fn error(path: String, error: impl ToString) -> Self {
        Self {
            path,
            size_bytes: None,
            sha256: None,
            file_type: None,
            outcome: Outcome::Error {
                error: error.to_string(),
            },
        }
    }

    /// Process exit code this report alone would warrant
    pub fn exit_code(&self) -> u8 {
        match &self.outcome {
            Outcome::Checked(verdict) if verdict.passed => 0,
            Outcome::Checked(_) => 1,
            Outcome::Error { .. } => 2,
        }
    }

    /// Human-readable block for terminal output
    pub fn render(&self) -> String {
        let mut out = String::new();
        let status = match &self.outcome {
            Outcome::Checked(v) if v.passed => "OK",
            Outcome::Checked(_) => "REJECTED",
            Outcome::Error { .. } => "ERROR",
        };
        let size = self
            .size_bytes
            .map(|n| format!(" ({} bytes)", n))
            .unwrap_or_default();

        let _ = writeln!(out, "{:<8} {}{}", status, self.path, size);
        if let Some(file_type) = &self.file_type {
            let _ = writeln!(out, "  type:   {}", file_type);
        }
        if let Some(digest) = &self.sha256 {
            let _ = writeln!(out, "  sha256: {}", digest);
        }
        match &self.outcome {
            Outcome::Checked(verdict) => {
                let _ = writeln!(out, "  result: {}", verdict);
            }
            Outcome::Error { error } => {
                let _ = writeln!(out, "  error:  {}", error);
            }
        }
        out
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
