//! Validation options DTO

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default upload size limit: 5 MiB
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Per-call knobs for the validation pipeline
///
/// Missing fields take their defaults when deserialized, so a config file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationOptions {
    /// Largest accepted buffer, in bytes (always > 0)
    pub max_size_bytes: u64,
    /// Whether to run the suspicious-content scan
    pub check_content: bool,
    /// Identifiers of named format rules to skip
    pub whitelist: BTreeSet<String>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            check_content: true,
            whitelist: BTreeSet::new(),
        }
    }
}

impl ValidationOptions {
    /// Creates options with the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the size limit; zero is raised to one byte
    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_size_bytes = bytes.max(1);
        self
    }

    /// Enables or disables the content scan
    pub fn with_content_check(mut self, enabled: bool) -> Self {
        self.check_content = enabled;
        self
    }

    /// Adds rule identifiers to the whitelist
    pub fn with_whitelist<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Returns the size limit in a human-readable unit, e.g. `5MB`
    pub fn max_size_human(&self) -> String {
        format_size_limit(self.max_size_bytes)
    }
}

/// Formats a byte count the way limits are quoted in messages
pub fn format_size_limit(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    let scaled = |unit: u64, suffix: &str| {
        if bytes % unit == 0 {
            format!("{}{}", bytes / unit, suffix)
        } else {
            format!("{:.2}{}", bytes as f64 / unit as f64, suffix)
        }
    };

    if bytes >= GB {
        scaled(GB, "GB")
    } else if bytes >= MB {
        scaled(MB, "MB")
    } else if bytes >= KB {
        scaled(KB, "KB")
    } else if bytes == 1 {
        "1 byte".to_string()
    } else {
        format!("{} bytes", bytes)
    }
}
