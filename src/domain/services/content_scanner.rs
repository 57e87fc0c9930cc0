//! Content scanner service
//!
//! Renders a buffer as text twice, once directly and once after a base64
//! encode/decode round trip, and searches both renderings for suspicious
//! patterns. Format-specific rules run against the direct rendering only and
//! honour the caller's whitelist.

use crate::core::ScanFault;
use crate::domain::entities::{FileType, PatternRule, Stage, Verdict};
use crate::domain::services::pattern_corpus;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Which textual rendering of the buffer a rule fired on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Raw,
    Base64RoundTrip,
}

impl View {
    fn label(&self) -> &'static str {
        match self {
            View::Raw => "raw text",
            View::Base64RoundTrip => "base64 round-trip text",
        }
    }
}

/// Produces the second textual view of a buffer
type RoundTrip = fn(&[u8]) -> Result<Vec<u8>, ScanFault>;

/// Format-specific rules plus the label used in diagnostics
#[derive(Debug, Clone, Copy)]
struct TypeRules<'r> {
    label: &'static str,
    rules: &'r [PatternRule],
}

/// Scans buffers for suspicious content
///
/// Holds borrowed rule sets only, so a scanner is cheap to build per call
/// and safe to share between threads.
#[derive(Debug, Clone, Copy)]
pub struct ContentScanner<'r> {
    generic: &'r [PatternRule],
    type_rules: Option<TypeRules<'r>>,
    round_trip: RoundTrip,
}

impl<'r> ContentScanner<'r> {
    /// Creates a scanner with the given generic rules and no format rules
    pub fn new(generic: &'r [PatternRule]) -> Self {
        Self {
            generic,
            type_rules: None,
            round_trip: base64_round_trip,
        }
    }

    /// Adds a format-specific rule set
    pub fn with_type_rules(mut self, label: &'static str, rules: &'r [PatternRule]) -> Self {
        self.type_rules = Some(TypeRules { label, rules });
        self
    }

    #[cfg(test)]
    fn with_round_trip(mut self, round_trip: RoundTrip) -> Self {
        self.round_trip = round_trip;
        self
    }

    /// Returns the number of generic rules
    pub fn generic_rule_count(&self) -> usize {
        self.generic.len()
    }

    /// Returns the number of format-specific rules
    pub fn type_rule_count(&self) -> usize {
        self.type_rules.map(|t| t.rules.len()).unwrap_or(0)
    }

    /// Scans `data`, skipping any named format rule listed in `whitelist`
    ///
    /// Never panics on hostile input: a fault while rendering the buffer is
    /// returned as a failing verdict with [`Stage::Internal`].
    pub fn scan(&self, data: &[u8], whitelist: &BTreeSet<String>) -> Verdict {
        match self.try_scan(data, whitelist) {
            Ok(verdict) => verdict,
            Err(fault) => {
                tracing::warn!("content scan aborted: {}", fault);
                Verdict::fail(Stage::Internal, format!("Content scan failed: {}", fault))
            }
        }
    }

    fn try_scan(&self, data: &[u8], whitelist: &BTreeSet<String>) -> Result<Verdict, ScanFault> {
        let raw = String::from_utf8_lossy(data);
        let round_trip = (self.round_trip)(data)?;
        let round_trip_text = String::from_utf8_lossy(&round_trip);

        let views: [(View, &Cow<'_, str>); 2] = [
            (View::Raw, &raw),
            (View::Base64RoundTrip, &round_trip_text),
        ];

        for rule in self.generic {
            for (view, text) in &views {
                if rule.is_match(text) {
                    tracing::debug!(pattern = rule.pattern(), view = view.label(), "generic rule matched");
                    return Ok(Verdict::fail(
                        Stage::Content,
                        format!(
                            "Suspicious content detected: pattern {} matched in {}",
                            rule.describe(),
                            view.label()
                        ),
                    ));
                }
            }
        }

        if let Some(TypeRules { label, rules }) = self.type_rules {
            for rule in rules.iter().filter(|r| !r.is_whitelisted(whitelist)) {
                if rule.is_match(&raw) {
                    tracing::debug!(pattern = rule.pattern(), file_type = label, "type rule matched");
                    return Ok(Verdict::fail(
                        Stage::Content,
                        format!(
                            "Suspicious {} content detected: rule {} matched",
                            label,
                            rule.describe()
                        ),
                    ));
                }
            }
        }

        Ok(Verdict::pass("No suspicious content found"))
    }
}

impl ContentScanner<'static> {
    /// Builds a scanner over the built-in corpus for `file_type`
    ///
    /// `None`, or a format without its own corpus, gets the generic rules only.
    pub fn for_type(file_type: Option<FileType>) -> Self {
        let scanner = Self::new(pattern_corpus::generic_rules());
        match file_type.and_then(|ft| pattern_corpus::rules_for(ft).map(|rules| (ft, rules))) {
            Some((ft, rules)) => scanner.with_type_rules(ft.type_name(), rules),
            None => scanner,
        }
    }
}

impl Default for ContentScanner<'static> {
    fn default() -> Self {
        Self::for_type(None)
    }
}

/// Encodes `data` as base64 and decodes it back
fn base64_round_trip(data: &[u8]) -> Result<Vec<u8>, ScanFault> {
    let encoded = STANDARD.encode(data);
    Ok(STANDARD.decode(encoded.as_bytes())?)
}
