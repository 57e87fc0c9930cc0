//! Pattern rule entity
//!
//! A suspicious-content regular expression, optionally named so that callers
//! can exempt it through a whitelist.

use regex::{Regex, RegexBuilder};

/// A compiled, case-insensitive search pattern
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Identifier used for whitelist lookups; `None` means not whitelistable
    name: Option<&'static str>,
    /// Source pattern as written in the corpus
    pattern: &'static str,
    regex: Regex,
}

impl PatternRule {
    /// Compiles an anonymous rule
    pub fn new(pattern: &'static str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: None,
            pattern,
            regex: Self::compile(pattern)?,
        })
    }

    /// Compiles a rule that carries a whitelist identifier
    pub fn named(name: &'static str, pattern: &'static str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: Some(name),
            pattern,
            regex: Self::compile(pattern)?,
        })
    }

    fn compile(pattern: &str) -> Result<Regex, regex::Error> {
        RegexBuilder::new(pattern).case_insensitive(true).build()
    }

    /// Returns the whitelist identifier, if any
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Returns the source pattern
    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    /// True when the pattern occurs anywhere in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// True when this rule is named and the name is in `whitelist`
    pub fn is_whitelisted<'a, I>(&self, whitelist: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        match self.name {
            Some(name) => whitelist.into_iter().any(|w| w == name),
            None => false,
        }
    }

    /// Describes the rule for diagnostics, e.g. `'JS' (/JS\b)`
    pub fn describe(&self) -> String {
        match self.name {
            Some(name) => format!("'{}' ({})", name, self.pattern),
            None => self.pattern.to_string(),
        }
    }
}
