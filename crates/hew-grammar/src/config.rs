//! Options that control how strictly a descriptor is checked while loading.

use crate::grammar::GRAMMAR_SCHEMA_URL;

/// Loader policy.
///
/// The defaults accept any descriptor produced by a current grammar compiler:
/// the `$schema` marker must match [`GRAMMAR_SCHEMA_URL`] when present, and
/// validation warnings are reported but tolerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// The ABI marker a descriptor must carry.
    pub expected_abi: String,

    /// Treat validation warnings and a missing ABI marker as load failures.
    pub strict: bool,

    /// Rule to start parsing from, overriding start-rule resolution.
    pub start_rule: Option<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            expected_abi: GRAMMAR_SCHEMA_URL.to_string(),
            strict: false,
            start_rule: None,
        }
    }
}

impl LoadOptions {
    /// Returns the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets [`LoadOptions::strict`].
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets [`LoadOptions::start_rule`].
    #[must_use]
    pub fn start_rule(mut self, rule: impl Into<String>) -> Self {
        self.start_rule = Some(rule.into());
        self
    }

    /// Sets [`LoadOptions::expected_abi`].
    #[must_use]
    pub fn expected_abi(mut self, marker: impl Into<String>) -> Self {
        self.expected_abi = marker.into();
        self
    }
}
