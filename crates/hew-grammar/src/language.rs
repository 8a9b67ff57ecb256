//! The validated language handle.

use std::fmt;
use std::sync::Arc;

use crate::grammar::{Grammar, Rule};

/// A validated, read-only handle to a loaded grammar.
///
/// Handles are only produced by the loader, and only once every check has
/// passed, so holding one means the grammar is usable by a parser engine.
/// Cloning is cheap: clones share the same parsed grammar, which is released
/// when the last clone is dropped.
#[derive(Clone)]
pub struct LanguageHandle {
    inner: Arc<LanguageData>,
}

struct LanguageData {
    grammar: Grammar,
    start_rule: String,
    abi_marker: Option<String>,
    origin: String,
    warnings: Vec<String>,
}

impl LanguageHandle {
    pub(crate) fn new(
        grammar: Grammar,
        start_rule: String,
        origin: String,
        warnings: Vec<String>,
    ) -> Self {
        let abi_marker = grammar.schema.clone();
        Self {
            inner: Arc::new(LanguageData {
                grammar,
                start_rule,
                abi_marker,
                origin,
                warnings,
            }),
        }
    }

    /// The language name declared by the descriptor.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.grammar.name
    }

    /// The full grammar this handle wraps.
    #[must_use]
    pub fn grammar(&self) -> &Grammar {
        &self.inner.grammar
    }

    /// The rule every parse starts from.
    #[must_use]
    pub fn start_rule(&self) -> &str {
        &self.inner.start_rule
    }

    /// The ABI marker the descriptor carried, if any.
    #[must_use]
    pub fn abi_marker(&self) -> Option<&str> {
        self.inner.abi_marker.as_deref()
    }

    /// Where the descriptor was loaded from.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.inner.origin
    }

    /// Validation warnings that were tolerated while loading.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.inner.warnings
    }

    /// Number of rules in the grammar.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.inner.grammar.rules.len()
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.inner.grammar.rules.get(name)
    }

    /// Returns `true` if both handles share the same loaded grammar.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for LanguageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageHandle")
            .field("name", &self.name())
            .field("start_rule", &self.start_rule())
            .field("rules", &self.rule_count())
            .field("origin", &self.origin())
            .finish_non_exhaustive()
    }
}

/// Two handles are equal when they describe the same language with the same
/// rule set, even if they were loaded separately.
impl PartialEq for LanguageHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.name() == other.name()
                && self.start_rule() == other.start_rule()
                && self.abi_marker() == other.abi_marker()
                && self.grammar().rule_names() == other.grammar().rule_names())
    }
}

impl Eq for LanguageHandle {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse_grammar;

    fn handle(json: &str) -> LanguageHandle {
        let grammar = parse_grammar(json).unwrap();
        LanguageHandle::new(grammar, "source_file".to_string(), "<memory>".to_string(), vec![])
    }

    const TOY: &str = r#"{
        "name": "toy",
        "rules": {"source_file": {"type": "STRING", "value": "x"}}
    }"#;

    #[test]
    fn test_accessors() {
        let h = handle(TOY);
        assert_eq!(h.name(), "toy");
        assert_eq!(h.start_rule(), "source_file");
        assert_eq!(h.rule_count(), 1);
        assert!(h.rule("source_file").unwrap().is_terminal());
        assert!(h.abi_marker().is_none());
        assert!(h.warnings().is_empty());
    }

    #[test]
    fn test_clones_share_grammar() {
        let a = handle(TOY);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(a, b);

        let c = handle(TOY);
        assert!(!a.ptr_eq(&c));
        assert_eq!(a, c);
    }

    #[test]
    fn test_handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LanguageHandle>();
    }
}
