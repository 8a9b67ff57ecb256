//! The grammar loader.
//!
//! [`load_language`] turns a [`GrammarDescriptor`] into a [`LanguageHandle`], or
//! fails with a [`GrammarLoadError`] describing why the artifact is unusable.
//! Loading is a one-shot, stateless operation: it never mutates shared data, so
//! any number of threads may load the same descriptor concurrently.

use crate::config::LoadOptions;
use crate::descriptor::GrammarDescriptor;
use crate::error::GrammarLoadError;
use crate::grammar::{parse_grammar, Grammar};
use crate::language::LanguageHandle;
use crate::validate::{check_undefined_symbols, validate_from, ValidationError};

/// Loads and validates a grammar descriptor.
///
/// Checks run in order: the ABI marker, the declared name, then structural
/// validation (non-empty rule table, resolved symbols, start rule). The first
/// failing check decides the error.
///
/// # Errors
///
/// Returns a [`GrammarLoadError`] if the descriptor is missing, unreadable,
/// malformed, built for another ABI, names a different language, or fails
/// validation.
pub fn load_language(
    descriptor: &GrammarDescriptor,
    options: &LoadOptions,
) -> Result<LanguageHandle, GrammarLoadError> {
    let origin = descriptor.origin();
    let json = descriptor.contents()?;
    let grammar = parse_grammar(&json)?;

    check_abi(&grammar, options)?;

    if let Some(expected) = descriptor.name() {
        if grammar.name != expected {
            return Err(GrammarLoadError::NameMismatch {
                expected: expected.to_string(),
                found: grammar.name,
            });
        }
    }

    let report = validate_from(&grammar, options.start_rule.as_deref())?;

    if options.strict && !report.warnings.is_empty() {
        return Err(ValidationError::new(format!(
            "strict mode: {}",
            report.warnings.join("; ")
        ))
        .into());
    }

    tracing::debug!(
        grammar = %grammar.name,
        origin = %origin,
        rules = grammar.rules.len(),
        start_rule = %report.start_rule,
        "loaded grammar"
    );

    Ok(LanguageHandle::new(
        grammar,
        report.start_rule,
        origin,
        report.warnings,
    ))
}

fn check_abi(grammar: &Grammar, options: &LoadOptions) -> Result<(), GrammarLoadError> {
    match grammar.schema.as_deref() {
        Some(marker) if marker == options.expected_abi => Ok(()),
        None if !options.strict => {
            tracing::warn!(grammar = %grammar.name, "descriptor has no ABI marker");
            Ok(())
        }
        found => Err(GrammarLoadError::IncompatibleAbi {
            expected: options.expected_abi.clone(),
            found: found.map(str::to_string),
        }),
    }
}

/// Returns `true` iff `handle` is usable by a parser engine.
///
/// This re-checks the handle's structural invariants without side effects:
/// a non-empty name and rule table, a defined start rule, and resolvable
/// symbol references. It holds for every handle returned by [`load_language`].
#[must_use]
pub fn is_valid(handle: &LanguageHandle) -> bool {
    let grammar = handle.grammar();
    !grammar.name.is_empty()
        && !grammar.rules.is_empty()
        && grammar.rules.contains_key(handle.start_rule())
        && check_undefined_symbols(grammar).is_ok()
}

/// A reusable loader carrying a fixed [`LoadOptions`] policy.
///
/// Useful when several grammars are loaded side by side under the same rules.
#[derive(Debug, Clone, Default)]
pub struct GrammarLoader {
    options: LoadOptions,
}

impl GrammarLoader {
    /// Creates a loader with the given options.
    #[must_use]
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    /// The options this loader applies.
    #[must_use]
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Loads `descriptor` with this loader's options.
    ///
    /// # Errors
    ///
    /// See [`load_language`].
    pub fn load(&self, descriptor: &GrammarDescriptor) -> Result<LanguageHandle, GrammarLoadError> {
        load_language(descriptor, &self.options)
    }
}
