//! The Hew grammar, linked into the crate.
//!
//! The descriptor is the `grammar.json` emitted by the grammar compiler for
//! Hew and vendored under `grammar/src/`.

use crate::config::LoadOptions;
use crate::descriptor::GrammarDescriptor;
use crate::error::GrammarLoadError;
use crate::language::LanguageHandle;
use crate::loader::load_language;

/// The name the Hew grammar declares.
pub const NAME: &str = "hew";

/// The compiled Hew grammar descriptor.
pub const GRAMMAR_JSON: &str = include_str!("../grammar/src/grammar.json");

/// Returns the descriptor for the embedded Hew grammar.
#[must_use]
pub const fn descriptor() -> GrammarDescriptor {
    GrammarDescriptor::embedded(NAME, GRAMMAR_JSON)
}

/// Loads the Hew language.
///
/// # Errors
///
/// Returns a [`GrammarLoadError`] if the embedded descriptor is unusable.
pub fn language() -> Result<LanguageHandle, GrammarLoadError> {
    load_language(&descriptor(), &LoadOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::RuleType;
    use crate::loader::is_valid;
    use std::collections::HashSet;

    #[test]
    fn test_can_load_grammar() {
        let language = language().expect("Error loading Hew grammar");
        assert!(is_valid(&language), "Error loading Hew grammar");
    }

    #[test]
    fn test_grammar_shape() {
        let language = language().unwrap();
        assert_eq!(language.name(), NAME);
        assert_eq!(language.start_rule(), "source_file");
        assert_eq!(language.grammar().word.as_deref(), Some("identifier"));
        assert!(language.rule("function_declaration").is_some());
        assert!(language.warnings().is_empty());
    }

    #[test]
    fn test_strict_load() {
        let language = load_language(&descriptor(), &LoadOptions::new().strict(true));
        assert!(language.is_ok());
    }

    #[test]
    fn test_vendored_descriptor_parses() {
        let grammar = crate::grammar::parse_grammar(GRAMMAR_JSON).unwrap();
        assert_eq!(grammar.name, NAME);
        assert_eq!(grammar.rules.len(), 140);

        assert_eq!(grammar.rules["none_literal"].string_value(), Some("None"));
        assert_eq!(
            grammar.rules["identifier"].pattern_value(),
            Some("[a-zA-Z_][a-zA-Z0-9_]*")
        );
        assert_eq!(grammar.rules["module_path"].rule_type, RuleType::PrecLeft);
        assert_eq!(grammar.rules["struct_init"].precedence(), Some(1));

        let mut aliases = Vec::new();
        grammar.rules["interpolated_string"].walk(&mut |rule| {
            if let Some(alias) = rule.alias_value() {
                aliases.push(alias);
            }
        });
        assert_eq!(aliases, vec!["string_content"]);

        let mut seen = HashSet::new();
        for rule in grammar.rules.values() {
            rule.walk(&mut |node| {
                seen.insert(node.rule_type);
            });
        }
        for rule_type in [
            RuleType::Prec,
            RuleType::PrecRight,
            RuleType::PrecDynamic,
            RuleType::String,
            RuleType::Pattern,
            RuleType::Alias,
            RuleType::Token,
            RuleType::ImmediateToken,
            RuleType::Field,
            RuleType::Blank,
        ] {
            assert!(seen.contains(&rule_type), "no {} rule", rule_type.as_str());
        }
    }
}
