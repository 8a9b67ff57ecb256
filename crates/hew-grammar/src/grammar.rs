//! Typed model of a compiled tree-sitter grammar descriptor.
//!
//! The external grammar compiler (`tree-sitter generate`) emits a
//! `grammar.json` artifact next to the generated parser. This module gives that
//! artifact a strongly typed shape, deserialized with [`serde_json`], so the
//! loader can check it without reinterpreting its format.

use serde::Deserialize;
use std::collections::HashMap;

pub mod rules;

pub use rules::{Rule, RuleType, RuleValue};

/// The `$schema` marker stamped into every descriptor by the grammar compiler.
///
/// A descriptor carrying any other marker was produced for a different format
/// revision and cannot be loaded by this runtime.
pub const GRAMMAR_SCHEMA_URL: &str =
    "https://tree-sitter.github.io/tree-sitter/assets/schemas/grammar.schema.json";

/// A full grammar descriptor.
///
/// This structure mirrors the serialized JSON format produced by the grammar
/// compiler. It captures the complete rule set along with auxiliary metadata
/// such as precedences, conflicts, and supertypes.
///
/// See <https://tree-sitter.github.io/tree-sitter/assets/schemas/grammar.schema.json>
#[derive(Debug, Clone, Deserialize)]
pub struct Grammar {
    /// The `$schema` field, used as the descriptor's ABI marker.
    #[serde(rename = "$schema")]
    pub schema: Option<String>,

    /// The short name of the grammar (e.g. `"hew"`).
    pub name: String,

    /// Optional name of a base grammar that this one inherits from.
    pub inherits: Option<String>,

    /// Map of all rule identifiers to their corresponding definitions.
    pub rules: HashMap<String, Rule>,

    /// "Extras" that may appear between other tokens, such as whitespace or comments.
    pub extras: Option<Vec<Rule>>,

    /// Rules implemented externally via a scanner.
    pub externals: Option<Vec<Rule>>,

    /// Names of rules that should be inlined into other rules.
    pub inline: Option<Vec<String>>,

    /// Precedence declarations that control operator binding order.
    pub precedences: Option<Vec<Vec<Precedence>>>,

    /// Explicit conflict groups expected during parsing.
    pub conflicts: Option<Vec<Vec<String>>>,

    /// Context-specific reserved word definitions.
    pub reserved: Option<HashMap<String, Vec<Rule>>>,

    /// The rule name used to identify word tokens (keywords, identifiers, etc.).
    pub word: Option<String>,

    /// A list of node supertypes, grouping related syntactic forms.
    pub supertypes: Option<Vec<String>>,
}

/// An entry of a `precedences` level: a named precedence or a rule reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Precedence {
    /// A precedence name, referenced from `PREC*` rules by string value.
    String {
        /// The precedence name.
        value: String,
    },

    /// A rule whose nodes take this level.
    Symbol {
        /// The referenced rule.
        name: String,
    },
}

/// Parse a JSON grammar descriptor into a strongly typed [`Grammar`].
///
/// # Errors
///
/// Returns [`GrammarError::JsonParse`] if the provided string is not valid JSON
/// or does not match the descriptor schema.
pub fn parse_grammar(json: &str) -> Result<Grammar, GrammarError> {
    serde_json::from_str(json).map_err(|e| GrammarError::JsonParse(e.to_string()))
}

/// Errors raised while turning descriptor text into a [`Grammar`].
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    /// The input JSON was syntactically invalid or structurally mismatched.
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl Grammar {
    /// Returns the names of rules declared by the external scanner.
    ///
    /// Externals are written either as symbol references or as string tokens;
    /// both forms make the name usable from the rule table.
    #[must_use]
    pub fn external_names(&self) -> Vec<&str> {
        self.externals
            .iter()
            .flatten()
            .filter_map(|rule| rule.symbol_name().or_else(|| rule.string_value()))
            .collect()
    }

    /// Returns `true` if `name` is defined by the rule table or the external scanner.
    #[must_use]
    pub fn defines(&self, name: &str) -> bool {
        self.rules.contains_key(name) || self.external_names().contains(&name)
    }

    /// Returns the rule names in sorted order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
