//! Loading and validation of the Hew tree-sitter grammar.
//!
//! ```
//! let language = hew_grammar::hew::language().expect("Error loading Hew grammar");
//! assert!(hew_grammar::is_valid(&language));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::multiple_crate_versions)]

/// Loader policy.
pub mod config;

/// The opaque grammar artifact and where its bytes come from.
pub mod descriptor;

/// Failure taxonomy for grammar loading.
pub mod error;

/// Typed model of a compiled grammar descriptor.
///
/// This module defines how a descriptor's rule graph is understood; the
/// loader and validator build on these types.
pub mod grammar;

/// The Hew grammar, linked into the crate.
pub mod hew;

/// The validated language handle.
pub mod language;

/// Turning descriptors into language handles.
pub mod loader;

/// Grammar validation and consistency checking utilities.
///
/// Validation protects downstream parser engines from malformed grammars by
/// enforcing the descriptor's invariants before a handle is handed out.
pub mod validate;

pub use config::LoadOptions;
pub use descriptor::{DescriptorSource, GrammarDescriptor};
pub use error::GrammarLoadError;
pub use grammar::{parse_grammar, Grammar, GrammarError, Rule, GRAMMAR_SCHEMA_URL};
pub use language::LanguageHandle;
pub use loader::{is_valid, load_language, GrammarLoader};
pub use validate::{validate, ValidationError, ValidationReport};
