//! Command-line checker for grammar descriptors.
//!
//! With no path, checks the embedded Hew grammar. Otherwise loads the given
//! `grammar.json` and reports whether it would yield a usable language handle.

use facet::Facet;
use hew_grammar::{hew, load_language, GrammarDescriptor, LoadOptions};
use tracing_subscriber::EnvFilter;

/// Check that a compiled grammar descriptor loads and validates.
#[derive(Debug, Facet)]
struct Args {
    /// Path to a `grammar.json` descriptor (defaults to the embedded Hew grammar).
    #[facet(positional, default)]
    path: Option<String>,

    /// Require the descriptor to declare this grammar name.
    #[facet(named, short = 'n', default)]
    name: Option<String>,

    /// Start rule to validate from.
    #[facet(named, default)]
    start_rule: Option<String>,

    /// Treat validation warnings and a missing ABI marker as errors.
    #[facet(named, short = 's', default)]
    strict: bool,

    /// Only report failures.
    #[facet(named, short = 'q', default)]
    quiet: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Args = facet_args::from_std_args().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(2);
    });

    let descriptor = match &args.path {
        Some(path) => {
            let descriptor = GrammarDescriptor::from_path(path);
            match &args.name {
                Some(name) => descriptor.named(name.clone()),
                None => descriptor,
            }
        }
        None => hew::descriptor(),
    };

    let mut options = LoadOptions::new().strict(args.strict);
    if let Some(rule) = &args.start_rule {
        options = options.start_rule(rule.as_str());
    }

    match load_language(&descriptor, &options) {
        Ok(language) => {
            if !args.quiet {
                println!(
                    "ok: {} ({} rules, start: {})",
                    language.name(),
                    language.rule_count(),
                    language.start_rule()
                );
                for warning in language.warnings() {
                    println!("warning: {warning}");
                }
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
