//! Validation routines for grammar descriptors.
//!
//! This module performs structural checks over parsed [`Grammar`](crate::grammar::Grammar)
//! definitions: verifying symbol references, resolving the start rule, ensuring all rules
//! are reachable, and noting left recursion and precedence usage. The loader runs it
//! before handing out a [`LanguageHandle`](crate::LanguageHandle), so that a broken
//! descriptor fails where it is loaded rather than deep inside a parser engine.

use crate::grammar::{Grammar, Precedence, Rule, RuleType};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Rule name that tree-sitter grammars conventionally use as their root.
pub const CONVENTIONAL_START_RULE: &str = "source_file";

/// A validation failure encountered when checking a grammar.
///
/// Validation errors indicate issues such as undefined symbols or a missing
/// start rule, which would make the grammar unusable by a parser engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// The descriptive human-readable error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new [`ValidationError`] from a message string.
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

/// The outcome of a successful validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// The rule every parse starts from.
    pub start_rule: String,

    /// Problems that do not prevent loading, such as unreachable rules.
    pub warnings: Vec<String>,

    /// Informational observations (left recursion, mixed precedence levels).
    pub notes: Vec<String>,
}

/// Performs semantic validation of a parsed [`Grammar`](crate::grammar::Grammar).
///
/// The start rule is resolved with [`resolve_start_rule`] and no explicit request.
///
/// # Errors
///
/// Returns a [`ValidationError`] if any structural rule violation is detected.
pub fn validate(grammar: &Grammar) -> Result<ValidationReport, ValidationError> {
    validate_from(grammar, None)
}

/// Validates a grammar, starting reachability analysis from `start_rule` when given.
///
/// This function runs several consistency passes over the grammar:
///
/// - Checks that the rule table is non-empty and all referenced symbols are defined.
/// - Resolves the start rule.
/// - Warns about unreachable rules.
/// - Notes immediate left recursion.
/// - Notes rules that mix precedence levels.
///
/// # Errors
///
/// Returns a [`ValidationError`] if any structural rule violation is detected.
pub fn validate_from(
    grammar: &Grammar,
    start_rule: Option<&str>,
) -> Result<ValidationReport, ValidationError> {
    if grammar.rules.is_empty() {
        return Err(ValidationError::new("grammar has no rules"));
    }

    check_undefined_symbols(grammar)?;

    let start_rule = resolve_start_rule(grammar, start_rule)?;

    let mut report = ValidationReport {
        start_rule: start_rule.to_string(),
        ..ValidationReport::default()
    };

    check_unreachable_rules(grammar, start_rule, &mut report);
    check_left_recursion(grammar, &mut report);
    check_precedence(grammar, &mut report);

    for warning in &report.warnings {
        tracing::warn!(grammar = %grammar.name, "{warning}");
    }
    for note in &report.notes {
        tracing::info!(grammar = %grammar.name, "{note}");
    }

    Ok(report)
}

/// Determines which rule a parse of `grammar` starts from.
///
/// Resolution order: the `requested` rule when given, then a rule named
/// [`CONVENTIONAL_START_RULE`], then the single rule that no other rule refers to.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the requested rule is not defined, or if no
/// unique start rule can be determined.
pub fn resolve_start_rule<'a>(
    grammar: &'a Grammar,
    requested: Option<&str>,
) -> Result<&'a str, ValidationError> {
    if let Some(name) = requested {
        return grammar
            .rules
            .get_key_value(name)
            .map(|(key, _)| key.as_str())
            .ok_or_else(|| ValidationError::new(format!("start rule '{name}' is not defined")));
    }

    if let Some((key, _)) = grammar.rules.get_key_value(CONVENTIONAL_START_RULE) {
        return Ok(key.as_str());
    }

    let mut referenced = HashSet::new();
    for (rule_name, rule) in &grammar.rules {
        rule.for_each_symbol(&mut |name| {
            if name != rule_name {
                referenced.insert(name);
            }
        });
    }

    let roots: Vec<&str> = grammar
        .rule_names()
        .into_iter()
        .filter(|name| !referenced.contains(name))
        .collect();

    match roots.as_slice() {
        [root] => Ok(*root),
        [] => Err(ValidationError::new(
            "cannot determine start rule: every rule is referenced by another rule",
        )),
        _ => Err(ValidationError::new(format!(
            "cannot determine start rule: candidates are {}",
            roots.join(", ")
        ))),
    }
}

pub(crate) fn check_undefined_symbols(grammar: &Grammar) -> Result<(), ValidationError> {
    for rule_name in grammar.rule_names() {
        check_rule_symbols(grammar, &grammar.rules[rule_name], &format!("rule '{rule_name}'"))?;
    }

    for extra in grammar.extras.iter().flatten() {
        check_rule_symbols(grammar, extra, "extras")?;
    }

    for group in grammar.conflicts.iter().flatten() {
        for name in group {
            check_defined(grammar, name, "conflicts")?;
        }
    }

    for level in grammar.precedences.iter().flatten() {
        for entry in level {
            if let Precedence::Symbol { name } = entry {
                check_defined(grammar, name, "precedences")?;
            }
        }
    }

    if let Some(word) = &grammar.word {
        check_defined(grammar, word, "word")?;
    }

    for name in grammar.inline.iter().flatten() {
        check_defined(grammar, name, "inline")?;
    }

    for name in grammar.supertypes.iter().flatten() {
        check_defined(grammar, name, "supertypes")?;
    }

    Ok(())
}

fn check_rule_symbols(grammar: &Grammar, rule: &Rule, context: &str) -> Result<(), ValidationError> {
    let mut undefined = None;
    rule.for_each_symbol(&mut |name| {
        if undefined.is_none() && !grammar.defines(name) {
            undefined = Some(name);
        }
    });

    match undefined {
        Some(name) => Err(ValidationError::new(format!(
            "undefined symbol '{name}' referenced in {context}"
        ))),
        None => Ok(()),
    }
}

fn check_defined(grammar: &Grammar, name: &str, context: &str) -> Result<(), ValidationError> {
    if grammar.defines(name) {
        Ok(())
    } else {
        Err(ValidationError::new(format!(
            "undefined symbol '{name}' referenced in {context}"
        )))
    }
}

fn check_unreachable_rules(grammar: &Grammar, start_rule: &str, report: &mut ValidationReport) {
    let mut to_visit: Vec<&str> = vec![start_rule];
    to_visit.extend(grammar.word.as_deref());
    to_visit.extend(grammar.external_names());
    to_visit.extend(grammar.supertypes.iter().flatten().map(String::as_str));
    for extra in grammar.extras.iter().flatten() {
        extra.for_each_symbol(&mut |name| to_visit.push(name));
    }

    let mut reachable = HashSet::new();
    while let Some(rule_name) = to_visit.pop() {
        if !reachable.insert(rule_name) {
            continue;
        }

        if let Some(rule) = grammar.rules.get(rule_name) {
            rule.for_each_symbol(&mut |name| to_visit.push(name));
        }
    }

    for rule_name in grammar.rule_names() {
        let inline_contains = grammar
            .inline
            .as_ref()
            .is_some_and(|v| v.iter().any(|name| name == rule_name));

        if !reachable.contains(rule_name) && !inline_contains {
            report
                .warnings
                .push(format!("unreachable rule '{rule_name}'"));
        }
    }
}

fn check_left_recursion(grammar: &Grammar, report: &mut ValidationReport) {
    for rule_name in grammar.rule_names() {
        if has_immediate_left_recursion(&grammar.rules[rule_name], rule_name) {
            report
                .notes
                .push(format!("rule '{rule_name}' is left-recursive"));
        }
    }
}

fn has_immediate_left_recursion(rule: &Rule, target: &str) -> bool {
    match rule.rule_type {
        RuleType::Symbol => rule.name.as_deref() == Some(target),

        RuleType::Seq => rule
            .members
            .first()
            .is_some_and(|first| has_immediate_left_recursion(first, target)),

        RuleType::Choice => rule
            .members
            .iter()
            .any(|member| has_immediate_left_recursion(member, target)),

        RuleType::Prec
        | RuleType::PrecLeft
        | RuleType::PrecRight
        | RuleType::PrecDynamic
        | RuleType::Field
        | RuleType::Alias => rule
            .content
            .as_deref()
            .is_some_and(|content| has_immediate_left_recursion(content, target)),

        _ => false,
    }
}

fn check_precedence(grammar: &Grammar, report: &mut ValidationReport) {
    let mut prec_levels: BTreeMap<&str, BTreeSet<i32>> = BTreeMap::new();

    for (rule_name, rule) in &grammar.rules {
        collect_precedence_levels(rule, &mut prec_levels, rule_name);
    }

    for (rule, levels) in &prec_levels {
        if levels.len() > 1 {
            report.notes.push(format!(
                "rule '{rule}' has multiple precedence levels: {levels:?}"
            ));
        }
    }
}

fn collect_precedence_levels<'a>(
    rule: &Rule,
    levels: &mut BTreeMap<&'a str, BTreeSet<i32>>,
    context: &'a str,
) {
    if let Some(p) = rule.precedence() {
        levels.entry(context).or_default().insert(p);
    }

    // Tokens carry lexical precedence, which does not take part in parse conflicts.
    if matches!(rule.rule_type, RuleType::Token | RuleType::ImmediateToken) {
        return;
    }

    for child in rule.children() {
        collect_precedence_levels(child, levels, context);
    }
}
