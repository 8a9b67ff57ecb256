//! End-to-end loading through the public API.

use std::thread;

use hew_grammar::{hew, is_valid, load_language, GrammarDescriptor, GrammarLoadError, LoadOptions};

#[test]
fn test_can_load_hew_grammar() {
    let language = hew::language();
    assert!(language.is_ok(), "Error loading Hew grammar");
    assert!(is_valid(&language.unwrap()));
}

#[test]
fn test_repeated_loads_never_fail() {
    let first = hew::language().unwrap();
    for _ in 0..5 {
        let again = hew::language().unwrap();
        assert_eq!(again, first);
        assert!(is_valid(&again));
    }
}

#[test]
fn test_concurrent_loads() {
    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(|| hew::language().map(|language| language.rule_count())))
        .collect();

    let expected = hew::language().unwrap().rule_count();
    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), expected);
    }
}

#[test]
fn test_shared_handle_across_threads() {
    let language = hew::language().unwrap();
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let language = language.clone();
            thread::spawn(move || is_valid(&language))
        })
        .collect();

    for worker in workers {
        assert!(worker.join().unwrap());
    }
}

#[test]
fn test_artifact_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grammar.json");
    std::fs::write(&path, hew::GRAMMAR_JSON).unwrap();

    let descriptor = GrammarDescriptor::from_path(&path).named("hew");
    let language = load_language(&descriptor, &LoadOptions::default()).unwrap();
    assert_eq!(language, hew::language().unwrap());
    assert_eq!(language.origin(), path.display().to_string());
}

#[test]
fn test_missing_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = GrammarDescriptor::from_path(dir.path().join("grammar.json")).named("hew");

    let err = load_language(&descriptor, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, GrammarLoadError::NotFound { .. }));
}

#[test]
fn test_corrupted_artifact() {
    let truncated = &hew::GRAMMAR_JSON[..hew::GRAMMAR_JSON.len() / 2];
    let descriptor = GrammarDescriptor::from_json(truncated).named("hew");

    let err = load_language(&descriptor, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, GrammarLoadError::Malformed(_)));
}

#[test]
fn test_incompatible_artifact() {
    let json = hew::GRAMMAR_JSON.replace(
        "assets/schemas/grammar.schema.json",
        "assets/schemas/grammar.schema.v0.json",
    );
    let descriptor = GrammarDescriptor::from_json(json).named("hew");

    let err = load_language(&descriptor, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, GrammarLoadError::IncompatibleAbi { .. }));
}

#[test]
fn test_side_by_side_grammars() {
    let toy = GrammarDescriptor::from_json(
        r#"{"name": "toy", "rules": {"source_file": {"type": "STRING", "value": "x"}}}"#,
    )
    .named("toy");

    let hew_language = hew::language().unwrap();
    let toy_language = load_language(&toy, &LoadOptions::default()).unwrap();
    assert_ne!(hew_language, toy_language);
    assert!(is_valid(&hew_language) && is_valid(&toy_language));
}
