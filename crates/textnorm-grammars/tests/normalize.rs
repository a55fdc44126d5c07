//! End-to-end normalization against golden data.
//!
//! Golden pairs live in tests/golden/normalize.json, keyed by locale.
//!
//! Run: cargo test -p textnorm-grammars --test normalize

use std::path::PathBuf;
use std::sync::OnceLock;

use serde_json::Value;
use textnorm_grammars::{Normalizer, NormalizerOptions, engine};

fn normalizer(language: &str, deterministic: bool) -> &'static Normalizer {
    static EN: OnceLock<Normalizer> = OnceLock::new();
    static RU: OnceLock<Normalizer> = OnceLock::new();
    static RU_ALTERNATIVES: OnceLock<Normalizer> = OnceLock::new();
    let cell = match (language, deterministic) {
        ("en", true) => &EN,
        ("ru", true) => &RU,
        ("ru", false) => &RU_ALTERNATIVES,
        other => panic!("no normalizer for {other:?}"),
    };
    cell.get_or_init(|| {
        let options = NormalizerOptions {
            deterministic,
            ..NormalizerOptions::language(language)
        };
        Normalizer::new(&engine().unwrap(), &options).unwrap()
    })
}

fn load_golden() -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/golden/normalize.json");
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read golden file {}: {}", path.display(), e));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("failed to parse golden file {}: {}", path.display(), e))
}

fn check_locale(language: &str) {
    let golden = load_golden();
    let cases = golden[language]
        .as_array()
        .unwrap_or_else(|| panic!("no golden cases for {language}"));
    let normalizer = normalizer(language, true);
    let mut failures = Vec::new();
    for case in cases {
        let input = case[0].as_str().unwrap();
        let expected = case[1].as_str().unwrap();
        let actual = normalizer.normalize(input);
        if actual != expected {
            failures.push(format!("{input:?}: expected {expected:?}, got {actual:?}"));
        }
    }
    assert!(failures.is_empty(), "{language} mismatches:\n{}", failures.join("\n"));
}

#[test]
fn golden_en() {
    check_locale("en");
}

#[test]
fn golden_ru() {
    check_locale("ru");
}

#[test]
fn tagging_uses_token_blocks() {
    let tokens = normalizer("en", true).tag("Dr. Smith has 2").unwrap();
    let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        [
            r#"tokens { name: "doctor" }"#,
            r#"tokens { name: "Smith" }"#,
            r#"tokens { name: "has" }"#,
            r#"tokens { cardinal { integer: "two" } }"#,
        ]
    );
}

#[test]
fn deterministic_grammar_has_one_reading() {
    assert_eq!(
        normalizer("ru", true).normalize_alternatives("1 001", 3),
        ["тысяча один"]
    );
}

#[test]
fn alternatives_in_weight_order() {
    let alternatives = normalizer("ru", false).normalize_alternatives("1 001", 2);
    assert_eq!(alternatives, ["тысяча один", "одна тысяча один"]);
    assert!(normalizer("ru", false).normalize_alternatives("1 001", 0).is_empty());
}

#[test]
fn shared_across_threads() {
    let normalizer = normalizer("en", true);
    std::thread::scope(|scope| {
        let handles: Vec<_> = ["7", "-7", "70"]
            .into_iter()
            .map(|input| scope.spawn(move || normalizer.normalize(input)))
            .collect();
        let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(outputs, ["seven", "minus seven", "seventy"]);
    });
}
