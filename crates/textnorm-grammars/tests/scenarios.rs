//! Grammar-level properties: leading zeros, signs, digit grouping,
//! verbalizer compatibility and optimization.
//!
//! Run: cargo test -p textnorm-grammars --test scenarios

use textnorm_grammars::data::{AlternativeFormats, LocaleData};
use textnorm_grammars::grammar::Grammar;
use textnorm_grammars::numbers::NumberNames;
use textnorm_grammars::taggers::CardinalFst;
use textnorm_grammars::verbalizers::{CardinalVerbalizer, OrdinalVerbalizer, RomanVerbalizer};
use textnorm_grammars::{ClassifyFst, Engine, Normalizer, NormalizerOptions, engine};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn locale(language: &str) -> LocaleData {
    let empty = tempfile::tempdir().unwrap();
    LocaleData::load(language, Some(empty.path())).unwrap()
}

fn space_and_comma() -> AlternativeFormats {
    AlternativeFormats {
        separators: vec![" ".to_string(), ",".to_string()],
        rewrites: Vec::new(),
    }
}

/// Cardinal tagger that renders numerals as canonical digit strings.
fn digit_cardinal(engine: &Engine) -> CardinalFst {
    CardinalFst::new(engine, &NumberNames::digits(), &space_and_comma(), true)
}

fn integer_field(tagged: &str) -> Option<&str> {
    let start = tagged.find("integer: \"")? + "integer: \"".len();
    let len = tagged[start..].find('"')?;
    Some(&tagged[start..start + len])
}

// ---------------------------------------------------------------------------
// Concrete scenarios
// ---------------------------------------------------------------------------

#[test]
fn space_grouped_russian_thousand() {
    let engine = engine().unwrap();
    let ru = locale("ru");
    let names = NumberNames::from_table("ru", &ru.numbers).unwrap();
    let cardinal = CardinalFst::new(&engine, &names, &ru.formats, true);
    assert_eq!(
        cardinal.fst().transduce("1 001").as_deref(),
        Some(r#"cardinal { integer: "тысяча один" }"#)
    );

    let classify = ClassifyFst::new(&engine, &ru, true).unwrap();
    assert_eq!(
        classify.fst().transduce("1 001").as_deref(),
        Some(r#"tokens { cardinal { integer: "тысяча один" } }"#)
    );
}

#[test]
fn negative_five() {
    let engine = engine().unwrap();
    assert_eq!(
        digit_cardinal(&engine).fst().transduce("-5").as_deref(),
        Some(r#"cardinal { negative: "true" integer: "5" }"#)
    );
}

#[test]
fn leading_zero_stripped() {
    let engine = engine().unwrap();
    assert_eq!(
        digit_cardinal(&engine).fst().transduce("03").as_deref(),
        Some(r#"cardinal { integer: "3" }"#)
    );
}

// ---------------------------------------------------------------------------
// Top-level grammars
// ---------------------------------------------------------------------------

fn english_classify() -> ClassifyFst {
    ClassifyFst::new(&engine().unwrap(), &locale("en"), true).unwrap()
}

fn english(deterministic: bool) -> Normalizer {
    let empty = tempfile::tempdir().unwrap();
    let options = NormalizerOptions {
        deterministic,
        data_dir: Some(empty.path().to_path_buf()),
        ..NormalizerOptions::default()
    };
    Normalizer::new(&engine().unwrap(), &options).unwrap()
}

#[test]
fn classify_negative_and_zero_padded() {
    let classify = english_classify();
    assert_eq!(
        classify.fst().transduce("-5").as_deref(),
        Some(r#"tokens { cardinal { negative: "true" integer: "five" } }"#)
    );
    assert_eq!(
        classify.fst().transduce("03").as_deref(),
        Some(r#"tokens { cardinal { integer: "three" } }"#)
    );
}

#[test]
fn malformed_grouping_is_left_untagged() {
    assert!(!english_classify().fst().accepts("1,0 01"));

    let normalizer = english(true);
    assert!(normalizer.tag("1,0 01").is_none());
    assert_eq!(normalizer.normalize("1,0 01"), "1,0 01");
    assert_eq!(normalizer.normalize("call 1,0 01 now"), "call 1,0 01 now");
}

#[test]
fn blank_input_normalizes_to_nothing() {
    let normalizer = english(true);
    assert_eq!(normalizer.normalize(""), "");
    assert_eq!(normalizer.normalize("   "), "");
    assert_eq!(normalizer.normalize(" \t "), "");
}

#[test]
fn fractions_read_aloud() {
    let normalizer = english(true);
    assert_eq!(normalizer.normalize("-5"), "minus five");
    assert_eq!(normalizer.normalize("3/4"), "three quarters");
    assert_eq!(normalizer.normalize("2 1/2 kg"), "two and one half kilograms");
    assert_eq!(normalizer.normalize("1/3"), "one third");
}

#[test]
fn abbreviation_is_an_alternative_only() {
    assert_eq!(english(true).normalize_alternatives("NASA", 3), ["NASA"]);

    let alternatives = english(false).normalize_alternatives("NASA", 3);
    assert_eq!(alternatives.len(), 2, "{alternatives:?}");
    assert!(alternatives.contains(&"N A S A".to_string()));
    assert!(alternatives.contains(&"NASA".to_string()));
}

#[test]
fn roman_identity_reading() {
    let engine = engine().unwrap();
    let en = locale("en");
    let ordinal = OrdinalVerbalizer::new(&engine, en.ordinals.as_ref().unwrap(), true);
    let roman = RomanVerbalizer::new(&engine, &ordinal, true);
    assert_eq!(
        roman.fst().transduce(r#"roman { integer: "one" }"#).as_deref(),
        Some("one")
    );
}

#[test]
fn mixed_separators_rejected() {
    let engine = engine().unwrap();
    assert!(!digit_cardinal(&engine).fst().accepts("1,0 01"));

    let en = locale("en");
    let names = NumberNames::from_table("en", &en.numbers).unwrap();
    let cardinal = CardinalFst::new(&engine, &names, &en.formats, true);
    assert!(!cardinal.fst().accepts("1,0 01"));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn leading_zeros_never_change_the_value() {
    let engine = engine().unwrap();
    let cardinal = digit_cardinal(&engine);
    for n in [0u64, 1, 7, 10, 42, 305, 1000, 90_210, 123_456_789] {
        let plain = cardinal.fst().transduce(&n.to_string()).unwrap();
        assert_eq!(integer_field(&plain), Some(n.to_string().as_str()));
        for zeros in 1..4 {
            let padded = format!("{}{n}", "0".repeat(zeros));
            assert_eq!(cardinal.fst().transduce(&padded), Some(plain.clone()), "{padded}");
        }
    }
}

#[test]
fn sign_only_adds_negative_field() {
    let engine = engine().unwrap();
    let en = locale("en");
    let names = NumberNames::from_table("en", &en.numbers).unwrap();
    let cardinal = CardinalFst::new(&engine, &names, &en.formats, true);
    for numeral in ["1", "12", "999", "1,000", "1000", "007", "123,456,789"] {
        let positive = cardinal.fst().transduce(numeral).unwrap();
        let negative = cardinal.fst().transduce(&format!("-{numeral}")).unwrap();
        assert!(!positive.contains("negative"), "{positive}");
        assert!(negative.contains(r#"negative: "true""#), "{negative}");
        assert_eq!(integer_field(&positive), integer_field(&negative));
    }
}

#[test]
fn consistent_grouping_accepted() {
    let engine = engine().unwrap();
    let cardinal = digit_cardinal(&engine);
    for (grouped, integer) in [("1 000", "1000"), ("12,345,678", "12345678"), ("100 000 000", "100000000")] {
        let tagged = cardinal.fst().transduce(grouped).unwrap();
        assert_eq!(integer_field(&tagged), Some(integer), "{grouped}");
    }
    for bad in ["1 00", "1,0000", "10,00,000", " 100", "100 ", "1  000"] {
        assert!(!cardinal.fst().accepts(bad), "{bad:?}");
    }
}

#[test]
fn verbalizer_reads_tagger_output() {
    let engine = engine().unwrap();
    let cases = [
        ("en", ["0", "5", "-17", "1,001", "250000", "-999,999,999"]),
        ("ru", ["0", "5", "-17", "1 001", "250000", "-999 999 999"]),
    ];
    for (language, inputs) in cases {
        let data = locale(language);
        let names = NumberNames::from_table(language, &data.numbers).unwrap();
        let tagger = CardinalFst::new(&engine, &names, &data.formats, true);
        let verbalizer = CardinalVerbalizer::new(&engine, &data.numbers, true);
        let pipeline = tagger.fst().compose(verbalizer.fst());
        for input in inputs {
            let tagged = tagger.fst().transduce(input).unwrap();
            let spoken = verbalizer.fst().transduce(&tagged);
            assert!(spoken.is_some(), "{language}: {tagged}");
            assert_eq!(pipeline.transduce(input), spoken, "{language}: {input}");
        }
    }
}

#[test]
fn optimization_is_idempotent() {
    let engine = engine().unwrap();
    let ru = locale("ru");
    let names = NumberNames::from_table("ru", &ru.numbers).unwrap();
    let once = CardinalFst::new(&engine, &names, &ru.formats, false).fst().clone();
    let twice = once.optimize();
    assert_eq!(once, twice);
    for input in ["1 001", "-2", "0", "21 000 000", "1,0 01", "abc"] {
        assert_eq!(
            once.outputs(input, 4).unwrap(),
            twice.outputs(input, 4).unwrap(),
            "{input}"
        );
    }
}
