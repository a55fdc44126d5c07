//! Archive export into scratch directories.
//!
//! Run: cargo test -p textnorm-grammars --test export

use std::fs;

use textnorm_fst::archive::Archive;
use textnorm_grammars::export::{CLASSIFY_ENTRY, VERBALIZE_ENTRY};
use textnorm_grammars::{
    ExportError, GrammarError, Normalizer, NormalizerOptions, engine, export_grammars,
};

fn russian() -> NormalizerOptions {
    NormalizerOptions::language("ru")
}

#[test]
fn export_creates_both_archives() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("fresh");
    let written = export_grammars(&engine().unwrap(), &out, &russian()).unwrap();

    assert_eq!(written.classify, out.join("classify/tokenize_and_classify_tmp.far"));
    assert_eq!(written.verbalize, out.join("verbalize/verbalize_tmp.far"));

    let classify = Archive::open(&written.classify).unwrap();
    assert_eq!(classify.names().collect::<Vec<_>>(), [CLASSIFY_ENTRY]);
    let verbalize = Archive::open(&written.verbalize).unwrap();
    assert_eq!(verbalize.names().collect::<Vec<_>>(), [VERBALIZE_ENTRY]);
}

#[test]
fn rerun_overwrites_previous_export() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine().unwrap();
    let first = export_grammars(&engine, dir.path(), &russian()).unwrap();
    fs::write(&first.classify, b"stale").unwrap();

    let second = export_grammars(&engine, dir.path(), &russian()).unwrap();
    assert_eq!(first, second);
    let classify = Archive::open(&second.classify).unwrap();
    assert_eq!(classify.len(), 1);

    let leftovers: Vec<_> = fs::read_dir(dir.path().join("classify"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(leftovers, ["tokenize_and_classify_tmp.far"]);
}

#[test]
fn loaded_archives_normalize_like_built_grammars() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine().unwrap();
    export_grammars(&engine, dir.path(), &russian()).unwrap();

    let loaded = Normalizer::from_archive_dir(dir.path()).unwrap();
    let built = Normalizer::new(&engine, &russian()).unwrap();
    for text in ["1 001", "-5", "Привет, 21!", "слово"] {
        assert_eq!(loaded.normalize(text), built.normalize(text), "{text}");
    }
    assert_eq!(loaded.normalize("1 001"), "тысяча один");
}

#[test]
fn unwritable_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, b"").unwrap();

    let err = export_grammars(&engine().unwrap(), &blocker, &russian()).unwrap_err();
    match err {
        ExportError::Io { path, .. } => assert_eq!(path, blocker.join("classify")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_language_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = export_grammars(&engine().unwrap(), dir.path(), &NormalizerOptions::language("xx"))
        .unwrap_err();
    assert!(
        matches!(err, ExportError::Grammar(GrammarError::Config { .. })),
        "{err}"
    );
}

#[test]
fn missing_archive_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = Normalizer::from_archive_dir(dir.path()).unwrap_err();
    assert!(matches!(err, GrammarError::Fst(_)), "{err}");
}
