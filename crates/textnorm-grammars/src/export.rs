// Grammar export: compiled top-level automata written as archives.
//
//   <output_dir>/classify/tokenize_and_classify_tmp.far   entry CLASSIFY
//   <output_dir>/verbalize/verbalize_tmp.far              entry VERBALIZE
//
// Both directories are created before anything is built. Each archive is
// replaced whole, so a rerun overwrites the previous export.

use std::fs;
use std::path::{Path, PathBuf};

use textnorm_fst::VectorFst;
use textnorm_fst::archive::ArchiveWriter;

use crate::capability::Engine;
use crate::classify::ClassifyFst;
use crate::data::LocaleData;
use crate::error::ExportError;
use crate::grammar::Grammar;
use crate::normalizer::NormalizerOptions;
use crate::verbalize::VerbalizeFst;

pub const CLASSIFY_DIR: &str = "classify";
pub const VERBALIZE_DIR: &str = "verbalize";
pub const CLASSIFY_ARCHIVE: &str = "tokenize_and_classify_tmp.far";
pub const VERBALIZE_ARCHIVE: &str = "verbalize_tmp.far";
pub const CLASSIFY_ENTRY: &str = "CLASSIFY";
pub const VERBALIZE_ENTRY: &str = "VERBALIZE";

/// Paths of the archives written by [`export_grammars`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedArchives {
    pub classify: PathBuf,
    pub verbalize: PathBuf,
}

/// Build the classify and verbalize grammars described by `options` and
/// write them under `output_dir`.
pub fn export_grammars(
    engine: &Engine,
    output_dir: impl AsRef<Path>,
    options: &NormalizerOptions,
) -> Result<ExportedArchives, ExportError> {
    let output_dir = output_dir.as_ref();
    let classify_dir = create_dir(&output_dir.join(CLASSIFY_DIR))?;
    let verbalize_dir = create_dir(&output_dir.join(VERBALIZE_DIR))?;
    let data = LocaleData::load(&options.language, options.data_dir.as_deref())?;

    let (classify, verbalize) = rayon::join(
        || -> Result<PathBuf, ExportError> {
            let grammar = ClassifyFst::new(engine, &data, options.deterministic)?;
            write_archive(&classify_dir.join(CLASSIFY_ARCHIVE), CLASSIFY_ENTRY, grammar.fst())
        },
        || -> Result<PathBuf, ExportError> {
            let grammar = VerbalizeFst::new(engine, &data, options.deterministic)?;
            write_archive(&verbalize_dir.join(VERBALIZE_ARCHIVE), VERBALIZE_ENTRY, grammar.fst())
        },
    );
    Ok(ExportedArchives {
        classify: classify?,
        verbalize: verbalize?,
    })
}

fn create_dir(path: &Path) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

fn write_archive(path: &Path, entry: &str, fst: &VectorFst) -> Result<PathBuf, ExportError> {
    let mut writer = ArchiveWriter::create(path);
    writer.add(entry, fst)?;
    let path = writer.close()?;
    log::info!(
        "wrote {} ({entry}: {} states, {} arcs)",
        path.display(),
        fst.num_states(),
        fst.num_arcs()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use textnorm_fst::archive::Archive;
    use textnorm_fst::ops::cross;

    #[test]
    fn archive_has_single_named_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.far");
        write_archive(&path, "RULE", &cross("a", "b")).unwrap();
        let archive = Archive::open(&path).unwrap();
        assert_eq!(archive.names().collect::<Vec<_>>(), ["RULE"]);
        assert_eq!(archive.get("RULE").unwrap().transduce("a").as_deref(), Some("b"));
    }

    #[test]
    fn directory_blocked_by_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("out");
        fs::write(&blocker, b"").unwrap();
        let err = create_dir(&blocker.join(CLASSIFY_DIR)).unwrap_err();
        match err {
            ExportError::Io { path, .. } => assert_eq!(path, blocker.join(CLASSIFY_DIR)),
            other => panic!("unexpected error: {other}"),
        }
    }
}
