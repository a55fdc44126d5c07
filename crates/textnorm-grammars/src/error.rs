// Error types for grammar construction and export.

use std::path::PathBuf;

use textnorm_fst::FstError;

/// Grammar construction failure.
///
/// A span that no grammar accepts is not an error: lookups report it as
/// `None` or an empty result.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    /// A locale table is missing or malformed.
    #[error("invalid {table} table for locale {locale:?}: {reason}")]
    Config {
        locale: String,
        table: String,
        reason: String,
    },

    /// The transducer engine failed its startup self-test.
    #[error("transducer engine unavailable: {0}")]
    CapabilityUnavailable(String),

    /// Loading a serialized automaton failed.
    #[error(transparent)]
    Fst(#[from] FstError),

    /// An archive lacks the entry for a top-level rule.
    #[error("archive {path} has no {rule} entry")]
    MissingRule { path: PathBuf, rule: String },
}

impl GrammarError {
    pub(crate) fn config(locale: &str, table: &str, reason: impl Into<String>) -> Self {
        GrammarError::Config {
            locale: locale.to_string(),
            table: table.to_string(),
            reason: reason.into(),
        }
    }
}

/// Export failure. Every variant is fatal for the export run.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// An output directory could not be created.
    #[error("cannot create directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing an archive failed.
    #[error("archive write failed: {0}")]
    Archive(#[from] FstError),

    /// Building a grammar failed.
    #[error(transparent)]
    Grammar(#[from] GrammarError),
}
