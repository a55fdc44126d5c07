//! Text normalization grammars.
//!
//! Raw text is tagged by a classify grammar into `tokens { ... }` blocks
//! (`cardinal { integer: "five" }`), and each block is rendered to spoken
//! form by a verbalize grammar. Grammars are compiled from per-locale JSON
//! tables into weighted transducers, and can be exported as archives for
//! lookup without rebuilding.
//!
//! # Architecture
//!
//! - [`capability`] -- Transducer engine self-test; every grammar needs an [`Engine`]
//! - [`grammar`] -- `Grammar` trait, token envelope and whitespace helpers
//! - [`data`] -- Locale tables (embedded, overridable from a directory)
//! - [`numbers`] -- Spelled-out number names and digit grouping
//! - [`taggers`] -- One classify grammar per semiotic class
//! - [`verbalizers`] -- One verbalize grammar per semiotic class
//! - [`classify`] / [`verbalize`] -- Top-level grammars
//! - [`normalizer`] -- Text in, spoken form out
//! - [`export`] -- Archive export
//!
//! # Example
//!
//! ```no_run
//! use textnorm_grammars::{Normalizer, NormalizerOptions, engine};
//!
//! let engine = engine()?;
//! let normalizer = Normalizer::new(&engine, &NormalizerOptions::default())?;
//! assert_eq!(normalizer.normalize("I have 3 apples."), "I have three apples.");
//! # Ok::<(), textnorm_grammars::GrammarError>(())
//! ```

pub mod capability;
pub mod classify;
pub mod data;
pub mod error;
pub mod export;
pub mod grammar;
pub mod normalizer;
pub mod numbers;
pub mod taggers;
pub mod verbalize;
pub mod verbalizers;

pub use capability::{Engine, engine};
pub use classify::ClassifyFst;
pub use data::LocaleData;
pub use error::{ExportError, GrammarError};
pub use export::{ExportedArchives, export_grammars};
pub use grammar::{Grammar, GraphFst};
pub use normalizer::{Normalizer, NormalizerOptions};
pub use verbalize::VerbalizeFst;
