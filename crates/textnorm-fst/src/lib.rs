//! Weighted finite-state transducer engine for text normalization grammars.
//!
//! Automata are labelled with bytes (UTF-8 code units, `1..=255`) plus the
//! epsilon label `0`, and weighted over the tropical semiring. Grammars build
//! them with the rational operations in [`ops`] and [`compose`], finish them
//! with [`optimize`], and query them through [`paths`]. Finished automata are
//! serialized with [`format`] and bundled into named archives with [`archive`].
//!
//! # Architecture
//!
//! - [`weight`] -- Tropical weights
//! - [`fst`] -- Mutable vector representation (`VectorFst`)
//! - [`symbols`] -- Byte alphabet and UTF-8 character classes
//! - [`ops`] -- Constructors and rational operations
//! - [`compose`] -- Epsilon-filtered composition
//! - [`optimize`] -- Epsilon removal, determinization, minimization
//! - [`paths`] -- Lookup: apply, shortest path, n-best outputs
//! - [`format`] -- Binary header and (de)serialization
//! - [`transition`] -- Fixed-size on-disk state and arc records
//! - [`archive`] -- Named-entry archive of serialized automata

pub mod archive;
pub mod compose;
pub mod format;
pub mod fst;
pub mod ops;
pub mod optimize;
pub mod paths;
pub mod symbols;
pub mod transition;
pub mod weight;

pub use fst::{Arc, VectorFst};
pub use weight::Weight;

/// Arc label. `0` is epsilon, `1..=255` are bytes.
pub type Label = u32;

/// Index of a state within a [`VectorFst`].
pub type StateId = u32;

/// The epsilon label: consumes or emits nothing.
pub const EPSILON: Label = 0;

/// Maximum number of search steps of the n-best search.
/// Acts as a safety limit on cyclic lattices.
pub const MAX_LOOP_COUNT: u32 = 100_000;

/// Error type for automaton serialization and archive access.
#[derive(Debug, thiserror::Error)]
pub enum FstError {
    #[error("invalid magic number in header")]
    InvalidMagic,
    #[error("data too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("kind mismatch: expected {expected:#04x}, got {actual:#04x}")]
    KindMismatch { expected: u8, actual: u8 },
    #[error("state {state} out of range (automaton has {num_states} states)")]
    InvalidState { state: u32, num_states: u32 },
    #[error("label {0} is outside the byte alphabet")]
    InvalidLabel(u32),
    #[error("invalid archive entry name: {0}")]
    InvalidEntryName(String),
    #[error("duplicate archive entry: {0}")]
    DuplicateEntry(String),
    #[error("path search gave up after {0} steps")]
    SearchLimit(u32),
    #[error("i/o error on {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}
