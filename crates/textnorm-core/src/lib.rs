//! Shared types for the text normalization crates.
//!
//! - [`enums`] -- Semiotic classes and grammar roles
//! - [`token`] -- The tagged-token text format (`tokens { cardinal { integer: "5" } }`)

pub mod enums;
pub mod token;
