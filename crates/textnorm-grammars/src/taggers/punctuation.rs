// Punctuation tagger: one punctuation mark -> name: "."

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::string_set;
use textnorm_fst::symbols::{ASCII_PUNCTUATION, byte_class};

use crate::capability::Engine;
use crate::grammar::{Grammar, GraphFst, quoted_field};

/// Non-ASCII marks treated as punctuation.
pub const UNICODE_PUNCTUATION: &[&str] = &[
    "«", "»", "“", "”", "„", "‘", "’", "—", "–", "…", "¡", "¿", "·",
];

/// Any one of [`UNICODE_PUNCTUATION`].
pub fn unicode_punctuation() -> VectorFst {
    string_set(UNICODE_PUNCTUATION)
}

#[derive(Debug, Clone)]
pub struct PunctuationFst {
    graph: GraphFst,
}

impl PunctuationFst {
    pub fn new(engine: &Engine, deterministic: bool) -> Self {
        // The double quote delimits field values and cannot be one.
        let ascii = byte_class(ASCII_PUNCTUATION.iter().copied().filter(|&b| b != b'"'));
        let graph = GraphFst::new(
            engine,
            SemioticClass::Punctuation.as_str(),
            GrammarKind::Classify,
            deterministic,
        );
        let fst = quoted_field("name", &ascii.union(&unicode_punctuation()));
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for PunctuationFst {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}
