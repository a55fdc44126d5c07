// Abbreviation verbalizer: abbreviation { value: "N A S A" } -> "N A S A"

use textnorm_core::enums::{GrammarKind, SemioticClass};

use crate::capability::Engine;
use crate::grammar::{Grammar, GraphFst, delete_field, field_value};

#[derive(Debug, Clone)]
pub struct AbbreviationVerbalizer {
    graph: GraphFst,
}

impl AbbreviationVerbalizer {
    pub fn new(engine: &Engine, deterministic: bool) -> Self {
        let graph = GraphFst::new(
            engine,
            SemioticClass::Abbreviation.as_str(),
            GrammarKind::Verbalize,
            deterministic,
        );
        let fst = graph.delete_tokens(&delete_field("value", &field_value()));
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for AbbreviationVerbalizer {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}
