// Abbreviation tagger: "NASA" or "U.S.A." -> abbreviation { value: "N A S A" }
//
// Only built for non-deterministic grammars, where the letter-by-letter
// reading competes with the plain word.

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::{delete, insert};
use textnorm_fst::symbols;

use crate::capability::Engine;
use crate::grammar::{Grammar, GraphFst, quoted_field};

#[derive(Debug, Clone)]
pub struct AbbreviationFst {
    graph: GraphFst,
}

impl AbbreviationFst {
    pub fn new(engine: &Engine, deterministic: bool) -> Self {
        let upper = symbols::upper();
        let spaced = |letter: &VectorFst| {
            letter.concat(&insert(" ").concat(letter).plus())
        };
        let plain = spaced(&upper);
        let dotted = spaced(&upper.concat(&delete(".")));

        let graph = GraphFst::new(
            engine,
            SemioticClass::Abbreviation.as_str(),
            GrammarKind::Classify,
            deterministic,
        );
        let fst = graph.add_tokens(&quoted_field("value", &plain.union(&dotted)));
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for AbbreviationFst {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}
