// Word tagger: any run of non-space, non-punctuation characters, with inner
// apostrophes and hyphens ("don't", "well-known").

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::ops::accep;
use textnorm_fst::symbols::{self, ASCII_PUNCTUATION, ASCII_WHITESPACE, NBSP, ascii_class};

use crate::capability::Engine;
use crate::grammar::{Grammar, GraphFst, quoted_field};
use crate::taggers::punctuation::unicode_punctuation;

#[derive(Debug, Clone)]
pub struct WordFst {
    graph: GraphFst,
}

impl WordFst {
    pub fn new(engine: &Engine, deterministic: bool) -> Self {
        let excluded: Vec<u8> = ASCII_WHITESPACE
            .iter()
            .chain(ASCII_PUNCTUATION)
            .copied()
            .collect();
        let letter = symbols::utf8_char_except(&excluded)
            .difference(&accep(NBSP).union(&unicode_punctuation()));
        let run = letter.plus();
        let word = run.concat(&ascii_class("'-").concat(&run).star());

        let graph = GraphFst::new(
            engine,
            SemioticClass::Word.as_str(),
            GrammarKind::Classify,
            deterministic,
        );
        let fst = quoted_field("name", &word);
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for WordFst {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}
