// Roman verbalizer.
//
// The spelled value passes through unchanged by default. The ordinal reading
// ("Chapter IV" -> "chapter the fourth") is kept as a penalised alternative,
// so lookups pick the plain reading unless alternatives are asked for.

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::ops::insert;

use crate::capability::Engine;
use crate::grammar::{Grammar, GraphFst, delete_field, field_value};
use crate::verbalizers::ordinal::OrdinalVerbalizer;

const ORDINAL_WEIGHT: f32 = 0.5;
const ARTICLE_WEIGHT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct RomanVerbalizer {
    graph: GraphFst,
}

impl RomanVerbalizer {
    pub fn new(engine: &Engine, ordinal: &OrdinalVerbalizer, deterministic: bool) -> Self {
        let article = insert("the ").add_weight(ARTICLE_WEIGHT).optional();
        let ordinal_reading = article.concat(ordinal.suffix()).add_weight(ORDINAL_WEIGHT);
        let value = field_value().union(&ordinal_reading);

        let graph = GraphFst::new(
            engine,
            SemioticClass::Roman.as_str(),
            GrammarKind::Verbalize,
            deterministic,
        );
        let fst = graph.delete_tokens(&delete_field("integer", &value));
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for RomanVerbalizer {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}
