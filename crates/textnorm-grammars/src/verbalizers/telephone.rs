// Telephone verbalizer: the country code, then the number groups as tagged.

use textnorm_core::enums::{GrammarKind, SemioticClass};

use crate::capability::Engine;
use crate::grammar::{Grammar, GraphFst, delete_field, field_value};
use crate::verbalizers::field_gap;

#[derive(Debug, Clone)]
pub struct TelephoneVerbalizer {
    graph: GraphFst,
}

impl TelephoneVerbalizer {
    pub fn new(engine: &Engine, deterministic: bool) -> Self {
        let value = field_value();
        let body = delete_field("country_code", &value)
            .concat(&field_gap())
            .optional()
            .concat(&delete_field("number_part", &value));
        let graph = GraphFst::new(
            engine,
            SemioticClass::Telephone.as_str(),
            GrammarKind::Verbalize,
            deterministic,
        );
        let fst = graph.delete_tokens(&body);
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for TelephoneVerbalizer {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}
