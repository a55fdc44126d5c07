// Ordinal tagger: "22nd" -> ordinal { integer: "twenty two" }

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::ops::{accep, delete, union_all};
use textnorm_fst::symbols;

use crate::capability::Engine;
use crate::data::OrdinalTable;
use crate::grammar::{Grammar, GraphFst, quoted_field};
use crate::numbers::{NumberNames, ends_in};

#[derive(Debug, Clone)]
pub struct OrdinalFst {
    graph: GraphFst,
}

impl OrdinalFst {
    pub fn new(
        engine: &Engine,
        names: &NumberNames,
        table: &OrdinalTable,
        deterministic: bool,
    ) -> Self {
        let mut rules = Vec::new();
        let mut filters = Vec::new();
        for (digit, suffix) in &table.numeral_suffixes {
            let filter = ends_in(&accep(digit));
            rules.push(filter.compose(names.cardinal()).concat(&delete(suffix)));
            filters.push(filter);
        }
        let rest = symbols::digit().plus().difference(&union_all(&filters));
        rules.push(
            rest.compose(names.cardinal())
                .concat(&delete(&table.default_numeral_suffix)),
        );

        let body = quoted_field("integer", &union_all(&rules));
        let graph = GraphFst::new(
            engine,
            SemioticClass::Ordinal.as_str(),
            GrammarKind::Classify,
            deterministic,
        );
        let fst = graph.add_tokens(&body);
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for OrdinalFst {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}
