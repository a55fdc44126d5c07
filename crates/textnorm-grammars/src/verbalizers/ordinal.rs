// Ordinal verbalizer: ordinal { integer: "twenty two" } -> "twenty second"
//
// The suffix automaton rewrites the last word of a spelled cardinal into its
// ordinal form. Roman and date verbalizers reuse it.

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::{accep, cross, insert, string_map, string_set, union_all};
use textnorm_fst::symbols;

use crate::capability::Engine;
use crate::data::OrdinalTable;
use crate::grammar::{Grammar, GraphFst, delete_field};

#[derive(Debug, Clone)]
pub struct OrdinalVerbalizer {
    graph: GraphFst,
    suffix: VectorFst,
}

impl OrdinalVerbalizer {
    pub fn new(engine: &Engine, table: &OrdinalTable, deterministic: bool) -> Self {
        let suffix = suffix(table);
        let graph = GraphFst::new(
            engine,
            SemioticClass::Ordinal.as_str(),
            GrammarKind::Verbalize,
            deterministic,
        );
        let fst = graph.delete_tokens(&delete_field("integer", &suffix));
        Self {
            graph: graph.finish(fst),
            suffix,
        }
    }

    /// Spelled cardinal to spelled ordinal: "one hundred one" -> "one hundred first".
    pub fn suffix(&self) -> &VectorFst {
        &self.suffix
    }
}

impl Grammar for OrdinalVerbalizer {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}

fn suffix(table: &OrdinalTable) -> VectorFst {
    let letters = symbols::lower();
    let irregular = string_map(&table.irregular);
    let ty = letters.star().concat(&cross("ty", &table.ty_suffix));
    let special = string_set(table.irregular.keys()).union(&letters.star().concat(&accep("ty")));
    let regular = letters
        .plus()
        .difference(&special)
        .concat(&insert(&table.default_suffix));
    let last_word = union_all([&irregular, &ty, &regular]);

    let head = symbols::not_quote().star().concat(&accep(" ")).optional();
    head.concat(&last_word)
}
