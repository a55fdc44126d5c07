// Money verbalizer: money { integer_part: "five" currency_maj: "dollars"
// fractional_part: "fifty" currency_min: "cents" } -> "five dollars fifty cents"

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::{insert, union_all};

use crate::capability::Engine;
use crate::data::MoneyTable;
use crate::grammar::{Grammar, GraphFst, delete_field, delete_space, field_value};
use crate::verbalizers::field_gap;

/// Penalty on the "and" reading, kept as an alternative only.
const AND_WEIGHT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct MoneyVerbalizer {
    graph: GraphFst,
}

impl MoneyVerbalizer {
    pub fn new(engine: &Engine, table: &MoneyTable, deterministic: bool) -> Self {
        let value = field_value();
        let pair = |amount: &str, unit: &str| {
            VectorFst::concat_all([
                &delete_field(amount, &value),
                &field_gap(),
                &delete_field(unit, &value),
            ])
        };
        let major = pair("integer_part", "currency_maj");
        let minor = pair("fractional_part", "currency_min");

        let mut join = field_gap();
        if !deterministic {
            let and = delete_space()
                .concat(&insert(&format!(" {} ", table.and)))
                .add_weight(AND_WEIGHT);
            join = join.union(&and);
        }
        let both = VectorFst::concat_all([&major, &join, &minor]);

        let graph = GraphFst::new(
            engine,
            SemioticClass::Money.as_str(),
            GrammarKind::Verbalize,
            deterministic,
        );
        let fst = graph.delete_tokens(&union_all([&major, &both, &minor]));
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for MoneyVerbalizer {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}
