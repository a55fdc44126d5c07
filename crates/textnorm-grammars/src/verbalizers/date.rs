// Date verbalizer.
//
//   date { month: "january" day: "five" year: "twenty twelve" } -> "january fifth twenty twelve"
//   date { day: "five" month: "january" }                       -> "the fifth of january"

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::insert;

use crate::capability::Engine;
use crate::grammar::{Grammar, GraphFst, delete_field, delete_space, field_value};
use crate::verbalizers::field_gap;
use crate::verbalizers::ordinal::OrdinalVerbalizer;

#[derive(Debug, Clone)]
pub struct DateVerbalizer {
    graph: GraphFst,
}

impl DateVerbalizer {
    pub fn new(engine: &Engine, ordinal: &OrdinalVerbalizer, deterministic: bool) -> Self {
        let value = field_value();
        let month = delete_field("month", &value);
        let day = delete_field("day", ordinal.suffix());
        let year = field_gap().concat(&delete_field("year", &value)).optional();

        let month_first = VectorFst::concat_all([
            &month,
            &field_gap().concat(&day).optional(),
            &year,
        ]);
        let day_first = VectorFst::concat_all([
            &insert("the "),
            &day,
            &delete_space(),
            &insert(" of "),
            &month,
            &year,
        ]);

        let graph = GraphFst::new(
            engine,
            SemioticClass::Date.as_str(),
            GrammarKind::Verbalize,
            deterministic,
        );
        let fst = graph.delete_tokens(&month_first.union(&day_first));
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for DateVerbalizer {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}
