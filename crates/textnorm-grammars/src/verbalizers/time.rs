// Time verbalizer: time { hours: "five" minutes: "oh five" suffix: "p m" } -> "five oh five p m"
//
// A bare hour reads as "five o'clock".

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::ops::{insert, union_all};

use crate::capability::Engine;
use crate::data::TimeTable;
use crate::grammar::{Grammar, GraphFst, delete_field, field_value};
use crate::verbalizers::field_gap;

#[derive(Debug, Clone)]
pub struct TimeVerbalizer {
    graph: GraphFst,
}

impl TimeVerbalizer {
    pub fn new(engine: &Engine, table: &TimeTable, deterministic: bool) -> Self {
        let value = field_value();
        let hours = delete_field("hours", &value);
        let minutes = field_gap().concat(&delete_field("minutes", &value));
        let suffix = field_gap().concat(&delete_field("suffix", &value));

        let rest = union_all([
            &minutes.concat(&suffix.optional()),
            &suffix,
            &insert(&format!(" {}", table.oclock)),
        ]);
        let graph = GraphFst::new(
            engine,
            SemioticClass::Time.as_str(),
            GrammarKind::Verbalize,
            deterministic,
        );
        let fst = graph.delete_tokens(&hours.concat(&rest));
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for TimeVerbalizer {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}
