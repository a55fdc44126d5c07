// Time tagger: "5:05 pm" -> time { hours: "five" minutes: "oh five" suffix: "p m" }

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::{cross, delete, string_map};

use crate::capability::Engine;
use crate::data::TimeTable;
use crate::grammar::{Grammar, GraphFst, insert_space, quoted_field};
use crate::numbers::NumberNames;
use crate::taggers::number_range;

#[derive(Debug, Clone)]
pub struct TimeFst {
    graph: GraphFst,
}

impl TimeFst {
    pub fn new(
        engine: &Engine,
        names: &NumberNames,
        table: &TimeTable,
        deterministic: bool,
    ) -> Self {
        let hour_names = delete("0").optional().concat(names.cardinal());
        let hours_24 = quoted_field("hours", &number_range(0, 23).compose(&hour_names));
        let hours_12 = quoted_field("hours", &number_range(1, 12).compose(&hour_names));

        // "05" -> "oh five", "45" -> "forty five", "00" -> no field.
        let minute_names = cross("0", &format!("{} ", table.oh))
            .concat(names.digit())
            .union(&number_range(10, 59).compose(names.pairs()));
        let minutes = delete("00").union(&insert_space().concat(&quoted_field("minutes", &minute_names)));

        let suffix = VectorFst::concat_all([
            &delete(" ").optional(),
            &insert_space(),
            &quoted_field("suffix", &string_map(&table.suffixes)),
        ]);

        let clock = VectorFst::concat_all([&hours_24, &delete(":"), &minutes, &suffix.optional()]);
        let hour_only = hours_12.concat(&suffix);

        let graph = GraphFst::new(
            engine,
            SemioticClass::Time.as_str(),
            GrammarKind::Classify,
            deterministic,
        );
        let fst = graph.add_tokens(&clock.union(&hour_only));
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for TimeFst {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}
