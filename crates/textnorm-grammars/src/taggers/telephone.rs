// Telephone tagger: "+1 555-123-4567" -> telephone { country_code: "plus one"
// number_part: "five five five, one two three, four five six seven" }

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::{delete, insert, union_all};

use crate::capability::Engine;
use crate::data::TelephoneTable;
use crate::grammar::{Grammar, GraphFst, insert_space, quoted_field};
use crate::numbers::NumberNames;

#[derive(Debug, Clone)]
pub struct TelephoneFst {
    graph: GraphFst,
}

impl TelephoneFst {
    pub fn new(
        engine: &Engine,
        names: &NumberNames,
        table: &TelephoneTable,
        deterministic: bool,
    ) -> Self {
        let d3 = names.digit_run(3);
        let d4 = names.digit_run(4);
        let sep = delete("-").union(&delete("."));
        let group_break = insert(&table.group_separator);

        let area = VectorFst::concat_all([&delete("("), &d3, &delete(")"), &delete(" ").optional()])
            .union(&d3.concat(&sep));
        let local = VectorFst::concat_all([&d3, &sep, &group_break, &d4]);
        let number_part = area.concat(&group_break).concat(&local).union(&local);

        let country_digits = union_all([&names.digit_run(1), &names.digit_run(2), &d3]);
        let country_code = VectorFst::concat_all([
            &delete("+"),
            &insert(&format!("{} ", table.plus)),
            &country_digits,
            &delete(" ").union(&sep),
        ]);

        let body = quoted_field("country_code", &country_code)
            .concat(&insert_space())
            .optional()
            .concat(&quoted_field("number_part", &number_part));
        let graph = GraphFst::new(
            engine,
            SemioticClass::Telephone.as_str(),
            GrammarKind::Classify,
            deterministic,
        );
        let fst = graph.add_tokens(&body);
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for TelephoneFst {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}
