// Fraction verbalizer: fraction { integer_part: "two" numerator: "three"
// denominator: "four" } -> "two and three quarters"
//
// A numerator of one takes the singular denominator, anything else the
// plural. Denominators without their own word are read as ordinals.

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::{accep, insert, string_map, string_set};

use crate::capability::Engine;
use crate::data::{FractionTable, NumberNameTable};
use crate::grammar::{Grammar, GraphFst, delete_field, field_value};
use crate::verbalizers::cardinal::optional_minus;
use crate::verbalizers::field_gap;
use crate::verbalizers::ordinal::OrdinalVerbalizer;

#[derive(Debug, Clone)]
pub struct FractionVerbalizer {
    graph: GraphFst,
    body: VectorFst,
}

impl FractionVerbalizer {
    pub fn new(
        engine: &Engine,
        ordinal: &OrdinalVerbalizer,
        numbers: &NumberNameTable,
        table: &FractionTable,
        deterministic: bool,
    ) -> Self {
        let value = field_value();
        let regular = value
            .difference(&string_set(table.denominators.keys()))
            .compose(ordinal.suffix());
        let named = |form: usize| {
            string_map(table.denominators.iter().map(|(spelled, forms)| (spelled, &forms[form])))
        };
        let singular = named(0).union(&regular);
        let plural = named(1).union(&regular.concat(&insert(&table.plural_suffix)));

        let denominator = |words: &VectorFst| field_gap().concat(&delete_field("denominator", words));
        let one = accep(&numbers.units[0]);
        let fraction = delete_field("numerator", &one)
            .concat(&denominator(&singular))
            .union(
                &delete_field("numerator", &value.difference(&one)).concat(&denominator(&plural)),
            );
        let whole = VectorFst::concat_all([
            &delete_field("integer_part", &value),
            &field_gap(),
            &insert(&format!("{} ", table.and)),
        ]);
        let body = VectorFst::concat_all([&optional_minus(&numbers.minus), &whole.optional(), &fraction]);

        let graph = GraphFst::new(
            engine,
            SemioticClass::Fraction.as_str(),
            GrammarKind::Verbalize,
            deterministic,
        );
        let fst = graph.delete_tokens(&body);
        Self {
            graph: graph.finish(fst),
            body,
        }
    }

    /// Fields without the envelope, for the measure verbalizer.
    pub fn body(&self) -> &VectorFst {
        &self.body
    }
}

impl Grammar for FractionVerbalizer {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}
