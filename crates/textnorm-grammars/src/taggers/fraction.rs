// Fraction tagger: "2 3/4" -> fraction { integer_part: "two" numerator: "three"
// denominator: "four" }

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::delete;

use crate::capability::Engine;
use crate::grammar::{Grammar, GraphFst, insert_space, quoted_field};
use crate::taggers::any_except;
use crate::taggers::cardinal::{CardinalFst, optional_negative};

#[derive(Debug, Clone)]
pub struct FractionFst {
    graph: GraphFst,
    body: VectorFst,
}

impl FractionFst {
    pub fn new(engine: &Engine, cardinal: &CardinalFst, deterministic: bool) -> Self {
        let numerator = quoted_field("numerator", cardinal.with_leading_zeros());
        let denominator = quoted_field(
            "denominator",
            &any_except(&["0"]).compose(cardinal.numbers()),
        );
        let fraction = VectorFst::concat_all([&numerator, &delete("/"), &insert_space(), &denominator]);
        let whole = VectorFst::concat_all([
            &quoted_field("integer_part", cardinal.with_leading_zeros()),
            &delete(" "),
            &insert_space(),
        ]);
        let body = optional_negative().concat(&whole.optional()).concat(&fraction);

        let graph = GraphFst::new(
            engine,
            SemioticClass::Fraction.as_str(),
            GrammarKind::Classify,
            deterministic,
        );
        let fst = graph.add_tokens(&body);
        Self {
            graph: graph.finish(fst),
            body,
        }
    }

    /// Token fields without the envelope, for the measure tagger.
    pub fn body(&self) -> &VectorFst {
        &self.body
    }
}

impl Grammar for FractionFst {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}
