// Decimal verbalizer: decimal { integer_part: "three" fractional_part: "one four" }
// -> "three point one four"

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::insert;

use crate::capability::Engine;
use crate::grammar::{Grammar, GraphFst, delete_field, field_value};
use crate::verbalizers::cardinal::optional_minus;
use crate::verbalizers::field_gap;

#[derive(Debug, Clone)]
pub struct DecimalVerbalizer {
    graph: GraphFst,
    number: VectorFst,
}

impl DecimalVerbalizer {
    pub fn new(engine: &Engine, minus: &str, point: &str, deterministic: bool) -> Self {
        let value = field_value();
        let integer = delete_field("integer_part", &value);
        let fraction = VectorFst::concat_all([
            &insert(&format!("{point} ")),
            &delete_field("fractional_part", &value),
        ]);
        let quantity = field_gap().concat(&delete_field("quantity", &value));

        let unsigned = integer.concat(&field_gap()).optional().concat(&fraction);
        let number = optional_minus(minus).concat(&unsigned);
        let body = optional_minus(minus).concat(
            &unsigned
                .union(&unsigned.concat(&quantity))
                .union(&integer.concat(&quantity)),
        );

        let graph = GraphFst::new(
            engine,
            SemioticClass::Decimal.as_str(),
            GrammarKind::Verbalize,
            deterministic,
        );
        let fst = graph.delete_tokens(&body);
        Self {
            graph: graph.finish(fst),
            number,
        }
    }

    /// Fields without quantity or envelope, for the measure verbalizer.
    pub fn number(&self) -> &VectorFst {
        &self.number
    }
}

impl Grammar for DecimalVerbalizer {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}
