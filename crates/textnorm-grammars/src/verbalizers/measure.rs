// Measure verbalizer: measure { cardinal { integer: "two" } units: "kilograms" }
// -> "two kilograms"

use textnorm_core::enums::{GrammarKind, SemioticClass};

use crate::capability::Engine;
use crate::grammar::{Grammar, GraphFst, delete_field, delete_group, field_value};
use crate::verbalizers::cardinal::CardinalVerbalizer;
use crate::verbalizers::decimal::DecimalVerbalizer;
use crate::verbalizers::field_gap;
use crate::verbalizers::fraction::FractionVerbalizer;

#[derive(Debug, Clone)]
pub struct MeasureVerbalizer {
    graph: GraphFst,
}

impl MeasureVerbalizer {
    pub fn new(
        engine: &Engine,
        cardinal: &CardinalVerbalizer,
        decimal: Option<&DecimalVerbalizer>,
        fraction: Option<&FractionVerbalizer>,
        deterministic: bool,
    ) -> Self {
        let mut number = delete_group("cardinal", cardinal.body());
        if let Some(decimal) = decimal {
            number = number.union(&delete_group("decimal", decimal.number()));
        }
        if let Some(fraction) = fraction {
            number = number.union(&delete_group("fraction", fraction.body()));
        }
        let body = number
            .concat(&field_gap())
            .concat(&delete_field("units", &field_value()));

        let graph = GraphFst::new(
            engine,
            SemioticClass::Measure.as_str(),
            GrammarKind::Verbalize,
            deterministic,
        );
        let fst = graph.delete_tokens(&body);
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for MeasureVerbalizer {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}
