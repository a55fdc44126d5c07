// Money tagger: "$5.50" -> money { integer_part: "five" currency_maj: "dollars"
// fractional_part: "fifty" currency_min: "cents" }

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::{accep, delete, insert, union_all};

use crate::capability::Engine;
use crate::data::{Currency, MoneyTable};
use crate::grammar::{Grammar, GraphFst, insert_space, quoted_field};
use crate::numbers::NumberNames;
use crate::taggers::any_except;
use crate::taggers::cardinal::CardinalFst;

#[derive(Debug, Clone)]
pub struct MoneyFst {
    graph: GraphFst,
}

impl MoneyFst {
    pub fn new(
        engine: &Engine,
        cardinal: &CardinalFst,
        names: &NumberNames,
        table: &MoneyTable,
        deterministic: bool,
    ) -> Self {
        // Minor units are always two digits: "05" -> "five", "50" -> "fifty".
        let cents = delete("0").concat(names.digit()).union(names.pairs());
        let rules: Vec<VectorFst> = table
            .currencies
            .iter()
            .map(|c| currency(c, cardinal.numbers(), &cents))
            .collect();

        let graph = GraphFst::new(
            engine,
            SemioticClass::Money.as_str(),
            GrammarKind::Classify,
            deterministic,
        );
        let fst = graph.add_tokens(&union_all(&rules));
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for MoneyFst {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}

/// `amount` fields followed by the unit in the agreeing number: singular for
/// exactly `one`, plural for everything `plural` accepts.
fn amount(
    value_field: &str,
    unit_field: &str,
    value: &VectorFst,
    one: &str,
    plural: &VectorFst,
    forms: &[String; 2],
) -> VectorFst {
    let field = |filter: &VectorFst, unit: &str| {
        VectorFst::concat_all([
            &quoted_field(value_field, &filter.compose(value)),
            &insert_space(),
            &quoted_field(unit_field, &insert(unit)),
        ])
    };
    field(&accep(one), &forms[0]).union(&field(plural, &forms[1]))
}

fn currency(c: &Currency, numbers: &VectorFst, cents: &VectorFst) -> VectorFst {
    let major = amount(
        "integer_part",
        "currency_maj",
        numbers,
        "1",
        &any_except(&["1"]),
        &c.major,
    );
    let mut rules = vec![major.concat(&delete(".00").optional())];

    if let Some(minor_forms) = &c.minor {
        let minor = amount(
            "fractional_part",
            "currency_min",
            cents,
            "01",
            &any_except(&["01"]),
            minor_forms,
        );
        // "$0.50" reads as cents only.
        let nonzero_major = amount(
            "integer_part",
            "currency_maj",
            numbers,
            "1",
            &any_except(&["1", "0"]),
            &c.major,
        );
        rules.push(VectorFst::concat_all([
            &nonzero_major,
            &delete("."),
            &insert_space(),
            &minor,
        ]));
        rules.push(VectorFst::concat_all([
            &delete("0").optional(),
            &delete("."),
            &minor,
        ]));
    }
    delete(&c.symbol).concat(&union_all(&rules))
}
