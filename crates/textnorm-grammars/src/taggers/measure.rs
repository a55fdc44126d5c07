// Measure tagger: "2 kg" -> measure { cardinal { integer: "two" } units: "kilograms" }

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::{accep, delete, insert, union_all};

use crate::capability::Engine;
use crate::data::MeasureTable;
use crate::grammar::{Grammar, GraphFst, add_group, insert_space, quoted_field};
use crate::taggers::any_except;
use crate::taggers::cardinal::CardinalFst;
use crate::taggers::decimal::DecimalFst;
use crate::taggers::fraction::FractionFst;

#[derive(Debug, Clone)]
pub struct MeasureFst {
    graph: GraphFst,
}

impl MeasureFst {
    /// Without decimal or fraction grammars only whole quantities are
    /// recognised.
    pub fn new(
        engine: &Engine,
        cardinal: &CardinalFst,
        decimal: Option<&DecimalFst>,
        fraction: Option<&FractionFst>,
        table: &MeasureTable,
        deterministic: bool,
    ) -> Self {
        let units = |plural: bool| {
            let rules: Vec<VectorFst> = table
                .units
                .iter()
                .map(|(abbr, forms)| {
                    let word = &forms[usize::from(plural)];
                    delete(abbr).concat(&insert(word))
                })
                .collect();
            quoted_field("units", &union_all(&rules))
        };
        let gap = delete(" ").optional().concat(&insert_space());

        let singular = accep("1").compose(cardinal.body());
        let plural = any_except(&["1"]).compose(cardinal.body());
        let mut rules = vec![
            VectorFst::concat_all([&add_group("cardinal", &singular), &gap, &units(false)]),
            VectorFst::concat_all([&add_group("cardinal", &plural), &gap, &units(true)]),
        ];
        if let Some(decimal) = decimal {
            rules.push(VectorFst::concat_all([
                &add_group("decimal", decimal.number()),
                &gap,
                &units(true),
            ]));
        }
        if let Some(fraction) = fraction {
            rules.push(VectorFst::concat_all([
                &add_group("fraction", fraction.body()),
                &gap,
                &units(true),
            ]));
        }

        let graph = GraphFst::new(
            engine,
            SemioticClass::Measure.as_str(),
            GrammarKind::Classify,
            deterministic,
        );
        let fst = graph.add_tokens(&union_all(&rules));
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for MeasureFst {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::engine;
    use crate::data::LocaleData;
    use crate::numbers::NumberNames;

    fn measure() -> MeasureFst {
        let engine = engine().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let data = LocaleData::load("en", Some(dir.path())).unwrap();
        let names = NumberNames::from_table("en", &data.numbers).unwrap();
        let cardinal = CardinalFst::new(&engine, &names, &data.formats, true);
        let decimal = DecimalFst::new(&engine, &cardinal, &names, &data.numbers, true);
        let fraction = FractionFst::new(&engine, &cardinal, true);
        MeasureFst::new(
            &engine,
            &cardinal,
            Some(&decimal),
            Some(&fraction),
            data.measure.as_ref().unwrap(),
            true,
        )
    }

    #[test]
    fn singular_and_plural() {
        let measure = measure();
        assert_eq!(
            measure.fst().transduce("1 kg").as_deref(),
            Some(r#"measure { cardinal { integer: "one" } units: "kilogram" }"#)
        );
        assert_eq!(
            measure.fst().transduce("-20km").as_deref(),
            Some(r#"measure { cardinal { negative: "true" integer: "twenty" } units: "kilometers" }"#)
        );
        assert_eq!(
            measure.fst().transduce("50%").as_deref(),
            Some(r#"measure { cardinal { integer: "fifty" } units: "percent" }"#)
        );
    }

    #[test]
    fn decimal_quantity() {
        let measure = measure();
        assert_eq!(
            measure.fst().transduce("2.5 l").as_deref(),
            Some(r#"measure { decimal { integer_part: "two" fractional_part: "five" } units: "liters" }"#)
        );
    }

    #[test]
    fn fraction_quantity() {
        assert_eq!(
            measure().fst().transduce("3/4 kg").as_deref(),
            Some(r#"measure { fraction { numerator: "three" denominator: "four" } units: "kilograms" }"#)
        );
    }

    #[test]
    fn unknown_unit() {
        assert!(!measure().fst().accepts("5 parsecs"));
    }
}
