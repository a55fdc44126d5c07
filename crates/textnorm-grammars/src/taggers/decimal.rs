// Decimal tagger: "-3.14" -> decimal { negative: "true" integer_part: "three"
// fractional_part: "one four" }, with an optional magnitude quantity
// ("1.5 million").

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::{delete, string_set};

use crate::capability::Engine;
use crate::data::NumberNameTable;
use crate::grammar::{Grammar, GraphFst, insert_space, quoted_field};
use crate::numbers::NumberNames;
use crate::taggers::cardinal::{CardinalFst, optional_negative};

#[derive(Debug, Clone)]
pub struct DecimalFst {
    graph: GraphFst,
    number: VectorFst,
}

impl DecimalFst {
    pub fn new(
        engine: &Engine,
        cardinal: &CardinalFst,
        names: &NumberNames,
        table: &NumberNameTable,
        deterministic: bool,
    ) -> Self {
        let integer = quoted_field("integer_part", cardinal.with_leading_zeros());
        let fractional = quoted_field("fractional_part", &names.digit_sequence());
        let point = delete(".");

        // "3.14", ".5"
        let unsigned = integer
            .concat(&insert_space())
            .optional()
            .concat(&point)
            .concat(&fractional);

        let magnitudes = string_set(table.magnitudes.iter().map(|m| m.many.as_str()));
        let quantity = VectorFst::concat_all([
            &delete(" "),
            &insert_space(),
            &quoted_field("quantity", &magnitudes),
        ]);
        // "1.5 million", "5 million"
        let with_quantity = unsigned.union(&integer).concat(&quantity);

        let number = optional_negative().concat(&unsigned);
        let body = optional_negative().concat(&unsigned.union(&with_quantity));
        let graph = GraphFst::new(
            engine,
            SemioticClass::Decimal.as_str(),
            GrammarKind::Classify,
            deterministic,
        );
        let fst = graph.add_tokens(&body);
        Self {
            graph: graph.finish(fst),
            number,
        }
    }

    /// Decimal fields without quantity or envelope, for classes that nest a
    /// decimal.
    pub fn number(&self) -> &VectorFst {
        &self.number
    }
}

impl Grammar for DecimalFst {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::engine;
    use crate::data::LocaleData;

    fn decimal() -> DecimalFst {
        let engine = engine().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let data = LocaleData::load("en", Some(dir.path())).unwrap();
        let names = NumberNames::from_table("en", &data.numbers).unwrap();
        let cardinal = CardinalFst::new(&engine, &names, &data.formats, true);
        DecimalFst::new(&engine, &cardinal, &names, &data.numbers, true)
    }

    #[test]
    fn integer_and_fraction() {
        let decimal = decimal();
        assert_eq!(
            decimal.fst().transduce("3.14").as_deref(),
            Some(r#"decimal { integer_part: "three" fractional_part: "one four" }"#)
        );
        assert_eq!(
            decimal.fst().transduce("-0.05").as_deref(),
            Some(r#"decimal { negative: "true" integer_part: "zero" fractional_part: "zero five" }"#)
        );
        assert_eq!(
            decimal.fst().transduce(".5").as_deref(),
            Some(r#"decimal { fractional_part: "five" }"#)
        );
    }

    #[test]
    fn quantity() {
        let decimal = decimal();
        assert_eq!(
            decimal.fst().transduce("1.5 million").as_deref(),
            Some(r#"decimal { integer_part: "one" fractional_part: "five" quantity: "million" }"#)
        );
        assert_eq!(
            decimal.fst().transduce("2 billion").as_deref(),
            Some(r#"decimal { integer_part: "two" quantity: "billion" }"#)
        );
    }

    #[test]
    fn plain_integers_are_not_decimals() {
        let decimal = decimal();
        assert!(!decimal.fst().accepts("5"));
        assert!(!decimal.fst().accepts("5."));
    }
}
