// Roman numeral tagger: "XIV" -> roman { integer: "fourteen" }
//
// Numerals I..MMMM. A lone "I" is left to the word tagger.

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::{accep, cross, insert, string_map};
use textnorm_fst::symbols::ascii_class;

use crate::capability::Engine;
use crate::grammar::{Grammar, GraphFst, quoted_field};
use crate::numbers::NumberNames;

#[derive(Debug, Clone)]
pub struct RomanFst {
    graph: GraphFst,
}

impl RomanFst {
    pub fn new(engine: &Engine, names: &NumberNames, deterministic: bool) -> Self {
        let thousands = string_map([("M", "1"), ("MM", "2"), ("MMM", "3"), ("MMMM", "4")]);
        let digits = VectorFst::concat_all([
            &thousands.union(&insert("0")),
            &place("C", "D", "M"),
            &place("X", "L", "C"),
            &place("I", "V", "X"),
        ]);
        let value = cross("0", "").star().concat(names.cardinal());
        let numerals = ascii_class("IVXLCDM").plus().difference(&accep("I"));
        let roman = numerals.compose(&digits.compose(&value));

        let graph = GraphFst::new(
            engine,
            SemioticClass::Roman.as_str(),
            GrammarKind::Classify,
            deterministic,
        );
        let fst = graph.add_tokens(&quoted_field("integer", &roman));
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for RomanFst {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}

/// One decimal place written with `one`, `five` and `ten`, to its digit.
/// An empty place reads as `0`.
fn place(one: &str, five: &str, ten: &str) -> VectorFst {
    let patterns = [
        one.to_string(),
        one.repeat(2),
        one.repeat(3),
        format!("{one}{five}"),
        five.to_string(),
        format!("{five}{one}"),
        format!("{five}{}", one.repeat(2)),
        format!("{five}{}", one.repeat(3)),
        format!("{one}{ten}"),
    ];
    let rules = patterns
        .iter()
        .enumerate()
        .map(|(i, pattern)| (pattern.as_str(), (i + 1).to_string()));
    string_map(rules).union(&insert("0"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::engine;
    use crate::data::LocaleData;

    fn roman() -> RomanFst {
        let engine = engine().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let data = LocaleData::load("en", Some(dir.path())).unwrap();
        let names = NumberNames::from_table("en", &data.numbers).unwrap();
        RomanFst::new(&engine, &names, false)
    }

    #[test]
    fn numerals() {
        let roman = roman();
        for (input, integer) in [("IV", "four"), ("XIV", "fourteen"), ("MCMXCIX", "one thousand nine hundred ninety nine"), ("II", "two")] {
            assert_eq!(
                roman.fst().transduce(input),
                Some(format!(r#"roman {{ integer: "{integer}" }}"#)),
                "{input}"
            );
        }
    }

    #[test]
    fn malformed_numerals() {
        let roman = roman();
        for bad in ["IIII", "VV", "IC", "I", ""] {
            assert!(!roman.fst().accepts(bad), "{bad}");
        }
    }
}
