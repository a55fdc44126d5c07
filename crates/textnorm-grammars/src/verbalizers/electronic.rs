// Electronic verbalizer.
//
//   electronic { username: "ab1" domain: "gmail.com" } -> "a b one at gmail dot com"
//
// Usernames and protocols are spelled character by character. Domains keep
// their alphanumeric segments and read the symbols between them.

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::{cross, insert, string_map, union_all};
use textnorm_fst::symbols;

use crate::capability::Engine;
use crate::data::{ElectronicTable, NumberNameTable};
use crate::grammar::{Grammar, GraphFst, delete_field, delete_space};
use crate::verbalizers::field_gap;

/// Penalty on reading "0" as the letter "o".
const LETTER_O_WEIGHT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct ElectronicVerbalizer {
    graph: GraphFst,
}

impl ElectronicVerbalizer {
    pub fn new(
        engine: &Engine,
        table: &ElectronicTable,
        numbers: &NumberNameTable,
        deterministic: bool,
    ) -> Self {
        let mut digits = cross("0", &numbers.zero);
        for (i, word) in numbers.units.iter().enumerate() {
            digits = digits.union(&cross(&(i + 1).to_string(), word));
        }
        if !deterministic {
            digits = digits.union(&cross("0", "o").add_weight(LETTER_O_WEIGHT));
        }

        let symbol_words = string_map(&table.symbols);
        let character = union_all([&symbols::alpha(), &digits, &symbol_words]);
        let spelled = character.concat(&insert(" ").concat(&character).star());

        let segment = symbols::alnum().plus();
        let separators = string_map(
            table
                .symbols
                .iter()
                .map(|(symbol, word)| (symbol.as_str(), format!(" {word}"))),
        )
        .plus();
        let domain = VectorFst::concat_all([
            &segment,
            &separators.concat(&insert(" ")).concat(&segment).star(),
            &separators.optional(),
        ]);

        let at = table.symbols.get("@").map_or("at", String::as_str);
        let email = VectorFst::concat_all([
            &delete_field("username", &spelled),
            &delete_space(),
            &insert(&format!(" {at} ")),
            &delete_field("domain", &domain),
        ]);
        let url = delete_field("protocol", &spelled)
            .concat(&field_gap())
            .optional()
            .concat(&delete_field("domain", &domain));

        let graph = GraphFst::new(
            engine,
            SemioticClass::Electronic.as_str(),
            GrammarKind::Verbalize,
            deterministic,
        );
        let fst = graph.delete_tokens(&email.union(&url));
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for ElectronicVerbalizer {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::engine;
    use crate::data::LocaleData;

    fn verbalizer(deterministic: bool) -> ElectronicVerbalizer {
        let dir = tempfile::tempdir().unwrap();
        let data = LocaleData::load("en", Some(dir.path())).unwrap();
        ElectronicVerbalizer::new(
            &engine().unwrap(),
            data.electronic.as_ref().unwrap(),
            &data.numbers,
            deterministic,
        )
    }

    #[test]
    fn email_and_url() {
        let electronic = verbalizer(true);
        assert_eq!(
            electronic
                .fst()
                .transduce(r#"electronic { username: "ab.1" domain: "gmail.com" }"#)
                .as_deref(),
            Some("a b dot one at gmail dot com")
        );
        assert_eq!(
            electronic
                .fst()
                .transduce(r#"electronic { protocol: "http://" domain: "www.nvidia.com/a" }"#)
                .as_deref(),
            Some("h t t p colon slash slash www dot nvidia dot com slash a")
        );
    }

    #[test]
    fn zero_as_letter_only_in_alternatives() {
        let token = r#"electronic { username: "a0" domain: "x.io" }"#;
        assert_eq!(verbalizer(true).fst().outputs(token, 3).unwrap().len(), 1);
        let outputs: Vec<String> = verbalizer(false)
            .fst()
            .outputs(token, 3)
            .unwrap()
            .into_iter()
            .map(|p| p.output)
            .collect();
        assert_eq!(outputs, ["a zero at x dot io", "a o at x dot io"]);
    }
}
