// Electronic tagger: e-mail addresses and URLs.
//
//   "abc.def@gmail.com"     -> electronic { username: "abc.def" domain: "gmail.com" }
//   "https://nvidia.com/a"  -> electronic { protocol: "https://" domain: "nvidia.com/a" }
//   "www.nvidia.com"        -> electronic { domain: "www.nvidia.com" }
//
// Bare domains need a known top-level domain so that "e.g" or "3.14" are
// not taken for one.

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::{accep, delete, string_set};
use textnorm_fst::symbols::{self, ascii_class};

use crate::capability::Engine;
use crate::data::ElectronicTable;
use crate::grammar::{Grammar, GraphFst, insert_space, quoted_field};

#[derive(Debug, Clone)]
pub struct ElectronicFst {
    graph: GraphFst,
}

impl ElectronicFst {
    pub fn new(engine: &Engine, table: &ElectronicTable, deterministic: bool) -> Self {
        let alnum = symbols::alnum();
        let username = alnum.concat(&alnum.union(&ascii_class("._-+")).star());
        let label = alnum.concat(&alnum.union(&accep("-")).star());
        let dotted = accep(".").concat(&label);
        let domain = label.concat(&dotted.plus());
        let path = accep("/")
            .concat(&alnum.union(&ascii_class("/._-?=&%~#")).star())
            .optional();

        let email = VectorFst::concat_all([
            &quoted_field("username", &username),
            &delete("@"),
            &insert_space(),
            &quoted_field("domain", &domain),
        ]);
        let url = VectorFst::concat_all([
            &quoted_field("protocol", &string_set(&table.protocols)),
            &insert_space(),
            &quoted_field("domain", &domain.concat(&path)),
        ]);
        let known_tld = VectorFst::concat_all([
            &label,
            &dotted.star(),
            &accep("."),
            &string_set(&table.domains),
        ]);
        let bare = quoted_field("domain", &known_tld.concat(&path));

        let graph = GraphFst::new(
            engine,
            SemioticClass::Electronic.as_str(),
            GrammarKind::Classify,
            deterministic,
        );
        let fst = graph.add_tokens(&email.union(&url).union(&bare));
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for ElectronicFst {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}
