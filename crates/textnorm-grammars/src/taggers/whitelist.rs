// Whitelist tagger: fixed rewrites of abbreviations, "Dr." -> name: "doctor"

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::ops::string_map;

use crate::capability::Engine;
use crate::data::WhitelistTable;
use crate::grammar::{Grammar, GraphFst, quoted_field};

#[derive(Debug, Clone)]
pub struct WhitelistFst {
    graph: GraphFst,
}

impl WhitelistFst {
    pub fn new(engine: &Engine, table: &WhitelistTable, deterministic: bool) -> Self {
        let graph = GraphFst::new(
            engine,
            SemioticClass::Whitelist.as_str(),
            GrammarKind::Classify,
            deterministic,
        );
        let fst = quoted_field("name", &string_map(&table.entries));
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for WhitelistFst {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}
