// Bare-name verbalizer: name: "doctor" -> "doctor"
//
// Serves whitelist, word and punctuation tokens.

use textnorm_core::enums::{GrammarKind, SemioticClass};

use crate::capability::Engine;
use crate::grammar::{Grammar, GraphFst, delete_field, field_value};

#[derive(Debug, Clone)]
pub struct WordVerbalizer {
    graph: GraphFst,
}

impl WordVerbalizer {
    pub fn new(engine: &Engine, deterministic: bool) -> Self {
        let graph = GraphFst::new(
            engine,
            SemioticClass::Word.as_str(),
            GrammarKind::Verbalize,
            deterministic,
        );
        let fst = delete_field("name", &field_value());
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for WordVerbalizer {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::engine;

    #[test]
    fn passes_value_through() {
        let word = WordVerbalizer::new(&engine().unwrap(), true);
        assert_eq!(word.fst().transduce(r#"name: "Привет""#).as_deref(), Some("Привет"));
        assert_eq!(word.fst().transduce(r#"name:".""#).as_deref(), Some("."));
        assert!(!word.fst().accepts(r#"cardinal { integer: "one" }"#));
    }
}
