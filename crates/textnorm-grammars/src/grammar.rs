// Grammar base: metadata, token envelope, shared whitespace helpers.

use textnorm_core::enums::GrammarKind;
use textnorm_fst::VectorFst;
use textnorm_fst::ops::{delete, insert};
use textnorm_fst::symbols;

use crate::capability::Engine;

/// A compiled grammar.
///
/// Concrete taggers and verbalizers own a [`GraphFst`] and expose it through
/// [`Grammar::graph`]; everything else has a default.
pub trait Grammar {
    fn graph(&self) -> &GraphFst;

    fn fst(&self) -> &VectorFst {
        &self.graph().fst
    }

    fn name(&self) -> &str {
        self.graph().name
    }

    fn kind(&self) -> GrammarKind {
        self.graph().kind
    }

    fn deterministic(&self) -> bool {
        self.graph().deterministic
    }
}

/// Grammar metadata plus the compiled automaton.
///
/// Created empty with [`GraphFst::new`], used to wrap field automata with
/// [`add_tokens`](GraphFst::add_tokens) / [`delete_tokens`](GraphFst::delete_tokens),
/// and sealed with [`finish`](GraphFst::finish).
#[derive(Debug, Clone)]
pub struct GraphFst {
    engine: Engine,
    name: &'static str,
    kind: GrammarKind,
    deterministic: bool,
    fst: VectorFst,
}

impl GraphFst {
    pub fn new(engine: &Engine, name: &'static str, kind: GrammarKind, deterministic: bool) -> Self {
        Self {
            engine: *engine,
            name,
            kind,
            deterministic,
            fst: VectorFst::new(),
        }
    }

    /// Wrap a field automaton as `name { <fields> }`.
    pub fn add_tokens(&self, body: &VectorFst) -> VectorFst {
        add_group(self.name, body)
    }

    /// Strip the `name { ... }` envelope, tolerating any spacing inside it.
    pub fn delete_tokens(&self, body: &VectorFst) -> VectorFst {
        delete_group(self.name, body)
    }

    /// Optimize `fst` once and seal it into the grammar.
    pub fn finish(mut self, fst: VectorFst) -> Self {
        let before = fst.num_states();
        self.fst = self.engine.optimize(&fst);
        log::debug!(
            "{} {} grammar: {} -> {} states, {} arcs",
            self.kind,
            self.name,
            before,
            self.fst.num_states(),
            self.fst.num_arcs()
        );
        self
    }
}

impl Grammar for GraphFst {
    fn graph(&self) -> &GraphFst {
        self
    }
}

/// `body` wrapped as `name { <body> }` on the output side.
pub fn add_group(name: &str, body: &VectorFst) -> VectorFst {
    VectorFst::concat_all([&insert(&format!("{name} {{ ")), body, &insert(" }")])
}

/// Consume `name { <...> }` on the input side, running `body` inside.
pub fn delete_group(name: &str, body: &VectorFst) -> VectorFst {
    VectorFst::concat_all([
        &delete(name),
        &delete_space(),
        &delete("{"),
        &delete_space(),
        body,
        &delete_space(),
        &delete("}"),
    ])
}

/// Emit a single space.
pub fn insert_space() -> VectorFst {
    insert(" ")
}

/// Delete any run of whitespace, including none.
pub fn delete_space() -> VectorFst {
    symbols::space().star().delete_all()
}

/// Collapse a non-empty run of whitespace into one space.
pub fn delete_extra_space() -> VectorFst {
    symbols::space().plus().cross_to(" ")
}

/// Contents of a quoted field value: any run of non-quote characters.
pub fn field_value() -> VectorFst {
    symbols::not_quote().star()
}

/// `body` wrapped as `name: "<body>"` on the output side.
pub fn quoted_field(name: &str, body: &VectorFst) -> VectorFst {
    VectorFst::concat_all([&insert(&format!("{name}: \"")), body, &insert("\"")])
}

/// Consume `name: "<...>"` on the input side, running `body` on the value.
pub fn delete_field(name: &str, body: &VectorFst) -> VectorFst {
    VectorFst::concat_all([
        &delete(&format!("{name}:")),
        &delete_space(),
        &delete("\""),
        body,
        &delete("\""),
    ])
}

/// Every lowercase/capitalised spelling of an ASCII word.
pub fn case_variants(word: &str) -> Vec<String> {
    let mut variants = vec![word.to_string()];
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        let capitalised: String = first.to_uppercase().chain(chars).collect();
        if capitalised != word {
            variants.push(capitalised);
        }
    }
    variants
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::engine;
    use textnorm_fst::ops::accep;

    #[test]
    fn add_tokens_wraps_body() {
        let graph = GraphFst::new(&engine().unwrap(), "cardinal", GrammarKind::Classify, true);
        let fst = graph.add_tokens(&quoted_field("integer", &accep("5")));
        assert_eq!(
            fst.transduce("5").as_deref(),
            Some("cardinal { integer: \"5\" }")
        );
    }

    #[test]
    fn delete_tokens_inverts_envelope() {
        let graph = GraphFst::new(&engine().unwrap(), "cardinal", GrammarKind::Verbalize, true);
        let fst = graph.delete_tokens(&delete_field("integer", &field_value()));
        assert_eq!(
            fst.transduce("cardinal { integer: \"five\" }").as_deref(),
            Some("five")
        );
        assert_eq!(
            fst.transduce("cardinal{integer:\"five\"}").as_deref(),
            Some("five")
        );
        assert!(!fst.accepts("ordinal { integer: \"five\" }"));
    }

    #[test]
    fn finish_optimizes_and_keeps_metadata() {
        let graph = GraphFst::new(&engine().unwrap(), "word", GrammarKind::Classify, false);
        let body = accep("a").union(&accep("a"));
        let graph = graph.finish(body);
        assert_eq!(graph.name(), "word");
        assert_eq!(graph.kind(), GrammarKind::Classify);
        assert!(!graph.deterministic());
        assert_eq!(graph.fst().num_states(), 2);
    }

    #[test]
    fn whitespace_helpers() {
        assert_eq!(delete_extra_space().transduce(" \t ").as_deref(), Some(" "));
        assert!(!delete_extra_space().accepts(""));
        assert_eq!(delete_space().transduce("").as_deref(), Some(""));
        assert_eq!(delete_space().transduce("\u{a0} ").as_deref(), Some(""));
    }

    #[test]
    fn case_variants_capitalise() {
        assert_eq!(case_variants("january"), ["january", "January"]);
        assert_eq!(case_variants("Mr."), ["Mr."]);
    }
}
