// Cardinal verbalizer: cardinal { negative: "true" integer: "five" } -> "minus five"

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::{delete, insert};

use crate::capability::Engine;
use crate::data::NumberNameTable;
use crate::grammar::{Grammar, GraphFst, delete_field, delete_space, field_value};

#[derive(Debug, Clone)]
pub struct CardinalVerbalizer {
    graph: GraphFst,
    body: VectorFst,
}

impl CardinalVerbalizer {
    pub fn new(engine: &Engine, table: &NumberNameTable, deterministic: bool) -> Self {
        let body = optional_minus(&table.minus).concat(&delete_field("integer", &field_value()));
        let graph = GraphFst::new(
            engine,
            SemioticClass::Cardinal.as_str(),
            GrammarKind::Verbalize,
            deterministic,
        );
        let fst = graph.delete_tokens(&body);
        Self {
            graph: graph.finish(fst),
            body,
        }
    }

    /// Fields without the envelope, for verbalizers of nesting classes.
    pub fn body(&self) -> &VectorFst {
        &self.body
    }
}

impl Grammar for CardinalVerbalizer {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}

/// `negative: "true"` to `"<minus> "`, or nothing.
pub fn optional_minus(minus: &str) -> VectorFst {
    VectorFst::concat_all([
        &delete_field("negative", &delete("true")),
        &delete_space(),
        &insert(&format!("{minus} ")),
    ])
    .optional()
}
