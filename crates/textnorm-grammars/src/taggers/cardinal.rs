// Cardinal tagger: "-1 001" -> cardinal { negative: "true" integer: "..." }

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::{cross, insert};

use crate::capability::Engine;
use crate::data::AlternativeFormats;
use crate::grammar::{Grammar, GraphFst, insert_space, quoted_field};
use crate::numbers::{NumberNames, rewrite_alternatives, separators};

/// Penalty on alternative spellings, so the default one stays cheapest.
const ALTERNATIVE_WEIGHT: f32 = 0.1;

/// Cardinal numbers with optional sign, group separators and leading zeros.
#[derive(Debug, Clone)]
pub struct CardinalFst {
    graph: GraphFst,
    numbers: VectorFst,
    with_leading_zeros: VectorFst,
    body: VectorFst,
}

impl CardinalFst {
    pub fn new(
        engine: &Engine,
        names: &NumberNames,
        formats: &AlternativeFormats,
        deterministic: bool,
    ) -> Self {
        let mut cardinal_names = names.cardinal().clone();
        if !deterministic {
            if let Some(alt) = rewrite_alternatives(names.cardinal(), &formats.rewrites) {
                cardinal_names = cardinal_names.union(&alt.add_weight(ALTERNATIVE_WEIGHT));
            }
        }

        let numbers = separators(&formats.separator_chars()).compose(&cardinal_names);
        let with_leading_zeros = cross("0", "").closure(0, None).concat(&numbers);
        let body = optional_negative().concat(&quoted_field("integer", &with_leading_zeros));

        let graph = GraphFst::new(
            engine,
            SemioticClass::Cardinal.as_str(),
            GrammarKind::Classify,
            deterministic,
        );
        let fst = graph.add_tokens(&body);
        Self {
            graph: graph.finish(fst),
            numbers,
            with_leading_zeros,
            body,
        }
    }

    /// Separator-validated numerals to names, no leading zeros accepted.
    pub fn numbers(&self) -> &VectorFst {
        &self.numbers
    }

    /// [`numbers`](Self::numbers) with any leading zeros stripped first.
    pub fn with_leading_zeros(&self) -> &VectorFst {
        &self.with_leading_zeros
    }

    /// Token fields without the `cardinal { }` envelope, for classes that
    /// nest a cardinal.
    pub fn body(&self) -> &VectorFst {
        &self.body
    }
}

impl Grammar for CardinalFst {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}

/// `negative: "true" ` for a leading `-`, nothing otherwise.
pub fn optional_negative() -> VectorFst {
    VectorFst::concat_all([
        &insert("negative: "),
        &cross("-", "\"true\""),
        &insert_space(),
    ])
    .closure(0, Some(1))
}
