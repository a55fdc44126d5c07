// Composition with an epsilon filter.

use std::borrow::Cow;
use std::collections::VecDeque;

use hashbrown::HashMap;

use crate::fst::{Arc, VectorFst};
use crate::weight::Weight;
use crate::{EPSILON, Label, StateId};

/// Filter state of the composition.
///
/// Without it, a pair of epsilon moves could be taken in either order and
/// every such pair would yield a duplicate path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Filter {
    /// Both sides are free to move.
    Any,
    /// The left side moved alone on an output epsilon.
    Left,
    /// The right side moved alone on an input epsilon.
    Right,
}

type Triple = (StateId, StateId, Filter);

/// Result automaton under construction plus the triple -> state map.
struct Builder {
    fst: VectorFst,
    ids: HashMap<Triple, StateId>,
    queue: VecDeque<(Triple, StateId)>,
}

impl Builder {
    fn state(&mut self, triple: Triple) -> StateId {
        if let Some(&id) = self.ids.get(&triple) {
            return id;
        }
        let id = self.fst.add_state();
        self.ids.insert(triple, id);
        self.queue.push_back((triple, id));
        id
    }

    fn arc(&mut self, from: StateId, ilabel: Label, olabel: Label, weight: Weight, to: Triple) {
        let to = self.state(to);
        self.fst.add_arc(from, Arc::new(ilabel, olabel, weight, to));
    }
}

impl VectorFst {
    /// Compose `self` with `other`: the output of `self` feeds the input of
    /// `other`.
    ///
    /// The result maps `x` to `z` with weight `w1 * w2` whenever `self` maps
    /// `x` to `y` with `w1` and `other` maps `y` to `z` with `w2`. It is
    /// trimmed; incompatible operands produce the empty automaton.
    pub fn compose(&self, other: &VectorFst) -> VectorFst {
        let (Some(a_start), Some(b_start)) = (self.start(), other.start()) else {
            return VectorFst::new();
        };

        let b: Cow<'_, VectorFst> = if other.is_input_sorted() {
            Cow::Borrowed(other)
        } else {
            let mut sorted = other.clone();
            sorted.arc_sort_input();
            Cow::Owned(sorted)
        };

        let mut builder = Builder {
            fst: VectorFst::new(),
            ids: HashMap::new(),
            queue: VecDeque::new(),
        };
        let start = builder.state((a_start, b_start, Filter::Any));
        builder.fst.set_start(start);

        while let Some(((sa, sb, filter), from)) = builder.queue.pop_front() {
            let fw = self.final_weight(sa).times(b.final_weight(sb));
            if !fw.is_zero() {
                builder.fst.set_final(from, fw);
            }

            for arc_a in self.arcs(sa) {
                if arc_a.olabel == EPSILON {
                    if filter != Filter::Right {
                        builder.arc(
                            from,
                            arc_a.ilabel,
                            EPSILON,
                            arc_a.weight,
                            (arc_a.nextstate, sb, Filter::Left),
                        );
                    }
                    if filter == Filter::Any {
                        for arc_b in matching(b.arcs(sb), EPSILON) {
                            builder.arc(
                                from,
                                arc_a.ilabel,
                                arc_b.olabel,
                                arc_a.weight.times(arc_b.weight),
                                (arc_a.nextstate, arc_b.nextstate, Filter::Any),
                            );
                        }
                    }
                    continue;
                }
                for arc_b in matching(b.arcs(sb), arc_a.olabel) {
                    builder.arc(
                        from,
                        arc_a.ilabel,
                        arc_b.olabel,
                        arc_a.weight.times(arc_b.weight),
                        (arc_a.nextstate, arc_b.nextstate, Filter::Any),
                    );
                }
            }

            if filter != Filter::Left {
                for arc_b in matching(b.arcs(sb), EPSILON) {
                    builder.arc(
                        from,
                        EPSILON,
                        arc_b.olabel,
                        arc_b.weight,
                        (sa, arc_b.nextstate, Filter::Right),
                    );
                }
            }
        }

        builder.fst.connect()
    }
}

/// Arcs of an input-sorted state whose input label is `label`.
fn matching(arcs: &[Arc], label: Label) -> &[Arc] {
    let lo = arcs.partition_point(|a| a.ilabel < label);
    let hi = arcs.partition_point(|a| a.ilabel <= label);
    &arcs[lo..hi]
}
