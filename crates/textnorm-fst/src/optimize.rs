// Trimming, epsilon removal, determinization and minimization.
//
// Determinization and minimization work on the encoded automaton: every
// `(ilabel, olabel, weight)` triple is treated as one opaque label, so both
// terminate on any input and never change the weighted relation.

use std::collections::{BTreeMap, VecDeque};

use hashbrown::HashMap;

use crate::fst::{Arc, State, VectorFst};
use crate::weight::Weight;
use crate::{Label, StateId};

/// Encoded arc label used by determinization and minimization.
type ArcKey = (Label, Label, u32);

fn key(arc: &Arc) -> ArcKey {
    (arc.ilabel, arc.olabel, arc.weight.to_bits())
}

impl VectorFst {
    /// Remove states that are not both reachable from the start and able to
    /// reach a final state. Surviving states keep their relative order.
    pub fn connect(&self) -> VectorFst {
        let Some(start) = self.start() else {
            return VectorFst::new();
        };
        let n = self.num_states();

        let mut accessible = vec![false; n];
        let mut stack = vec![start];
        accessible[start as usize] = true;
        while let Some(s) = stack.pop() {
            for arc in self.arcs(s) {
                if !accessible[arc.nextstate as usize] {
                    accessible[arc.nextstate as usize] = true;
                    stack.push(arc.nextstate);
                }
            }
        }

        let mut reverse: Vec<Vec<StateId>> = vec![Vec::new(); n];
        for s in self.state_ids() {
            for arc in self.arcs(s) {
                reverse[arc.nextstate as usize].push(s);
            }
        }
        let mut coaccessible = vec![false; n];
        let mut stack: Vec<StateId> = self.finals().into_iter().map(|(s, _)| s).collect();
        for &s in &stack {
            coaccessible[s as usize] = true;
        }
        while let Some(s) = stack.pop() {
            for &p in &reverse[s as usize] {
                if !coaccessible[p as usize] {
                    coaccessible[p as usize] = true;
                    stack.push(p);
                }
            }
        }

        if !coaccessible[start as usize] {
            return VectorFst::new();
        }

        let mut remap = vec![None; n];
        let mut next: StateId = 0;
        for s in 0..n {
            if accessible[s] && coaccessible[s] {
                remap[s] = Some(next);
                next += 1;
            }
        }

        let states = self
            .states()
            .iter()
            .enumerate()
            .filter(|(s, _)| remap[*s].is_some())
            .map(|(_, state)| State {
                arcs: state
                    .arcs
                    .iter()
                    .filter_map(|a| {
                        remap[a.nextstate as usize].map(|to| Arc {
                            nextstate: to,
                            ..*a
                        })
                    })
                    .collect(),
                final_weight: state.final_weight,
            })
            .collect();
        VectorFst::from_parts(states, remap[start as usize])
    }

    /// Remove arcs labelled epsilon on both sides.
    ///
    /// Each state takes over the labelled arcs and final weights of every
    /// state in its epsilon closure, weighted by the best closure distance.
    pub fn rm_epsilon(&self) -> VectorFst {
        let Some(start) = self.start() else {
            return VectorFst::new();
        };
        let mut states = Vec::with_capacity(self.num_states());
        for s in self.state_ids() {
            let mut state = State::default();
            for (q, d) in self.epsilon_closure(s) {
                state.final_weight = state.final_weight.plus(d.times(self.final_weight(q)));
                for arc in self.arcs(q).iter().filter(|a| !a.is_epsilon()) {
                    state.arcs.push(Arc {
                        weight: d.times(arc.weight),
                        ..*arc
                    });
                }
            }
            states.push(state);
        }
        VectorFst::from_parts(states, Some(start)).connect()
    }

    /// Shortest epsilon distance from `source` to every state reachable over
    /// epsilon arcs, `source` itself included at [`Weight::ONE`].
    ///
    /// A state is queued again only when its distance strictly drops, so
    /// with non-negative weights the search ends on any graph.
    fn epsilon_closure(&self, source: StateId) -> Vec<(StateId, Weight)> {
        let mut dist: BTreeMap<StateId, Weight> = BTreeMap::new();
        dist.insert(source, Weight::ONE);
        let mut queue = VecDeque::from([source]);
        while let Some(s) = queue.pop_front() {
            let ds = dist[&s];
            for arc in self.arcs(s).iter().filter(|a| a.is_epsilon()) {
                let candidate = ds.times(arc.weight);
                let improved = dist
                    .get(&arc.nextstate)
                    .is_none_or(|old| candidate.value() < old.value());
                if improved {
                    dist.insert(arc.nextstate, candidate);
                    queue.push_back(arc.nextstate);
                }
            }
        }
        dist.into_iter().collect()
    }

    /// Subset construction over encoded labels.
    ///
    /// Expects an epsilon-free automaton. The final weight of a subset is the
    /// best final weight among its members.
    pub fn determinize(&self) -> VectorFst {
        let Some(start) = self.start() else {
            return VectorFst::new();
        };
        let mut result = VectorFst::new();
        let mut ids: HashMap<Vec<StateId>, StateId> = HashMap::new();
        let mut queue: VecDeque<(Vec<StateId>, StateId)> = VecDeque::new();

        let first = result.add_state();
        result.set_start(first);
        ids.insert(vec![start], first);
        queue.push_back((vec![start], first));

        while let Some((subset, from)) = queue.pop_front() {
            let mut fw = Weight::ZERO;
            let mut moves: BTreeMap<ArcKey, Vec<StateId>> = BTreeMap::new();
            for &s in &subset {
                fw = fw.plus(self.final_weight(s));
                for arc in self.arcs(s) {
                    moves.entry(key(arc)).or_default().push(arc.nextstate);
                }
            }
            result.set_final(from, fw);

            for ((ilabel, olabel, bits), mut targets) in moves {
                targets.sort_unstable();
                targets.dedup();
                let to = match ids.get(&targets) {
                    Some(&id) => id,
                    None => {
                        let id = result.add_state();
                        ids.insert(targets.clone(), id);
                        queue.push_back((targets, id));
                        id
                    }
                };
                let weight = Weight::new(f32::from_bits(bits));
                result.add_arc(from, Arc::new(ilabel, olabel, weight, to));
            }
        }
        result
    }

    /// Merge equivalent states of a deterministic, trimmed automaton
    /// (Moore partition refinement).
    pub fn minimize(&self) -> VectorFst {
        let Some(start) = self.start() else {
            return VectorFst::new();
        };
        let n = self.num_states();

        let mut class = vec![0u32; n];
        let mut by_final: HashMap<u32, u32> = HashMap::new();
        for s in self.state_ids() {
            let next = by_final.len() as u32;
            class[s as usize] = *by_final
                .entry(self.final_weight(s).to_bits())
                .or_insert(next);
        }
        let mut count = by_final.len();

        loop {
            let mut signatures: HashMap<(u32, Vec<(ArcKey, u32)>), u32> = HashMap::new();
            let mut refined = vec![0u32; n];
            for s in self.state_ids() {
                let mut sig: Vec<(ArcKey, u32)> = self
                    .arcs(s)
                    .iter()
                    .map(|a| (key(a), class[a.nextstate as usize]))
                    .collect();
                sig.sort_unstable();
                let next = signatures.len() as u32;
                refined[s as usize] = *signatures
                    .entry((class[s as usize], sig))
                    .or_insert(next);
            }
            let refined_count = signatures.len();
            class = refined;
            if refined_count == count {
                break;
            }
            count = refined_count;
        }

        let mut states: Vec<Option<State>> = vec![None; count];
        for s in self.state_ids() {
            let c = class[s as usize] as usize;
            if states[c].is_some() {
                continue;
            }
            let mut arcs: Vec<Arc> = self
                .arcs(s)
                .iter()
                .map(|a| Arc {
                    nextstate: class[a.nextstate as usize],
                    ..*a
                })
                .collect();
            arcs.dedup();
            states[c] = Some(State {
                arcs,
                final_weight: self.final_weight(s),
            });
        }
        let states = states.into_iter().map(Option::unwrap_or_default).collect();
        VectorFst::from_parts(states, Some(class[start as usize])).canonicalize()
    }

    /// Renumber states in breadth-first order from the start, following
    /// arcs in encoded-label order.
    fn canonicalize(&self) -> VectorFst {
        let Some(start) = self.start() else {
            return VectorFst::new();
        };
        let mut order: Vec<Option<StateId>> = vec![None; self.num_states()];
        let mut visited: Vec<StateId> = Vec::with_capacity(self.num_states());
        let mut queue = VecDeque::from([start]);
        order[start as usize] = Some(0);
        visited.push(start);
        while let Some(s) = queue.pop_front() {
            let mut arcs = self.arcs(s).to_vec();
            arcs.sort_by_key(|a| (key(a), a.nextstate));
            for arc in arcs {
                if order[arc.nextstate as usize].is_none() {
                    order[arc.nextstate as usize] = Some(visited.len() as StateId);
                    visited.push(arc.nextstate);
                    queue.push_back(arc.nextstate);
                }
            }
        }

        let states = visited
            .iter()
            .map(|&s| State {
                arcs: self
                    .arcs(s)
                    .iter()
                    .filter_map(|a| {
                        order[a.nextstate as usize].map(|to| Arc {
                            nextstate: to,
                            ..*a
                        })
                    })
                    .collect(),
                final_weight: self.final_weight(s),
            })
            .collect();
        let mut result = VectorFst::from_parts(states, Some(0));
        result.arc_sort_input();
        result
    }

    /// Epsilon removal, determinization and minimization.
    ///
    /// The result is input-sorted and optimizing it again returns an
    /// identical automaton. The weighted relation is unchanged.
    pub fn optimize(&self) -> VectorFst {
        if self.is_empty() {
            return VectorFst::new();
        }
        self.rm_epsilon().determinize().connect().minimize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{accep, cross, insert, string_map, string_set};
    use crate::symbols;

    #[test]
    fn connect_drops_dead_states() {
        let mut fst = VectorFst::new();
        let s0 = fst.add_state();
        let s1 = fst.add_state();
        let dead = fst.add_state();
        let unreachable = fst.add_state();
        fst.set_start(s0);
        fst.set_final(s1, Weight::ONE);
        fst.add_arc(s0, Arc::new(1, 1, Weight::ONE, s1));
        fst.add_arc(s0, Arc::new(2, 2, Weight::ONE, dead));
        fst.add_arc(unreachable, Arc::new(3, 3, Weight::ONE, s1));
        let trimmed = fst.connect();
        assert_eq!(trimmed.num_states(), 2);
        assert_eq!(trimmed.num_arcs(), 1);
    }

    #[test]
    fn connect_without_final_is_empty() {
        let mut fst = VectorFst::new();
        let s = fst.add_state();
        fst.set_start(s);
        assert!(fst.connect().is_empty());
    }

    #[test]
    fn rm_epsilon_removes_only_double_epsilons() {
        let fst = insert("x").concat(&accep("a")).star();
        let clean = fst.rm_epsilon();
        for s in clean.state_ids() {
            assert!(clean.arcs(s).iter().all(|a| !a.is_epsilon()));
        }
        assert_eq!(clean.transduce("aa").as_deref(), Some("xaxa"));
    }

    #[test]
    fn rm_epsilon_keeps_weights() {
        let fst = accep("a").add_weight(1.0).union(&accep("b").add_weight(2.0));
        let clean = fst.rm_epsilon();
        let path = clean.apply("b").shortest_path().unwrap();
        assert_eq!(path.weight.value(), 2.0);
    }

    #[test]
    fn rm_epsilon_keeps_wide_closures() {
        // More epsilon-reachable states than any search limit.
        let branches = 100_005;
        let mut fst = VectorFst::new();
        let start = fst.add_state();
        let end = fst.add_state();
        fst.set_start(start);
        fst.set_final(end, Weight::ONE);
        for i in 0..branches {
            let a = fst.add_state();
            let b = fst.add_state();
            fst.add_arc(start, Arc::epsilon(Weight::ONE, a));
            fst.add_arc(a, Arc::epsilon(Weight::ONE, b));
            let label = Label::from(if i + 1 == branches { b'b' } else { b'a' });
            fst.add_arc(b, Arc::new(label, label, Weight::ONE, end));
        }
        assert!(fst.accepts("b"));
        let clean = fst.rm_epsilon();
        assert!(clean.accepts("a"));
        assert!(clean.accepts("b"));
    }

    #[test]
    fn optimize_shrinks_shared_suffixes() {
        let fst = string_set(["cats", "bats", "rats"]);
        let opt = fst.optimize();
        // Start, first letter, "a", "t", "s".
        assert_eq!(opt.num_states(), 5);
        assert!(opt.accepts("bats"));
        assert!(!opt.accepts("bat"));
    }

    #[test]
    fn optimize_is_idempotent() {
        let fst = string_map([("1", "one"), ("2", "two"), ("10", "ten")])
            .concat(&symbols::space().cross_to(" ").concat(&symbols::digit()).star())
            .add_weight(0.5);
        let once = fst.optimize();
        let twice = once.optimize();
        assert_eq!(once, twice);
        assert!(once.is_input_sorted());
    }

    #[test]
    fn optimize_preserves_relation() {
        let fst = cross("1", "one")
            .add_weight(1.0)
            .union(&cross("1", "a").add_weight(0.5))
            .union(&cross("2", "two"));
        let opt = fst.optimize();
        assert_eq!(opt.transduce("1").as_deref(), Some("a"));
        assert_eq!(opt.transduce("2").as_deref(), Some("two"));
        let alternatives = opt.apply("1").n_shortest(5).unwrap();
        assert_eq!(alternatives.len(), 2);
    }

    #[test]
    fn optimize_empty() {
        assert!(VectorFst::new().optimize().is_empty());
    }
}
