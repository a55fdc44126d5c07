// Constructors and rational operations.
//
// Every operation takes its operands by reference and returns a new
// automaton; operands are never mutated.

use crate::fst::{Arc, VectorFst};
use crate::symbols;
use crate::weight::Weight;
use crate::{EPSILON, Label};

/// Linear transducer rewriting `input` into `output`.
///
/// Bytes are paired position by position; the shorter side is padded with
/// epsilon. `cross("", "")` accepts only the empty string.
pub fn cross(input: &str, output: &str) -> VectorFst {
    let ib = input.as_bytes();
    let ob = output.as_bytes();
    let len = ib.len().max(ob.len());

    let mut fst = VectorFst::new();
    let mut state = fst.add_state();
    fst.set_start(state);
    for i in 0..len {
        let il = ib.get(i).map_or(EPSILON, |&b| b as Label);
        let ol = ob.get(i).map_or(EPSILON, |&b| b as Label);
        let next = fst.add_state();
        fst.add_arc(state, Arc::new(il, ol, Weight::ONE, next));
        state = next;
    }
    fst.set_final(state, Weight::ONE);
    fst
}

/// Acceptor for exactly the string `s`.
pub fn accep(s: &str) -> VectorFst {
    cross(s, s)
}

/// Emit `s` without consuming input.
pub fn insert(s: &str) -> VectorFst {
    cross("", s)
}

/// Consume `s` without emitting output.
pub fn delete(s: &str) -> VectorFst {
    cross(s, "")
}

/// Union of string rewrites, e.g. a number-name table.
pub fn string_map<I, O>(pairs: impl IntoIterator<Item = (I, O)>) -> VectorFst
where
    I: AsRef<str>,
    O: AsRef<str>,
{
    let rules: Vec<VectorFst> = pairs
        .into_iter()
        .map(|(i, o)| cross(i.as_ref(), o.as_ref()))
        .collect();
    union_all(&rules)
}

/// Union of string acceptors.
pub fn string_set<S: AsRef<str>>(strings: impl IntoIterator<Item = S>) -> VectorFst {
    let rules: Vec<VectorFst> = strings.into_iter().map(|s| accep(s.as_ref())).collect();
    union_all(&rules)
}

/// Union of any number of automata behind a fresh start state.
pub fn union_all<'a>(fsts: impl IntoIterator<Item = &'a VectorFst>) -> VectorFst {
    let mut result = VectorFst::new();
    let start = result.add_state();
    result.set_start(start);
    let mut any = false;
    for fst in fsts {
        let Some(s) = fst.start() else { continue };
        let offset = result.append(fst);
        result.add_arc(start, Arc::epsilon(Weight::ONE, s + offset));
        any = true;
    }
    if any { result } else { VectorFst::new() }
}

impl VectorFst {
    /// Language union: accepts what either operand accepts.
    pub fn union(&self, other: &VectorFst) -> VectorFst {
        union_all([self, other])
    }

    /// Concatenation: a path of `self` followed by a path of `other`.
    pub fn concat(&self, other: &VectorFst) -> VectorFst {
        let (Some(_), Some(other_start)) = (self.start(), other.start()) else {
            return VectorFst::new();
        };
        let mut result = self.clone();
        let finals = result.finals();
        let offset = result.append(other);
        for (state, weight) in finals {
            result.add_arc(state, Arc::epsilon(weight, other_start + offset));
            result.set_final(state, Weight::ZERO);
        }
        result
    }

    /// Concatenate a sequence of automata.
    pub fn concat_all<'a>(parts: impl IntoIterator<Item = &'a VectorFst>) -> VectorFst {
        parts
            .into_iter()
            .fold(VectorFst::epsilon_machine(), |acc, part| acc.concat(part))
    }

    /// Kleene star.
    pub fn star(&self) -> VectorFst {
        let Some(old_start) = self.start() else {
            return VectorFst::epsilon_machine();
        };
        let mut result = VectorFst::new();
        let start = result.add_state();
        result.set_start(start);
        result.set_final(start, Weight::ONE);
        let offset = result.append(self);
        result.add_arc(start, Arc::epsilon(Weight::ONE, old_start + offset));
        for (state, weight) in self.finals() {
            result.add_arc(state + offset, Arc::epsilon(weight, start));
            result.set_final(state + offset, Weight::ZERO);
        }
        result
    }

    /// One or more repetitions.
    pub fn plus(&self) -> VectorFst {
        self.concat(&self.star())
    }

    /// Zero or one occurrence.
    pub fn optional(&self) -> VectorFst {
        self.union(&VectorFst::epsilon_machine())
    }

    /// Repetition bounded by `[lower, upper]`; `None` means unbounded.
    ///
    /// Optional repetitions are nested (`a(a(a)?)?`) so every count has a
    /// single path.
    pub fn closure(&self, lower: usize, upper: Option<usize>) -> VectorFst {
        let mut result = VectorFst::epsilon_machine();
        for _ in 0..lower {
            result = result.concat(self);
        }
        match upper {
            None => result.concat(&self.star()),
            Some(upper) => {
                let mut tail = VectorFst::epsilon_machine();
                for _ in lower..upper {
                    tail = self.concat(&tail).optional();
                }
                result.concat(&tail)
            }
        }
    }

    /// Multiply every final weight by `weight`, adding it to every path.
    pub fn add_weight(&self, weight: f32) -> VectorFst {
        let w = Weight::new(weight);
        let mut result = self.clone();
        for state in result.states_mut() {
            if !state.final_weight.is_zero() {
                state.final_weight = state.final_weight.times(w);
            }
        }
        result
    }

    /// Swap input and output labels.
    pub fn invert(&self) -> VectorFst {
        self.map_arcs(|a| Arc {
            ilabel: a.olabel,
            olabel: a.ilabel,
            ..a
        })
    }

    /// Acceptor of the input side.
    pub fn project_input(&self) -> VectorFst {
        self.map_arcs(|a| Arc {
            olabel: a.ilabel,
            ..a
        })
    }

    /// Acceptor of the output side.
    pub fn project_output(&self) -> VectorFst {
        self.map_arcs(|a| Arc {
            ilabel: a.olabel,
            ..a
        })
    }

    /// Consume the input side, emit nothing.
    pub fn delete_all(&self) -> VectorFst {
        self.map_arcs(|a| Arc {
            olabel: EPSILON,
            ..a
        })
    }

    /// Emit the output side, consume nothing.
    pub fn insert_all(&self) -> VectorFst {
        self.map_arcs(|a| Arc {
            ilabel: EPSILON,
            ..a
        })
    }

    /// Rewrite every path of `self` to `output` (`cross(fst, string)`).
    pub fn cross_to(&self, output: &str) -> VectorFst {
        self.delete_all().concat(&insert(output))
    }

    /// Drop all weights (arcs and finals become [`Weight::ONE`]).
    pub fn unweighted(&self) -> VectorFst {
        let mut result = self.map_arcs(|a| Arc {
            weight: Weight::ONE,
            ..a
        });
        for state in result.states_mut() {
            if !state.final_weight.is_zero() {
                state.final_weight = Weight::ONE;
            }
        }
        result
    }

    /// Paths of `self` whose output is not accepted by `other`.
    ///
    /// `other` is read as an unweighted acceptor. For an acceptor `self`
    /// this is plain language difference.
    pub fn difference(&self, other: &VectorFst) -> VectorFst {
        self.compose(&complement(other))
    }

    fn map_arcs(&self, f: impl Fn(Arc) -> Arc) -> VectorFst {
        let mut result = self.clone();
        for state in result.states_mut() {
            for arc in &mut state.arcs {
                *arc = f(*arc);
            }
        }
        result
    }
}

/// Complete deterministic acceptor for every byte string `fst` rejects.
fn complement(fst: &VectorFst) -> VectorFst {
    let dfa = fst.project_input().unweighted().rm_epsilon().determinize();
    let mut result = VectorFst::new();
    let sink = if let Some(start) = dfa.start() {
        let offset = result.append(&dfa);
        result.set_start(start + offset);
        result.add_state()
    } else {
        let s = result.add_state();
        result.set_start(s);
        s
    };

    for state in result.state_ids() {
        let mut present = [false; 256];
        for arc in result.arcs(state) {
            present[arc.ilabel as usize] = true;
        }
        let missing: Vec<Label> = symbols::alphabet()
            .filter(|&l| !present[l as usize])
            .collect();
        for label in missing {
            result.add_arc(state, Arc::new(label, label, Weight::ONE, sink));
        }
        let weight = if result.is_final(state) {
            Weight::ZERO
        } else {
            Weight::ONE
        };
        result.set_final(state, weight);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn out(fst: &VectorFst, input: &str) -> Option<String> {
        fst.transduce(input)
    }

    #[test]
    fn cross_pads_shorter_side() {
        let fst = cross("1", "one");
        assert_eq!(fst.num_states(), 4);
        assert_eq!(out(&fst, "1").as_deref(), Some("one"));
        assert_eq!(out(&fst, "2"), None);
    }

    #[test]
    fn empty_cross_accepts_empty_string() {
        let fst = cross("", "");
        assert_eq!(out(&fst, "").as_deref(), Some(""));
    }

    #[test]
    fn union_accepts_both() {
        let fst = cross("a", "x").union(&cross("b", "y"));
        assert_eq!(out(&fst, "a").as_deref(), Some("x"));
        assert_eq!(out(&fst, "b").as_deref(), Some("y"));
    }

    #[test]
    fn union_with_empty_operand() {
        let fst = accep("a").union(&VectorFst::new());
        assert_eq!(out(&fst, "a").as_deref(), Some("a"));
        assert!(union_all(std::iter::empty()).is_empty());
    }

    #[test]
    fn concat_chains_paths() {
        let fst = cross("a", "x").concat(&cross("b", "y"));
        assert_eq!(out(&fst, "ab").as_deref(), Some("xy"));
        assert_eq!(out(&fst, "a"), None);
    }

    #[test]
    fn concat_with_empty_is_empty() {
        assert!(accep("a").concat(&VectorFst::new()).is_empty());
    }

    #[test]
    fn closure_bounds() {
        let fst = accep("a").closure(1, Some(2));
        assert_eq!(out(&fst, ""), None);
        assert!(out(&fst, "a").is_some());
        assert!(out(&fst, "aa").is_some());
        assert_eq!(out(&fst, "aaa"), None);
    }

    #[test]
    fn unbounded_closure_strips_leading_zeros() {
        let fst = cross("0", "").closure(0, None).concat(&accep("7"));
        assert_eq!(out(&fst, "0007").as_deref(), Some("7"));
        assert_eq!(out(&fst, "7").as_deref(), Some("7"));
    }

    #[test]
    fn optional_accepts_empty() {
        let fst = insert("x").optional();
        let outputs: Vec<String> = fst
            .apply("")
            .n_shortest(5)
            .unwrap()
            .into_iter()
            .map(|p| p.output)
            .collect();
        assert!(outputs.contains(&String::new()));
        assert!(outputs.contains(&"x".to_string()));
    }

    #[test]
    fn add_weight_prefers_lighter_branch() {
        let fst = cross("a", "heavy")
            .add_weight(2.0)
            .union(&cross("a", "light").add_weight(1.0));
        assert_eq!(out(&fst, "a").as_deref(), Some("light"));
    }

    #[test]
    fn invert_swaps_sides() {
        let fst = cross("1", "one").invert();
        assert_eq!(out(&fst, "one").as_deref(), Some("1"));
    }

    #[test]
    fn difference_removes_strings() {
        let words = string_set(["one", "two", "three"]);
        let fst = words.difference(&accep("two"));
        assert!(fst.accepts("one"));
        assert!(!fst.accepts("two"));
        assert!(fst.accepts("three"));
    }

    #[test]
    fn difference_of_closure() {
        let digits = symbols::digit().plus();
        let not_one = digits.difference(&accep("1"));
        assert!(not_one.accepts("11"));
        assert!(not_one.accepts("2"));
        assert!(!not_one.accepts("1"));
    }

    #[test]
    fn cross_to_rewrites_language() {
        let fst = symbols::digit().plus().cross_to("N");
        assert_eq!(out(&fst, "123").as_deref(), Some("N"));
    }
}
