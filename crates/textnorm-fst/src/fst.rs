// Mutable vector representation of a weighted transducer.

use crate::weight::Weight;
use crate::{EPSILON, Label, StateId};

/// A single transition.
///
/// `ilabel`/`olabel` are bytes or [`EPSILON`]; `nextstate` indexes into the
/// owning [`VectorFst`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub ilabel: Label,
    pub olabel: Label,
    pub weight: Weight,
    pub nextstate: StateId,
}

impl Arc {
    pub fn new(ilabel: Label, olabel: Label, weight: Weight, nextstate: StateId) -> Self {
        Self {
            ilabel,
            olabel,
            weight,
            nextstate,
        }
    }

    /// An arc that neither consumes nor emits anything.
    pub fn epsilon(weight: Weight, nextstate: StateId) -> Self {
        Self::new(EPSILON, EPSILON, weight, nextstate)
    }

    #[inline]
    pub fn is_epsilon(&self) -> bool {
        self.ilabel == EPSILON && self.olabel == EPSILON
    }
}

/// A state: outgoing arcs plus a final weight ([`Weight::ZERO`] if non-final).
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub arcs: Vec<Arc>,
    pub final_weight: Weight,
}

impl Default for State {
    fn default() -> Self {
        Self {
            arcs: Vec::new(),
            final_weight: Weight::ZERO,
        }
    }
}

/// Weighted finite-state transducer stored as a vector of states.
///
/// An automaton without a start state is the empty automaton: it accepts
/// nothing. Composition of incompatible automata legitimately produces one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorFst {
    states: Vec<State>,
    start: Option<StateId>,
}

impl VectorFst {
    /// Create an empty automaton (no states, no start).
    pub fn new() -> Self {
        Self::default()
    }

    /// Automaton accepting exactly the empty string.
    pub fn epsilon_machine() -> Self {
        let mut fst = Self::new();
        let s = fst.add_state();
        fst.set_start(s);
        fst.set_final(s, Weight::ONE);
        fst
    }

    pub fn add_state(&mut self) -> StateId {
        self.states.push(State::default());
        (self.states.len() - 1) as StateId
    }

    pub fn set_start(&mut self, state: StateId) {
        self.start = Some(state);
    }

    pub fn start(&self) -> Option<StateId> {
        self.start
    }

    pub fn set_final(&mut self, state: StateId, weight: Weight) {
        self.states[state as usize].final_weight = weight;
    }

    #[inline]
    pub fn final_weight(&self, state: StateId) -> Weight {
        self.states[state as usize].final_weight
    }

    #[inline]
    pub fn is_final(&self, state: StateId) -> bool {
        !self.final_weight(state).is_zero()
    }

    pub fn add_arc(&mut self, state: StateId, arc: Arc) {
        self.states[state as usize].arcs.push(arc);
    }

    #[inline]
    pub fn arcs(&self, state: StateId) -> &[Arc] {
        &self.states[state as usize].arcs
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn num_arcs(&self) -> usize {
        self.states.iter().map(|s| s.arcs.len()).sum()
    }

    /// Iterate over all state ids.
    pub fn state_ids(&self) -> impl Iterator<Item = StateId> + use<> {
        0..self.states.len() as StateId
    }

    /// `true` when the automaton has no start state, i.e. accepts nothing.
    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }

    /// `true` when every arc has identical input and output labels.
    pub fn is_acceptor(&self) -> bool {
        self.states
            .iter()
            .all(|s| s.arcs.iter().all(|a| a.ilabel == a.olabel))
    }

    /// `true` when every state's arcs are sorted by input label.
    pub fn is_input_sorted(&self) -> bool {
        self.states
            .iter()
            .all(|s| s.arcs.windows(2).all(|w| w[0].ilabel <= w[1].ilabel))
    }

    /// Sort each state's arcs by `(ilabel, olabel)`.
    pub fn arc_sort_input(&mut self) {
        for state in &mut self.states {
            state.arcs.sort_by(|a, b| {
                (a.ilabel, a.olabel, a.nextstate).cmp(&(b.ilabel, b.olabel, b.nextstate))
            });
        }
    }

    /// Copy all states of `other` into `self`, renumbered.
    ///
    /// Returns the offset added to `other`'s state ids. The start state of
    /// `self` is left unchanged; callers wire the copy in with arcs.
    pub fn append(&mut self, other: &VectorFst) -> StateId {
        let offset = self.states.len() as StateId;
        self.states.extend(other.states.iter().map(|s| State {
            arcs: s
                .arcs
                .iter()
                .map(|a| Arc {
                    nextstate: a.nextstate + offset,
                    ..*a
                })
                .collect(),
            final_weight: s.final_weight,
        }));
        offset
    }

    /// Final states with their weights.
    pub fn finals(&self) -> Vec<(StateId, Weight)> {
        self.state_ids()
            .filter_map(|s| {
                let w = self.final_weight(s);
                (!w.is_zero()).then_some((s, w))
            })
            .collect()
    }

    pub(crate) fn from_parts(states: Vec<State>, start: Option<StateId>) -> Self {
        Self { states, start }
    }

    pub(crate) fn states(&self) -> &[State] {
        &self.states
    }

    pub(crate) fn states_mut(&mut self) -> &mut [State] {
        &mut self.states
    }
}
