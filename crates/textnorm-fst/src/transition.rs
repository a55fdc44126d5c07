// Fixed-size state and arc records of the binary automaton format.

use bytemuck::{Pod, Zeroable};

use crate::fst::Arc;
use crate::weight::Weight;

/// Start-state value of an automaton without a start state.
pub const NO_STATE: u32 = u32::MAX;

/// On-disk state record (16 bytes).
///
/// - `final_weight` (f32): `+inf` for non-final states
/// - `first_arc` (u32): index of the state's first record in the arc table
/// - `num_arcs` (u32): number of consecutive arc records
/// - `_reserved` (u32): zero
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct StateRecord {
    pub final_weight: f32,
    pub first_arc: u32,
    pub num_arcs: u32,
    pub _reserved: u32,
}

/// On-disk arc record (16 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ArcRecord {
    pub ilabel: u32,
    pub olabel: u32,
    pub nextstate: u32,
    pub weight: f32,
}

impl From<&Arc> for ArcRecord {
    fn from(arc: &Arc) -> Self {
        Self {
            ilabel: arc.ilabel,
            olabel: arc.olabel,
            nextstate: arc.nextstate,
            weight: arc.weight.value(),
        }
    }
}

impl ArcRecord {
    #[inline]
    pub fn to_arc(self) -> Arc {
        Arc::new(self.ilabel, self.olabel, Weight::new(self.weight), self.nextstate)
    }
}

// Static assertions for record sizes
const _: () = assert!(size_of::<StateRecord>() == 16);
const _: () = assert!(size_of::<ArcRecord>() == 16);
