// Lookup: apply an automaton to a string and read back outputs.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::HashSet;

use crate::fst::VectorFst;
use crate::ops::accep;
use crate::weight::Weight;
use crate::{EPSILON, FstError, MAX_LOOP_COUNT, StateId};

/// One output string with its total path weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub output: String,
    pub weight: Weight,
}

/// Search node of the n-best search. `state == None` marks a completed path
/// whose final weight has already been added.
#[derive(Debug)]
struct Node {
    cost: Weight,
    seq: u64,
    state: Option<StateId>,
    output: Vec<u8>,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    // Reversed: BinaryHeap is a max-heap, the search wants the cheapest node.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

fn output_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

impl VectorFst {
    /// The lattice of all paths of `self` whose input is exactly `input`.
    pub fn apply(&self, input: &str) -> VectorFst {
        accep(input).compose(self)
    }

    /// The single cheapest path, or `None` if the automaton accepts nothing.
    ///
    /// Dijkstra over states; weights are expected to be non-negative.
    pub fn shortest_path(&self) -> Option<Path> {
        let start = self.start()?;
        let n = self.num_states();
        let mut dist = vec![Weight::ZERO; n];
        let mut pred: Vec<Option<(StateId, usize)>> = vec![None; n];
        let mut done = vec![false; n];
        let mut heap = BinaryHeap::new();

        dist[start as usize] = Weight::ONE;
        heap.push(Node {
            cost: Weight::ONE,
            seq: 0,
            state: Some(start),
            output: Vec::new(),
        });
        let mut seq = 0u64;

        while let Some(Node { state: Some(s), .. }) = heap.pop() {
            if done[s as usize] {
                continue;
            }
            done[s as usize] = true;
            for (i, arc) in self.arcs(s).iter().enumerate() {
                let candidate = dist[s as usize].times(arc.weight);
                let next = arc.nextstate as usize;
                if candidate.value() < dist[next].value() {
                    dist[next] = candidate;
                    pred[next] = Some((s, i));
                    seq += 1;
                    heap.push(Node {
                        cost: candidate,
                        seq,
                        state: Some(arc.nextstate),
                        output: Vec::new(),
                    });
                }
            }
        }

        let (best, weight) = self
            .state_ids()
            .map(|s| (s, dist[s as usize].times(self.final_weight(s))))
            .filter(|(_, w)| !w.is_zero())
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        let mut bytes = Vec::new();
        let mut s = best;
        while let Some((p, i)) = pred[s as usize] {
            let label = self.arcs(p)[i].olabel;
            if label != EPSILON {
                bytes.push(label as u8);
            }
            s = p;
        }
        bytes.reverse();
        Some(Path {
            output: output_string(&bytes),
            weight,
        })
    }

    /// Up to `n` distinct output strings, cheapest first.
    ///
    /// Best-first search over `(state, output)` pairs. Paths producing an
    /// output already returned are skipped. Fails with
    /// [`FstError::SearchLimit`] when fewer than `n` outputs were found
    /// within [`MAX_LOOP_COUNT`] steps and the lattice is not exhausted.
    pub fn n_shortest(&self, n: usize) -> Result<Vec<Path>, FstError> {
        let mut results = Vec::new();
        let Some(start) = self.start() else {
            return Ok(results);
        };
        if n == 0 {
            return Ok(results);
        }

        let mut heap = BinaryHeap::new();
        let mut expanded: HashSet<(StateId, Vec<u8>)> = HashSet::new();
        let mut emitted: HashSet<Vec<u8>> = HashSet::new();
        let mut seq = 0u64;
        heap.push(Node {
            cost: Weight::ONE,
            seq,
            state: Some(start),
            output: Vec::new(),
        });

        let mut steps = 0u32;
        while let Some(node) = heap.pop() {
            steps += 1;
            if steps > MAX_LOOP_COUNT {
                return Err(FstError::SearchLimit(MAX_LOOP_COUNT));
            }
            let Some(s) = node.state else {
                if emitted.insert(node.output.clone()) {
                    results.push(Path {
                        output: output_string(&node.output),
                        weight: node.cost,
                    });
                    if results.len() == n {
                        break;
                    }
                }
                continue;
            };
            if !expanded.insert((s, node.output.clone())) {
                continue;
            }

            let fw = self.final_weight(s);
            if !fw.is_zero() && !emitted.contains(&node.output) {
                seq += 1;
                heap.push(Node {
                    cost: node.cost.times(fw),
                    seq,
                    state: None,
                    output: node.output.clone(),
                });
            }
            for arc in self.arcs(s) {
                let mut output = node.output.clone();
                if arc.olabel != EPSILON {
                    output.push(arc.olabel as u8);
                }
                seq += 1;
                heap.push(Node {
                    cost: node.cost.times(arc.weight),
                    seq,
                    state: Some(arc.nextstate),
                    output,
                });
            }
        }
        Ok(results)
    }

    /// Cheapest output for `input`, or `None` if `input` is rejected.
    pub fn transduce(&self, input: &str) -> Option<String> {
        self.apply(input).shortest_path().map(|p| p.output)
    }

    /// `true` when `input` has at least one path.
    pub fn accepts(&self, input: &str) -> bool {
        !self.apply(input).is_empty()
    }

    /// Up to `n` distinct outputs for `input`, cheapest first.
    pub fn outputs(&self, input: &str, n: usize) -> Result<Vec<Path>, FstError> {
        self.apply(input).n_shortest(n)
    }
}
