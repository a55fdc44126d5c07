// Binary format: header parsing, automaton (de)serialization.

use bytemuck::Zeroable;

use crate::fst::{Arc, State, VectorFst};
use crate::transition::{ArcRecord, NO_STATE, StateRecord};
use crate::weight::Weight;
use crate::{FstError, StateId};

/// Header magic constants (little-endian).
const COOKIE1: u32 = 0x5446_4E54;
const COOKIE2: u32 = 0x0001_F57A;

/// Size of the binary header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Size of the automaton counts block following the header.
const COUNTS_SIZE: usize = 16;

/// Largest valid label.
const MAX_LABEL: u32 = 0xFF;

/// Payload kind stored in header byte 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Kind {
    /// A single serialized automaton.
    Fst = 0x01,
    /// A named-entry archive of automata.
    Archive = 0x02,
}

/// Parsed file header.
///
/// The header occupies the first 16 bytes:
/// - bytes 0..4: cookie1 (magic number)
/// - bytes 4..8: cookie2 (magic number)
/// - byte 8: payload kind
/// - bytes 9..16: reserved (zero)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub kind: u8,
}

/// Parses and validates the 16-byte header.
pub fn parse_header(data: &[u8]) -> Result<Header, FstError> {
    if data.len() < HEADER_SIZE {
        return Err(FstError::TooShort {
            expected: HEADER_SIZE,
            actual: data.len(),
        });
    }

    let cookie1 = read_u32(data, 0);
    let cookie2 = read_u32(data, 4);
    if cookie1 != COOKIE1 || cookie2 != COOKIE2 {
        return Err(FstError::InvalidMagic);
    }

    Ok(Header { kind: data[8] })
}

/// Parses the header and checks its payload kind.
pub fn expect_kind(data: &[u8], kind: Kind) -> Result<(), FstError> {
    let header = parse_header(data)?;
    if header.kind != kind as u8 {
        return Err(FstError::KindMismatch {
            expected: kind as u8,
            actual: header.kind,
        });
    }
    Ok(())
}

/// Appends a header for `kind` to `out`.
pub fn write_header(out: &mut Vec<u8>, kind: Kind) {
    out.extend_from_slice(&COOKIE1.to_le_bytes());
    out.extend_from_slice(&COOKIE2.to_le_bytes());
    out.push(kind as u8);
    out.extend_from_slice(&[0u8; HEADER_SIZE - 9]);
}

#[inline]
pub(crate) fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

impl VectorFst {
    /// Serialize into the binary automaton format.
    ///
    /// Layout after the header: `num_states`, `start` ([`NO_STATE`] if none),
    /// `num_arcs`, a reserved word, then one [`StateRecord`] per state and one
    /// [`ArcRecord`] per arc, arcs grouped by source state.
    pub fn to_bytes(&self) -> Vec<u8> {
        let num_arcs = self.num_arcs();
        let mut out = Vec::with_capacity(
            HEADER_SIZE + COUNTS_SIZE + 16 * (self.num_states() + num_arcs),
        );
        write_header(&mut out, Kind::Fst);
        out.extend_from_slice(&(self.num_states() as u32).to_le_bytes());
        out.extend_from_slice(&self.start().unwrap_or(NO_STATE).to_le_bytes());
        out.extend_from_slice(&(num_arcs as u32).to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());

        let mut first_arc = 0u32;
        let mut state_records = Vec::with_capacity(self.num_states());
        for state in self.states() {
            state_records.push(StateRecord {
                final_weight: state.final_weight.value(),
                first_arc,
                num_arcs: state.arcs.len() as u32,
                _reserved: 0,
            });
            first_arc += state.arcs.len() as u32;
        }
        let arc_records: Vec<ArcRecord> = self
            .states()
            .iter()
            .flat_map(|s| s.arcs.iter().map(ArcRecord::from))
            .collect();

        out.extend_from_slice(bytemuck::cast_slice(&state_records));
        out.extend_from_slice(bytemuck::cast_slice(&arc_records));
        out
    }

    /// Deserialize an automaton written by [`VectorFst::to_bytes`].
    ///
    /// Records are copied into aligned vectors, so `data` may have any
    /// alignment. Every state index and label is validated.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FstError> {
        expect_kind(data, Kind::Fst)?;
        let body = HEADER_SIZE + COUNTS_SIZE;
        if data.len() < body {
            return Err(FstError::TooShort {
                expected: body,
                actual: data.len(),
            });
        }
        let num_states = read_u32(data, HEADER_SIZE);
        let start = read_u32(data, HEADER_SIZE + 4);
        let num_arcs = read_u32(data, HEADER_SIZE + 8);

        let states_len = num_states as usize * size_of::<StateRecord>();
        let arcs_len = num_arcs as usize * size_of::<ArcRecord>();
        let expected = body + states_len + arcs_len;
        if data.len() < expected {
            return Err(FstError::TooShort {
                expected,
                actual: data.len(),
            });
        }

        // Copy into aligned Vecs
        let mut state_records = vec![StateRecord::zeroed(); num_states as usize];
        bytemuck::cast_slice_mut::<StateRecord, u8>(&mut state_records)
            .copy_from_slice(&data[body..body + states_len]);
        let mut arc_records = vec![ArcRecord::zeroed(); num_arcs as usize];
        bytemuck::cast_slice_mut::<ArcRecord, u8>(&mut arc_records)
            .copy_from_slice(&data[body + states_len..expected]);

        let check_state = |state: u32| -> Result<StateId, FstError> {
            if state < num_states {
                Ok(state)
            } else {
                Err(FstError::InvalidState { state, num_states })
            }
        };

        let mut states = Vec::with_capacity(num_states as usize);
        for record in &state_records {
            let begin = record.first_arc as usize;
            let end = begin + record.num_arcs as usize;
            if end > arc_records.len() {
                return Err(FstError::TooShort {
                    expected: body + states_len + end * size_of::<ArcRecord>(),
                    actual: data.len(),
                });
            }
            let mut arcs: Vec<Arc> = Vec::with_capacity(record.num_arcs as usize);
            for arc in &arc_records[begin..end] {
                check_state(arc.nextstate)?;
                for label in [arc.ilabel, arc.olabel] {
                    if label > MAX_LABEL {
                        return Err(FstError::InvalidLabel(label));
                    }
                }
                arcs.push(arc.to_arc());
            }
            states.push(State {
                arcs,
                final_weight: Weight::new(record.final_weight),
            });
        }

        let start = if start == NO_STATE {
            None
        } else {
            Some(check_state(start)?)
        };
        Ok(VectorFst::from_parts(states, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{cross, string_map};

    #[test]
    fn header_roundtrip() {
        let mut buf = Vec::new();
        write_header(&mut buf, Kind::Archive);
        assert_eq!(buf.len(), HEADER_SIZE);
        assert_eq!(parse_header(&buf).unwrap().kind, Kind::Archive as u8);
    }

    #[test]
    fn reject_too_short() {
        let data = [0u8; 8];
        let err = parse_header(&data).unwrap_err();
        assert!(matches!(
            err,
            FstError::TooShort {
                expected: 16,
                actual: 8
            }
        ));
    }

    #[test]
    fn reject_invalid_magic() {
        let mut data = Vec::new();
        write_header(&mut data, Kind::Fst);
        data[0] = 0xFF;
        assert!(matches!(parse_header(&data), Err(FstError::InvalidMagic)));
    }

    #[test]
    fn reject_wrong_kind() {
        let mut data = Vec::new();
        write_header(&mut data, Kind::Archive);
        data.extend_from_slice(&[0u8; COUNTS_SIZE]);
        assert!(matches!(
            VectorFst::from_bytes(&data),
            Err(FstError::KindMismatch {
                expected: 0x01,
                actual: 0x02
            })
        ));
    }

    #[test]
    fn serialized_automaton_behaves_the_same() {
        let fst = string_map([("1", "one"), ("2", "two")])
            .add_weight(0.25)
            .optimize();
        let bytes = fst.to_bytes();
        let loaded = VectorFst::from_bytes(&bytes).unwrap();
        assert_eq!(loaded, fst);
        assert_eq!(loaded.transduce("2").as_deref(), Some("two"));
    }

    #[test]
    fn empty_automaton_serializes() {
        let bytes = VectorFst::new().to_bytes();
        assert!(VectorFst::from_bytes(&bytes).unwrap().is_empty());
    }

    #[test]
    fn reject_truncated_body() {
        let bytes = cross("a", "b").to_bytes();
        let err = VectorFst::from_bytes(&bytes[..bytes.len() - 4]).unwrap_err();
        assert!(matches!(err, FstError::TooShort { .. }));
    }

    #[test]
    fn reject_out_of_range_state() {
        let mut bytes = cross("a", "b").to_bytes();
        let arc_offset = HEADER_SIZE + COUNTS_SIZE + 2 * size_of::<StateRecord>();
        bytes[arc_offset + 8..arc_offset + 12].copy_from_slice(&99u32.to_le_bytes());
        assert!(matches!(
            VectorFst::from_bytes(&bytes),
            Err(FstError::InvalidState { state: 99, .. })
        ));
    }
}
