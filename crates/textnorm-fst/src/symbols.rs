// Byte alphabet and UTF-8 character classes.
//
// Automata are labelled with raw UTF-8 code units. A "character" is therefore
// a short path of one to four arcs. The classes below only accept well-formed
// sequences, so closures over them never split a multi-byte character.

use crate::fst::{Arc, VectorFst};
use crate::weight::Weight;
use crate::{Label, StateId};

/// First byte value usable as a label (`0` is reserved for epsilon).
pub const MIN_BYTE: u8 = 0x01;

/// ASCII whitespace recognised between tokens.
pub const ASCII_WHITESPACE: &[u8] = b" \t\n\r";

/// ASCII punctuation characters.
pub const ASCII_PUNCTUATION: &[u8] = b"!#$%&'()*+,-./:;<=>?@[\\]^_`{|}~\"";

/// No-break space, treated as whitespace.
pub const NBSP: &str = "\u{a0}";

/// Every label of the byte alphabet, epsilon excluded.
pub fn alphabet() -> impl Iterator<Item = Label> {
    (MIN_BYTE as Label)..=0xFF
}

/// Two-state acceptor matching any single byte in `bytes`.
pub fn byte_class(bytes: impl IntoIterator<Item = u8>) -> VectorFst {
    let mut fst = VectorFst::new();
    let s0 = fst.add_state();
    let s1 = fst.add_state();
    fst.set_start(s0);
    fst.set_final(s1, Weight::ONE);
    let mut seen = [false; 256];
    for b in bytes {
        if b >= MIN_BYTE && !seen[b as usize] {
            seen[b as usize] = true;
            fst.add_arc(s0, Arc::new(b as Label, b as Label, Weight::ONE, s1));
        }
    }
    fst
}

/// Acceptor for one ASCII character out of `chars`.
pub fn ascii_class(chars: &str) -> VectorFst {
    byte_class(chars.bytes().filter(u8::is_ascii))
}

/// `0-9`
pub fn digit() -> VectorFst {
    byte_class(b'0'..=b'9')
}

/// `1-9`
pub fn nonzero_digit() -> VectorFst {
    byte_class(b'1'..=b'9')
}

/// `a-z`
pub fn lower() -> VectorFst {
    byte_class(b'a'..=b'z')
}

/// `A-Z`
pub fn upper() -> VectorFst {
    byte_class(b'A'..=b'Z')
}

/// ASCII letters.
pub fn alpha() -> VectorFst {
    byte_class((b'a'..=b'z').chain(b'A'..=b'Z'))
}

/// ASCII letters and digits.
pub fn alnum() -> VectorFst {
    byte_class((b'a'..=b'z').chain(b'A'..=b'Z').chain(b'0'..=b'9'))
}

/// One whitespace character: ASCII whitespace or a no-break space.
pub fn space() -> VectorFst {
    let mut fst = byte_class(ASCII_WHITESPACE.iter().copied());
    // U+00A0 is C2 A0 in UTF-8.
    let start = 0;
    let end = 1;
    let mid = fst.add_state();
    fst.add_arc(start, Arc::new(0xC2, 0xC2, Weight::ONE, mid));
    fst.add_arc(mid, Arc::new(0xA0, 0xA0, Weight::ONE, end));
    fst
}

/// Any well-formed UTF-8 character whose ASCII byte is not in `excluded`.
///
/// Multi-byte characters are always included; exclusions apply to the
/// single-byte (ASCII) range only.
pub fn utf8_char_except(excluded: &[u8]) -> VectorFst {
    let mut fst = VectorFst::new();
    let start = fst.add_state();
    let end = fst.add_state();
    let cont1 = fst.add_state();
    let cont2 = fst.add_state();
    let cont3 = fst.add_state();
    fst.set_start(start);
    fst.set_final(end, Weight::ONE);

    let mut add_range = |from: StateId, range: std::ops::RangeInclusive<u8>, to: StateId| {
        for b in range {
            if b < 0x80 && excluded.contains(&b) {
                continue;
            }
            fst.add_arc(from, Arc::new(b as Label, b as Label, Weight::ONE, to));
        }
    };
    add_range(start, MIN_BYTE..=0x7F, end);
    add_range(start, 0xC2..=0xDF, cont1);
    add_range(start, 0xE0..=0xEF, cont2);
    add_range(start, 0xF0..=0xF4, cont3);
    add_range(cont3, 0x80..=0xBF, cont2);
    add_range(cont2, 0x80..=0xBF, cont1);
    add_range(cont1, 0x80..=0xBF, end);
    fst
}

/// Any UTF-8 character.
pub fn sigma() -> VectorFst {
    utf8_char_except(&[])
}

/// Any character except ASCII whitespace. No-break spaces are
/// treated as non-space here to keep the class a single character set.
pub fn not_space() -> VectorFst {
    utf8_char_except(ASCII_WHITESPACE)
}

/// Any character except the double quote that delimits token fields.
pub fn not_quote() -> VectorFst {
    utf8_char_except(b"\"")
}
