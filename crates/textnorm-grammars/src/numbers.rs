// Number names: canonical digit strings to spelled-out cardinals.
//
// The input side of every automaton here is a digit string without leading
// zeros ("0" or [1-9][0-9]*). Group separators and leading zeros are handled
// by the cardinal tagger before the names are applied.

use textnorm_fst::VectorFst;
use textnorm_fst::ops::{accep, cross, delete, insert, string_map, union_all};
use textnorm_fst::symbols::{self, byte_class};

use crate::data::{Magnitude, NumberNameTable, Rewrite};
use crate::error::GrammarError;

/// Longest digit string with a spelled-out name (up to 10^12 - 1).
pub const MAX_DIGITS: usize = 12;

/// Compiled `cardinal_number_names` plus the pieces other classes reuse.
#[derive(Debug, Clone)]
pub struct NumberNames {
    cardinal: VectorFst,
    zero: VectorFst,
    digit: VectorFst,
    pairs: VectorFst,
}

impl NumberNames {
    /// Build the number-name automata from a locale table.
    pub fn from_table(locale: &str, table: &NumberNameTable) -> Result<Self, GrammarError> {
        table.validate(locale)?;
        let builder = Builder::new(table);
        let names = NumberNames {
            cardinal: builder.cardinal(),
            zero: cross("0", &table.zero),
            digit: builder.units(false),
            pairs: builder.two_digit(&builder.units(false)),
        };
        log::debug!(
            "{locale} number names: {} states, {} arcs",
            names.cardinal.num_states(),
            names.cardinal.num_arcs()
        );
        Ok(names)
    }

    /// Canonical numerals: every automaton is the identity on its domain.
    pub fn digits() -> Self {
        let d = symbols::digit();
        NumberNames {
            cardinal: accep("0")
                .union(&symbols::nonzero_digit().concat(&d.closure(0, Some(MAX_DIGITS - 1)))),
            zero: accep("0"),
            digit: symbols::nonzero_digit(),
            pairs: symbols::nonzero_digit().concat(&d),
        }
    }

    /// `"0"` and `[1-9][0-9]{0,11}` to their names.
    pub fn cardinal(&self) -> &VectorFst {
        &self.cardinal
    }

    /// `"0"` to its name.
    pub fn zero(&self) -> &VectorFst {
        &self.zero
    }

    /// `"1"`..`"9"` to their names.
    pub fn digit(&self) -> &VectorFst {
        &self.digit
    }

    /// `"10"`..`"99"` to their names.
    pub fn pairs(&self) -> &VectorFst {
        &self.pairs
    }

    /// Any single digit, zero included.
    pub fn single_digit(&self) -> VectorFst {
        self.zero.union(&self.digit)
    }

    /// Exactly `n` digits read one at a time, separated by spaces.
    pub fn digit_run(&self, n: usize) -> VectorFst {
        let one = self.single_digit();
        let rest = insert(" ").concat(&one);
        let mut run = one;
        for _ in 1..n {
            run = run.concat(&rest);
        }
        run
    }

    /// One or more digits read one at a time.
    pub fn digit_sequence(&self) -> VectorFst {
        let one = self.single_digit();
        one.concat(&insert(" ").concat(&one).star())
    }
}

/// Digit strings whose last digit is accepted by `last` and whose last two
/// digits are not a teen (`1`, `21`, `101` end in one; `11` does not).
pub fn ends_in(last: &VectorFst) -> VectorFst {
    let not_one = byte_class(b"023456789".iter().copied());
    symbols::digit()
        .star()
        .concat(&not_one)
        .optional()
        .concat(last)
}

/// Non-empty digit strings other than exactly `"1"`.
pub fn not_one() -> VectorFst {
    symbols::digit().plus().difference(&accep("1"))
}

/// Grouped-digit validation, shared by every class that reads numerals.
///
/// Maps a numeral to its plain digits. Ungrouped digit runs pass through;
/// grouped numerals must use one separator throughout, a first group of one
/// to three digits not starting with zero, and groups of exactly three
/// digits after it. Anything else has no path.
pub fn separators(seps: &[char]) -> VectorFst {
    let d = symbols::digit();
    let d3 = VectorFst::concat_all([&d, &d, &d]);
    let lead = symbols::nonzero_digit().concat(&d.closure(0, Some(2)));
    let mut rules = vec![d.plus()];
    for sep in seps {
        let mut buf = [0u8; 4];
        let group = delete(sep.encode_utf8(&mut buf)).concat(&d3);
        rules.push(lead.concat(&group.plus()));
    }
    union_all(&rules)
}

/// Outputs of `names` with a leading word sequence rewritten, e.g.
/// `тысяча один` -> `одна тысяча один`. `None` without rewrites.
pub fn rewrite_alternatives(names: &VectorFst, rewrites: &[Rewrite]) -> Option<VectorFst> {
    if rewrites.is_empty() {
        return None;
    }
    let tail = accep(" ").concat(&symbols::sigma().star()).optional();
    let rules: Vec<VectorFst> = rewrites
        .iter()
        .map(|r| cross(&r.from, &r.to).concat(&tail))
        .collect();
    Some(names.compose(&union_all(&rules)))
}

struct Builder<'a> {
    table: &'a NumberNameTable,
    magnitudes: Vec<&'a Magnitude>,
}

impl<'a> Builder<'a> {
    fn new(table: &'a NumberNameTable) -> Self {
        let mut magnitudes: Vec<&Magnitude> = table.magnitudes.iter().collect();
        magnitudes.sort_by_key(|m| m.power);
        Self { table, magnitudes }
    }

    /// `"1"`..`"9"`, feminine forms where the table has them.
    fn units(&self, feminine: bool) -> VectorFst {
        string_map(self.table.units.iter().enumerate().map(|(i, word)| {
            let key = (i + 1).to_string();
            let word = if feminine {
                self.table.feminine_units.get(&key).unwrap_or(word)
            } else {
                word
            };
            (key, word.clone())
        }))
    }

    /// `"10"`..`"99"`.
    fn two_digit(&self, units: &VectorFst) -> VectorFst {
        let t = self.table;
        let teens = string_map(t.teens.iter().enumerate().map(|(i, w)| (format!("1{i}"), w)));
        let tens_exact = string_map(t.tens.iter().enumerate().map(|(i, w)| (format!("{}0", i + 2), w)));
        let tens_units: Vec<VectorFst> = t
            .tens
            .iter()
            .enumerate()
            .map(|(i, w)| cross(&(i + 2).to_string(), &format!("{w} ")).concat(units))
            .collect();
        union_all([&teens, &tens_exact, &union_all(&tens_units)])
    }

    /// `"01"`..`"99"`.
    fn padded_two_digit(&self, units: &VectorFst) -> VectorFst {
        delete("0").concat(units).union(&self.two_digit(units))
    }

    /// `"100"`..`"999"`.
    fn hundreds(&self, units: &VectorFst) -> VectorFst {
        let head = string_map(
            self.table
                .hundreds
                .iter()
                .enumerate()
                .map(|(i, w)| ((i + 1).to_string(), w)),
        );
        let rest = delete("00").union(&insert(" ").concat(&self.padded_two_digit(units)));
        head.concat(&rest)
    }

    /// `"1"`..`"999"`: the leading group of a number.
    fn lead(&self, units: &VectorFst) -> VectorFst {
        union_all([units, &self.two_digit(units), &self.hundreds(units)])
    }

    /// `"001"`..`"999"`: an inner group.
    fn group(&self, units: &VectorFst) -> VectorFst {
        self.hundreds(units)
            .union(&delete("0").concat(&self.padded_two_digit(units)))
    }

    /// `group` followed by the magnitude word in the agreeing plural form.
    fn with_magnitude(&self, group: &VectorFst, m: &Magnitude) -> VectorFst {
        let one = ends_in(&accep("1"));
        let few = ends_in(&byte_class(b"234".iter().copied()));
        let many = symbols::digit().plus().difference(&one.union(&few));
        let forms = [(one, &m.one), (few, &m.few), (many, &m.many)];
        let rules: Vec<VectorFst> = forms
            .iter()
            .map(|(filter, word)| filter.compose(group).concat(&insert(&format!(" {word}"))))
            .collect();
        union_all(&rules)
    }

    fn units_for(&self, m: &Magnitude) -> VectorFst {
        self.units(m.feminine)
    }

    fn leading_magnitude(&self, m: &Magnitude) -> VectorFst {
        let named = self.with_magnitude(&self.lead(&self.units_for(m)), m);
        if m.omit_leading_one {
            cross("1", &m.one).union(&not_one().compose(&named))
        } else {
            named
        }
    }

    fn inner_magnitude(&self, m: &Magnitude) -> VectorFst {
        let named = self.with_magnitude(&self.group(&self.units_for(m)), m);
        insert(" ").concat(&named).union(&delete("000"))
    }

    fn cardinal(&self) -> VectorFst {
        let units = self.units(false);
        let last_group = insert(" ")
            .concat(&self.group(&units))
            .union(&delete("000"));

        let mut rules = vec![cross("0", &self.table.zero), self.lead(&units)];
        for (i, m) in self.magnitudes.iter().enumerate() {
            let mut rule = self.leading_magnitude(m);
            for inner in self.magnitudes[..i].iter().rev() {
                rule = rule.concat(&self.inner_magnitude(inner));
            }
            rules.push(rule.concat(&last_group));
        }
        union_all(&rules)
    }
}
