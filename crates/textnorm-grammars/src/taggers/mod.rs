// Classify grammars: one tagger per semiotic class.
//
// A tagger maps a span of raw text to the fields of one token. Wrapped
// classes emit `class { field: "..." ... }`; whitelist, word and punctuation
// emit a bare `name: "..."` field.

pub mod abbreviation;
pub mod cardinal;
pub mod date;
pub mod decimal;
pub mod electronic;
pub mod fraction;
pub mod measure;
pub mod money;
pub mod ordinal;
pub mod punctuation;
pub mod roman;
pub mod telephone;
pub mod time;
pub mod whitelist;
pub mod word;

pub use abbreviation::AbbreviationFst;
pub use cardinal::CardinalFst;
pub use date::DateFst;
pub use decimal::DecimalFst;
pub use electronic::ElectronicFst;
pub use fraction::FractionFst;
pub use measure::MeasureFst;
pub use money::MoneyFst;
pub use ordinal::OrdinalFst;
pub use punctuation::PunctuationFst;
pub use roman::RomanFst;
pub use telephone::TelephoneFst;
pub use time::TimeFst;
pub use whitelist::WhitelistFst;
pub use word::WordFst;

use textnorm_fst::VectorFst;
use textnorm_fst::ops::string_set;
use textnorm_fst::symbols;

/// Non-empty inputs other than the listed strings.
pub(crate) fn any_except(excluded: &[&str]) -> VectorFst {
    symbols::sigma().plus().difference(&string_set(excluded))
}

/// Inputs `from..=to` as decimal numerals, optionally zero-padded to two
/// digits (`"5"` and `"05"`).
pub(crate) fn number_range(from: u32, to: u32) -> VectorFst {
    let plain = (from..=to).map(|n| n.to_string());
    let padded = (from..=to.min(9)).map(|n| format!("0{n}"));
    string_set(plain.chain(padded))
}
