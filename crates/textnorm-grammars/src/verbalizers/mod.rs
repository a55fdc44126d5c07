// Verbalize grammars: one verbalizer per semiotic class.
//
// A verbalizer consumes the fields of one token and produces spoken text.
// Whitelist, word and punctuation tokens share the bare `name` verbalizer.

pub mod abbreviation;
pub mod cardinal;
pub mod date;
pub mod decimal;
pub mod electronic;
pub mod fraction;
pub mod measure;
pub mod money;
pub mod ordinal;
pub mod roman;
pub mod telephone;
pub mod time;
pub mod word;

pub use abbreviation::AbbreviationVerbalizer;
pub use cardinal::CardinalVerbalizer;
pub use date::DateVerbalizer;
pub use decimal::DecimalVerbalizer;
pub use electronic::ElectronicVerbalizer;
pub use fraction::FractionVerbalizer;
pub use measure::MeasureVerbalizer;
pub use money::MoneyVerbalizer;
pub use ordinal::OrdinalVerbalizer;
pub use roman::RomanVerbalizer;
pub use telephone::TelephoneVerbalizer;
pub use time::TimeVerbalizer;
pub use word::WordVerbalizer;

use textnorm_fst::VectorFst;
use textnorm_fst::ops::insert;

use crate::grammar::delete_space;

/// Gap between two fields: drop the input spacing, emit one space.
pub(crate) fn field_gap() -> VectorFst {
    delete_space().concat(&insert(" "))
}
