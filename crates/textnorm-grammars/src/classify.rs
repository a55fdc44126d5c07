// Top-level tokenize-and-classify grammar.
//
// Unions every tagger of a locale, wraps each token as `tokens { ... }` and
// covers a whole utterance: tokens separated by whitespace, punctuation
// attached on either side. Class weights decide between competing
// readings of the same span; the cheapest path is the canonical tagging.

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::{accep, insert, string_set, union_all};
use textnorm_fst::symbols;

use crate::capability::Engine;
use crate::data::{AlternativeFormats, LocaleData};
use crate::error::GrammarError;
use crate::grammar::{Grammar, GraphFst, delete_extra_space, delete_space};
use crate::numbers::NumberNames;
use crate::taggers::{
    AbbreviationFst, CardinalFst, DateFst, DecimalFst, ElectronicFst, FractionFst, MeasureFst,
    MoneyFst, OrdinalFst, PunctuationFst, RomanFst, TelephoneFst, TimeFst, WhitelistFst, WordFst,
};

/// Name of the classify rule.
pub const CLASSIFY_RULE: &str = "tokenize_and_classify";

/// Penalty for splitting a span into two tokens at a space.
const TOKEN_BREAK_WEIGHT: f32 = 1.1;

/// Path weight added to every token of `class`.
pub fn class_weight(class: SemioticClass) -> f32 {
    match class {
        SemioticClass::Whitelist => 1.01,
        SemioticClass::Date => 1.09,
        SemioticClass::Word | SemioticClass::Roman | SemioticClass::Abbreviation => 100.0,
        SemioticClass::Punctuation => 2.1,
        _ => 1.1,
    }
}

#[derive(Debug, Clone)]
pub struct ClassifyFst {
    graph: GraphFst,
    classes: Vec<SemioticClass>,
}

impl ClassifyFst {
    /// Build every tagger the locale has tables for and combine them.
    ///
    /// Roman numerals and abbreviations are only recognised in
    /// non-deterministic mode: a capitalised "I" or "NASA" is too often a
    /// word. Text with a malformed digit run ("1,0 01") has no path.
    pub fn new(
        engine: &Engine,
        data: &LocaleData,
        deterministic: bool,
    ) -> Result<Self, GrammarError> {
        let names = NumberNames::from_table(&data.language, &data.numbers)?;
        let cardinal = CardinalFst::new(engine, &names, &data.formats, deterministic);

        let (mut taggers, other) = rayon::join(
            || numeric_taggers(engine, data, &names, &cardinal, deterministic),
            || text_taggers(engine, data, &names, deterministic),
        );
        taggers.extend(other);
        let punctuation = PunctuationFst::new(engine, deterministic);
        taggers.push((SemioticClass::Punctuation, punctuation.fst().clone()));

        let weighted: Vec<VectorFst> = taggers
            .iter()
            .map(|(class, fst)| fst.add_weight(class_weight(*class)))
            .collect();
        let token = wrap_token(&union_all(&weighted));
        let punct = wrap_token(
            &punctuation
                .fst()
                .add_weight(class_weight(SemioticClass::Punctuation)),
        );

        let token_plus_punct = VectorFst::concat_all([
            &punct.concat(&insert(" ")).star(),
            &token,
            &insert(" ").concat(&punct).star(),
        ]);
        let separator = delete_extra_space()
            .add_weight(TOKEN_BREAK_WEIGHT)
            .union(&VectorFst::concat_all([&insert(" "), &punct, &insert(" ")]));
        let utterance = VectorFst::concat_all([
            &delete_space(),
            &token_plus_punct,
            &separator.concat(&token_plus_punct).star(),
            &delete_space(),
        ]);
        let numeric: Vec<&VectorFst> = taggers
            .iter()
            .filter(|(class, _)| !matches!(class, SemioticClass::Word | SemioticClass::Punctuation))
            .map(|(_, fst)| fst)
            .collect();
        let fst = without_malformed_numbers(&union_all(numeric), &data.formats).compose(&utterance);

        let classes: Vec<SemioticClass> = taggers.iter().map(|(class, _)| *class).collect();
        let graph = GraphFst::new(engine, CLASSIFY_RULE, GrammarKind::Classify, deterministic).finish(fst);
        log::info!(
            "built {} classify grammar ({} classes, {} states)",
            data.language,
            classes.len(),
            graph.fst().num_states()
        );
        Ok(Self { graph, classes })
    }

    /// Classes this grammar recognises.
    pub fn classes(&self) -> &[SemioticClass] {
        &self.classes
    }
}

impl Grammar for ClassifyFst {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}

/// Acceptor for text without a malformed digit run.
///
/// A digit run is a maximal stretch of digits joined by single spaces,
/// `,`, `.` or group separators. It is well formed when it splits at
/// spaces into pieces that `numeric` reads whole.
fn without_malformed_numbers(numeric: &VectorFst, formats: &AlternativeFormats) -> VectorFst {
    let mut joiners: Vec<&str> = vec![" ", ",", "."];
    for sep in &formats.separators {
        if !joiners.contains(&sep.as_str()) {
            joiners.push(sep);
        }
    }
    let digit = symbols::digit();
    let joiner = string_set(&joiners);
    let run = digit.plus().concat(&joiner.concat(&digit.plus()).star());
    let piece = run.compose(numeric).project_input();
    let pieces = piece.concat(&accep(" ").concat(&piece).star());
    let malformed = run.difference(&pieces);

    // Contexts the run cannot extend into.
    let any = symbols::sigma().star();
    let not_digit = symbols::sigma().difference(&digit);
    let outside = not_digit.difference(&joiner);
    let left = union_all([
        &VectorFst::epsilon_machine(),
        &any.concat(&outside),
        &any.concat(&not_digit).optional().concat(&joiner),
    ]);
    let right = union_all([
        &VectorFst::epsilon_machine(),
        &outside.concat(&any),
        &joiner.concat(&not_digit.concat(&any).optional()),
    ]);
    any.difference(&VectorFst::concat_all([&left, &malformed, &right]))
}

fn wrap_token(fst: &VectorFst) -> VectorFst {
    VectorFst::concat_all([&insert("tokens { "), fst, &insert(" }")])
}

type Tagged = Vec<(SemioticClass, VectorFst)>;

fn numeric_taggers(
    engine: &Engine,
    data: &LocaleData,
    names: &NumberNames,
    cardinal: &CardinalFst,
    deterministic: bool,
) -> Tagged {
    let mut taggers = vec![(SemioticClass::Cardinal, cardinal.fst().clone())];
    if let Some(table) = &data.ordinals {
        let ordinal = OrdinalFst::new(engine, names, table, deterministic);
        taggers.push((SemioticClass::Ordinal, ordinal.fst().clone()));
    }
    let decimal = data
        .numbers
        .point
        .as_ref()
        .map(|_| DecimalFst::new(engine, cardinal, names, &data.numbers, deterministic));
    if let Some(decimal) = &decimal {
        taggers.push((SemioticClass::Decimal, decimal.fst().clone()));
    }
    if let Some(table) = &data.money {
        let money = MoneyFst::new(engine, cardinal, names, table, deterministic);
        taggers.push((SemioticClass::Money, money.fst().clone()));
    }
    let fraction = data
        .fraction
        .as_ref()
        .map(|_| FractionFst::new(engine, cardinal, deterministic));
    if let Some(fraction) = &fraction {
        taggers.push((SemioticClass::Fraction, fraction.fst().clone()));
    }
    if let Some(table) = &data.measure {
        let measure = MeasureFst::new(
            engine,
            cardinal,
            decimal.as_ref(),
            fraction.as_ref(),
            table,
            deterministic,
        );
        taggers.push((SemioticClass::Measure, measure.fst().clone()));
    }
    taggers
}

fn text_taggers(
    engine: &Engine,
    data: &LocaleData,
    names: &NumberNames,
    deterministic: bool,
) -> Tagged {
    let mut taggers = Vec::new();
    if let Some(table) = &data.date {
        let date = DateFst::new(engine, names, table, deterministic);
        taggers.push((SemioticClass::Date, date.fst().clone()));
    }
    if let Some(table) = &data.time {
        let time = TimeFst::new(engine, names, table, deterministic);
        taggers.push((SemioticClass::Time, time.fst().clone()));
    }
    if let Some(table) = &data.telephone {
        let telephone = TelephoneFst::new(engine, names, table, deterministic);
        taggers.push((SemioticClass::Telephone, telephone.fst().clone()));
    }
    if let Some(table) = &data.electronic {
        let electronic = ElectronicFst::new(engine, table, deterministic);
        taggers.push((SemioticClass::Electronic, electronic.fst().clone()));
    }
    if let Some(table) = &data.whitelist {
        let whitelist = WhitelistFst::new(engine, table, deterministic);
        taggers.push((SemioticClass::Whitelist, whitelist.fst().clone()));
    }
    if !deterministic && data.ordinals.is_some() {
        let roman = RomanFst::new(engine, names, deterministic);
        taggers.push((SemioticClass::Roman, roman.fst().clone()));
    }
    if !deterministic {
        let abbreviation = AbbreviationFst::new(engine, deterministic);
        taggers.push((SemioticClass::Abbreviation, abbreviation.fst().clone()));
    }
    let word = WordFst::new(engine, deterministic);
    taggers.push((SemioticClass::Word, word.fst().clone()));
    taggers
}
