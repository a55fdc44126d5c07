// Top-level verbalize grammar: every verbalizer of a locale, applied to a
// space-separated sequence of `tokens { ... }` blocks.

use textnorm_core::enums::GrammarKind;
use textnorm_fst::VectorFst;
use textnorm_fst::ops::{insert, union_all};

use crate::capability::Engine;
use crate::data::LocaleData;
use crate::error::GrammarError;
use crate::grammar::{Grammar, GraphFst, delete_group, delete_space};
use crate::verbalizers::{
    AbbreviationVerbalizer, CardinalVerbalizer, DateVerbalizer, DecimalVerbalizer,
    ElectronicVerbalizer, FractionVerbalizer, MeasureVerbalizer, MoneyVerbalizer,
    OrdinalVerbalizer, RomanVerbalizer, TelephoneVerbalizer, TimeVerbalizer, WordVerbalizer,
};

/// Name of the verbalize rule.
pub const VERBALIZE_RULE: &str = "verbalize";

#[derive(Debug, Clone)]
pub struct VerbalizeFst {
    graph: GraphFst,
}

impl VerbalizeFst {
    pub fn new(
        engine: &Engine,
        data: &LocaleData,
        deterministic: bool,
    ) -> Result<Self, GrammarError> {
        data.numbers.validate(&data.language)?;
        let (mut verbalizers, other) = rayon::join(
            || numeric_verbalizers(engine, data, deterministic),
            || text_verbalizers(engine, data, deterministic),
        );
        verbalizers.extend(other);

        let token = delete_group("tokens", &union_all(&verbalizers));
        let fst = VectorFst::concat_all([
            &delete_space(),
            &token,
            &VectorFst::concat_all([&delete_space(), &insert(" "), &token]).star(),
            &delete_space(),
        ]);
        let graph = GraphFst::new(engine, VERBALIZE_RULE, GrammarKind::Verbalize, deterministic).finish(fst);
        log::info!(
            "built {} verbalize grammar ({} verbalizers, {} states)",
            data.language,
            verbalizers.len(),
            graph.fst().num_states()
        );
        Ok(Self { graph })
    }
}

impl Grammar for VerbalizeFst {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}

fn numeric_verbalizers(engine: &Engine, data: &LocaleData, deterministic: bool) -> Vec<VectorFst> {
    let numbers = &data.numbers;
    let cardinal = CardinalVerbalizer::new(engine, numbers, deterministic);
    let decimal = numbers
        .point
        .as_deref()
        .map(|point| DecimalVerbalizer::new(engine, &numbers.minus, point, deterministic));

    let ordinal = data
        .ordinals
        .as_ref()
        .map(|table| OrdinalVerbalizer::new(engine, table, deterministic));
    let fraction = ordinal.as_ref().zip(data.fraction.as_ref()).map(|(ordinal, table)| {
        FractionVerbalizer::new(engine, ordinal, numbers, table, deterministic)
    });

    let mut fsts = vec![cardinal.fst().clone()];
    if let Some(decimal) = &decimal {
        fsts.push(decimal.fst().clone());
    }
    if let Some(fraction) = &fraction {
        fsts.push(fraction.fst().clone());
    }
    if let Some(table) = &data.money {
        fsts.push(MoneyVerbalizer::new(engine, table, deterministic).fst().clone());
    }
    if data.measure.is_some() {
        let measure = MeasureVerbalizer::new(
            engine,
            &cardinal,
            decimal.as_ref(),
            fraction.as_ref(),
            deterministic,
        );
        fsts.push(measure.fst().clone());
    }
    if let Some(ordinal) = &ordinal {
        fsts.push(RomanVerbalizer::new(engine, ordinal, deterministic).fst().clone());
        if data.date.is_some() {
            fsts.push(DateVerbalizer::new(engine, ordinal, deterministic).fst().clone());
        }
        fsts.push(ordinal.fst().clone());
    }
    fsts
}

fn text_verbalizers(engine: &Engine, data: &LocaleData, deterministic: bool) -> Vec<VectorFst> {
    let mut fsts = vec![WordVerbalizer::new(engine, deterministic).fst().clone()];
    if !deterministic {
        fsts.push(AbbreviationVerbalizer::new(engine, deterministic).fst().clone());
    }
    if let Some(table) = &data.time {
        fsts.push(TimeVerbalizer::new(engine, table, deterministic).fst().clone());
    }
    if data.telephone.is_some() {
        fsts.push(TelephoneVerbalizer::new(engine, deterministic).fst().clone());
    }
    if let Some(table) = &data.electronic {
        let electronic = ElectronicVerbalizer::new(engine, table, &data.numbers, deterministic);
        fsts.push(electronic.fst().clone());
    }
    fsts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::engine;

    fn verbalize(language: &str) -> VerbalizeFst {
        build(language, true)
    }

    fn build(language: &str, deterministic: bool) -> VerbalizeFst {
        let dir = tempfile::tempdir().unwrap();
        let data = LocaleData::load(language, Some(dir.path())).unwrap();
        VerbalizeFst::new(&engine().unwrap(), &data, deterministic).unwrap()
    }

    #[test]
    fn token_sequence() {
        let verbalize = verbalize("en");
        assert_eq!(verbalize.name(), "verbalize");
        assert_eq!(verbalize.kind(), GrammarKind::Verbalize);
        let text = r#"tokens { name: "call" } tokens { cardinal { integer: "five" } } tokens { name: "." }"#;
        assert_eq!(verbalize.fst().transduce(text).as_deref(), Some("call five ."));
    }

    #[test]
    fn single_token() {
        let verbalize = verbalize("en");
        assert_eq!(
            verbalize
                .fst()
                .transduce(r#"tokens { cardinal { negative: "true" integer: "five" } }"#)
                .as_deref(),
            Some("minus five")
        );
        assert_eq!(
            verbalize
                .fst()
                .transduce(r#"tokens { roman { integer: "one" } }"#)
                .as_deref(),
            Some("one")
        );
    }

    #[test]
    fn fractions_and_abbreviations() {
        let det = verbalize("en");
        let fraction = r#"tokens { fraction { integer_part: "two" numerator: "one" denominator: "two" } }"#;
        assert_eq!(det.fst().transduce(fraction).as_deref(), Some("two and one half"));
        let abbreviation = r#"tokens { abbreviation { value: "N A S A" } }"#;
        assert!(!det.fst().accepts(abbreviation));
        let nondet = build("en", false);
        assert_eq!(nondet.fst().transduce(abbreviation).as_deref(), Some("N A S A"));
    }

    #[test]
    fn russian_cardinal() {
        let verbalize = verbalize("ru");
        assert_eq!(
            verbalize
                .fst()
                .transduce(r#"tokens { cardinal { integer: "тысяча один" } }"#)
                .as_deref(),
            Some("тысяча один")
        );
    }
}
