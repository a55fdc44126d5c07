// Date tagger.
//
//   "January 5, 2012" -> date { month: "january" day: "five" year: "twenty twelve" }
//   "5 January"       -> date { day: "five" month: "january" }
//   "01/05/2012"      -> date { month: "january" day: "five" year: "twenty twelve" }
//
// Field order follows the input, the verbalizer reads day-first dates as
// "the fifth of january".

use textnorm_core::enums::{GrammarKind, SemioticClass};
use textnorm_fst::VectorFst;
use textnorm_fst::ops::{accep, cross, delete, insert, string_map, string_set, union_all};
use textnorm_fst::symbols::{self, byte_class};

use crate::capability::Engine;
use crate::data::DateTable;
use crate::grammar::{Grammar, GraphFst, case_variants, insert_space, quoted_field};
use crate::numbers::NumberNames;
use crate::taggers::number_range;

#[derive(Debug, Clone)]
pub struct DateFst {
    graph: GraphFst,
}

impl DateFst {
    pub fn new(
        engine: &Engine,
        names: &NumberNames,
        table: &DateTable,
        deterministic: bool,
    ) -> Self {
        let month = quoted_field("month", &month_names(table));
        let month_number = quoted_field("month", &month_numbers(table));
        let day_number = quoted_field("day", &day(names));
        let ordinal_suffix = delete_suffix();
        let day = day_number.concat(&ordinal_suffix.optional());
        let year = quoted_field("year", &year(names, table));

        let gap = delete(" ").concat(&insert_space());
        let comma_gap = delete(",").optional().concat(&gap);
        let tail_year = comma_gap.concat(&year).optional();

        let month_day = VectorFst::concat_all([&month, &gap, &day, &tail_year]);
        let day_month = VectorFst::concat_all([&day, &gap, &month, &tail_year]);
        let month_year = VectorFst::concat_all([&month, &gap, &year]);
        let slash = delete("/").concat(&insert_space());
        let numeric = VectorFst::concat_all([&month_number, &slash, &day_number, &slash, &year]);

        let body = union_all([&month_day, &day_month, &month_year, &numeric]);
        let graph = GraphFst::new(
            engine,
            SemioticClass::Date.as_str(),
            GrammarKind::Classify,
            deterministic,
        );
        let fst = graph.add_tokens(&body);
        Self {
            graph: graph.finish(fst),
        }
    }
}

impl Grammar for DateFst {
    fn graph(&self) -> &GraphFst {
        &self.graph
    }
}

/// Month names and abbreviations, lowercase or capitalised, to the name.
fn month_names(table: &DateTable) -> VectorFst {
    let mut rules = Vec::new();
    for month in &table.months {
        for variant in case_variants(&month.name) {
            rules.push(cross(&variant, &month.name));
        }
        if let Some(abbr) = &month.abbr {
            for variant in case_variants(abbr) {
                rules.push(cross(&variant, &month.name).concat(&delete(".").optional()));
            }
        }
    }
    union_all(&rules)
}

/// `"1"`..`"12"` and `"01"`..`"09"` to month names.
fn month_numbers(table: &DateTable) -> VectorFst {
    let pairs = table.months.iter().enumerate().flat_map(|(i, month)| {
        let n = i + 1;
        let padded = (n < 10).then(|| (format!("0{n}"), month.name.as_str()));
        std::iter::once((n.to_string(), month.name.as_str())).chain(padded)
    });
    string_map(pairs)
}

/// Day of month 1..31, optionally zero-padded, as a cardinal.
fn day(names: &NumberNames) -> VectorFst {
    number_range(1, 31).compose(&delete("0").optional().concat(names.cardinal()))
}

fn delete_suffix() -> VectorFst {
    string_set(["st", "nd", "rd", "th"]).delete_all()
}

/// Years 1000..2999 read in pairs ("nineteen ninety five", "twenty ten"),
/// with "oh" and "hundred" readings, and 2000..2009 as cardinals.
fn year(names: &NumberNames, table: &DateTable) -> VectorFst {
    let d = symbols::digit();
    let century = byte_class(*b"12").concat(&d);
    let not_twenty = century.difference(&accep("20"));
    let first_half = century.compose(names.pairs());
    let first_half_not_twenty = not_twenty.compose(names.pairs());

    let pairs = VectorFst::concat_all([&first_half, &insert(" "), names.pairs()]);
    let oh = VectorFst::concat_all([
        &first_half_not_twenty,
        &cross("0", &format!(" {} ", table.oh)),
        names.digit(),
    ]);
    let hundred = first_half_not_twenty.concat(&cross("00", &format!(" {}", table.hundred)));
    let two_thousands = accep("200").concat(&d).compose(names.cardinal());
    union_all([&pairs, &oh, &hundred, &two_thousands])
}
