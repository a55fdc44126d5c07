// Criterion benchmarks for textnorm-grammars.
//
// Grammar construction is measured with a small sample count; lookups run
// against grammars built once up front.
//
// Run:
//   cargo bench -p textnorm-grammars

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use textnorm_grammars::data::LocaleData;
use textnorm_grammars::numbers::NumberNames;
use textnorm_grammars::taggers::CardinalFst;
use textnorm_grammars::{Grammar, Normalizer, NormalizerOptions, engine};

const SENTENCES: &[&str] = &[
    "I have 3 apples.",
    "It costs $5.01 today",
    "Dr. Smith arrived on January 5, 2012 at 5:05 pm",
    "Call +1 555-123-4567 or mail abc@gmail.com",
    "The road is 2.5 km long and 50% done",
];

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

fn bench_build_cardinal(c: &mut Criterion) {
    let engine = engine().expect("engine");
    let data = LocaleData::load("ru", None).expect("ru data");
    let mut group = c.benchmark_group("build");
    group.sample_size(10);
    group.bench_function("ru_cardinal", |b| {
        b.iter(|| {
            let names = NumberNames::from_table("ru", &data.numbers).expect("names");
            black_box(CardinalFst::new(&engine, &names, &data.formats, true));
        });
    });
    group.finish();
}

fn bench_build_normalizer(c: &mut Criterion) {
    let engine = engine().expect("engine");
    let mut group = c.benchmark_group("build");
    group.sample_size(10);
    group.bench_function("en_normalizer", |b| {
        b.iter(|| black_box(Normalizer::new(&engine, &NormalizerOptions::default())));
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

fn bench_normalize(c: &mut Criterion) {
    let engine = engine().expect("engine");
    let normalizer = Normalizer::new(&engine, &NormalizerOptions::default()).expect("normalizer");

    c.bench_function("normalize_5_sentences", |b| {
        b.iter(|| {
            for sentence in SENTENCES {
                black_box(normalizer.normalize(sentence));
            }
        });
    });
}

fn bench_cardinal_lookup(c: &mut Criterion) {
    let engine = engine().expect("engine");
    let data = LocaleData::load("en", None).expect("en data");
    let names = NumberNames::from_table("en", &data.numbers).expect("names");
    let cardinal = CardinalFst::new(&engine, &names, &data.formats, true);
    let numerals: Vec<String> = (0..100u64).map(|i| (i * 7_919_393).to_string()).collect();

    c.bench_function("cardinal_100_numerals", |b| {
        b.iter(|| {
            for numeral in &numerals {
                black_box(cardinal.fst().transduce(numeral));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_build_cardinal,
    bench_build_normalizer,
    bench_normalize,
    bench_cardinal_lookup,
);
criterion_main!(benches);
