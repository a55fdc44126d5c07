// Normalizer: raw text -> spoken form.
//
// Owns the compiled classify and verbalize automata, built from locale data
// or loaded from exported archives. Both are immutable, so one normalizer
// can serve any number of threads.

use std::path::{Path, PathBuf};

use hashbrown::HashSet;
use textnorm_core::token::{Token, parse_tokens};
use textnorm_fst::archive::Archive;
use textnorm_fst::{FstError, VectorFst};

use crate::capability::Engine;
use crate::classify::ClassifyFst;
use crate::data::LocaleData;
use crate::error::GrammarError;
use crate::export::{CLASSIFY_ARCHIVE, CLASSIFY_DIR, CLASSIFY_ENTRY, VERBALIZE_ARCHIVE, VERBALIZE_DIR, VERBALIZE_ENTRY};
use crate::grammar::Grammar;
use crate::verbalize::VerbalizeFst;

/// Punctuation that attaches to the preceding word.
const CLOSING: &[char] = &['.', ',', '!', '?', ';', ':', '%', ')', ']', '}'];

/// Punctuation that attaches to the following word.
const OPENING: &[char] = &['(', '[', '{'];

/// Readings costlier than the best one by more than this are not
/// alternatives. Splitting a span into more tokens always costs more.
const ALTERNATIVE_MARGIN: f32 = 1.0;

/// Options for building a [`Normalizer`] from locale data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerOptions {
    /// Locale code (`en`, `ru`).
    pub language: String,
    /// Keep only canonical readings. Alternatives need `false`.
    pub deterministic: bool,
    /// Override directory for locale tables.
    pub data_dir: Option<PathBuf>,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            deterministic: true,
            data_dir: None,
        }
    }
}

impl NormalizerOptions {
    pub fn language(language: &str) -> Self {
        Self {
            language: language.to_string(),
            ..Self::default()
        }
    }
}

/// Text normalizer over a classify/verbalize automaton pair.
#[derive(Debug, Clone)]
pub struct Normalizer {
    classify: VectorFst,
    verbalize: VectorFst,
}

impl Normalizer {
    /// Build both top-level grammars for `options.language`.
    pub fn new(engine: &Engine, options: &NormalizerOptions) -> Result<Self, GrammarError> {
        let data = LocaleData::load(&options.language, options.data_dir.as_deref())?;
        let (classify, verbalize) = rayon::join(
            || ClassifyFst::new(engine, &data, options.deterministic),
            || VerbalizeFst::new(engine, &data, options.deterministic),
        );
        Ok(Self::from_grammars(&classify?, &verbalize?))
    }

    pub fn from_grammars(classify: &ClassifyFst, verbalize: &VerbalizeFst) -> Self {
        Self {
            classify: classify.fst().clone(),
            verbalize: verbalize.fst().clone(),
        }
    }

    /// Load the automata written by [`export_grammars`](crate::export::export_grammars)
    /// into `dir`. Nothing is rebuilt.
    pub fn from_archive_dir(dir: impl AsRef<Path>) -> Result<Self, GrammarError> {
        let dir = dir.as_ref();
        let classify = load_rule(&dir.join(CLASSIFY_DIR).join(CLASSIFY_ARCHIVE), CLASSIFY_ENTRY)?;
        let verbalize = load_rule(
            &dir.join(VERBALIZE_DIR).join(VERBALIZE_ARCHIVE),
            VERBALIZE_ENTRY,
        )?;
        log::info!("loaded grammars from {}", dir.display());
        Ok(Self {
            classify,
            verbalize,
        })
    }

    pub fn classify_fst(&self) -> &VectorFst {
        &self.classify
    }

    pub fn verbalize_fst(&self) -> &VectorFst {
        &self.verbalize
    }

    /// Canonical tagging of `text`, or `None` if the classify grammar
    /// rejects it.
    pub fn tag(&self, text: &str) -> Option<Vec<Token>> {
        let tagged = self.classify.transduce(text)?;
        match parse_tokens(&tagged) {
            Ok(tokens) => Some(tokens),
            Err(err) => {
                log::warn!("classify output is not a token sequence: {err}");
                None
            }
        }
    }

    /// Spoken form of `text`.
    ///
    /// When the whole text has no tagging, each span is normalized on its
    /// own and spans without one are kept verbatim. Spans split at
    /// whitespace, except between two digits.
    pub fn normalize(&self, text: &str) -> String {
        let text = text.trim();
        if text.is_empty() {
            return String::new();
        }
        if let Some(spoken) = self.normalize_span(text) {
            return spoken;
        }
        let spans: Vec<String> = spans(text)
            .into_iter()
            .map(|span| {
                self.normalize_span(&span).unwrap_or_else(|| {
                    log::warn!("no normalization for {span:?}, keeping it verbatim");
                    span
                })
            })
            .collect();
        join_words(spans.iter().map(String::as_str))
    }

    /// Up to `n` distinct spoken forms of `text`, best first.
    ///
    /// Only readings within [`ALTERNATIVE_MARGIN`] of the best one count,
    /// so a grammar built in deterministic mode usually yields one.
    pub fn normalize_alternatives(&self, text: &str, n: usize) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() || n == 0 {
            return Vec::new();
        }
        let scored = match self.scored_readings(text, n) {
            Ok(scored) => scored,
            Err(err) => {
                log::warn!("no alternatives for {text:?}: {err}");
                return vec![self.normalize(text)];
            }
        };
        let limit = scored.first().map_or(0.0, |(best, _)| best + ALTERNATIVE_MARGIN);

        let mut seen = HashSet::new();
        let mut alternatives: Vec<String> = Vec::with_capacity(n);
        for (weight, spoken) in scored {
            if weight > limit {
                break;
            }
            if seen.insert(spoken.clone()) {
                alternatives.push(spoken);
                if alternatives.len() == n {
                    break;
                }
            }
        }
        if alternatives.is_empty() {
            alternatives.push(self.normalize(text));
        }
        alternatives
    }

    /// Every verbalized reading of the `n` best taggings, cheapest first.
    fn scored_readings(&self, text: &str, n: usize) -> Result<Vec<(f32, String)>, FstError> {
        let mut scored: Vec<(f32, String)> = Vec::new();
        for tagging in self.classify.outputs(text, n)? {
            for reading in self.verbalize.outputs(&tagging.output, n)? {
                let spoken = join_words(reading.output.split(' '));
                scored.push((tagging.weight.value() + reading.weight.value(), spoken));
            }
        }
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(scored)
    }

    fn normalize_span(&self, text: &str) -> Option<String> {
        let tokens = self.tag(text)?;
        let mut words = Vec::with_capacity(tokens.len());
        for token in &tokens {
            match self.verbalize.transduce(&token.to_string()) {
                Some(word) => words.push(word),
                None => {
                    log::debug!("no verbalization for {token}");
                    return None;
                }
            }
        }
        Some(join_words(words.iter().map(String::as_str)))
    }
}

fn load_rule(path: &Path, rule: &str) -> Result<VectorFst, GrammarError> {
    let archive = Archive::open(path)?;
    archive
        .get(rule)
        .cloned()
        .ok_or_else(|| GrammarError::MissingRule {
            path: path.to_path_buf(),
            rule: rule.to_string(),
        })
}

/// Whitespace-separated spans of `text`. Whitespace between two digits
/// does not split, so a digit run stays in one span.
fn spans(text: &str) -> Vec<String> {
    let mut spans: Vec<String> = Vec::new();
    for word in text.split_whitespace() {
        match spans.last_mut() {
            Some(last)
                if last.ends_with(|c: char| c.is_ascii_digit())
                    && word.starts_with(|c: char| c.is_ascii_digit()) =>
            {
                last.push(' ');
                last.push_str(word);
            }
            _ => spans.push(word.to_string()),
        }
    }
    spans
}

/// Join words with single spaces, attaching closing punctuation to the word
/// before it and opening punctuation to the word after it.
pub fn join_words<'a>(words: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    let mut glue_next = true;
    for word in words.into_iter().filter(|w| !w.is_empty()) {
        let closing = word.chars().all(|c| CLOSING.contains(&c));
        if !glue_next && !closing {
            out.push(' ');
        }
        out.push_str(word);
        glue_next = word.chars().all(|c| OPENING.contains(&c));
    }
    out
}
