// Locale tables: typed JSON documents, embedded or loaded from a directory.
//
// Lookup order for `<lang>/<table>.json`: the explicit data directory, then
// `$TEXTNORM_DATA_PATH`, then the tables compiled into the crate.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::GrammarError;

/// Environment variable naming an override data directory.
pub const DATA_PATH_ENV: &str = "TEXTNORM_DATA_PATH";

/// Languages with compiled-in tables.
pub const LANGUAGES: &[&str] = &["en", "ru"];

const EMBEDDED: &[(&str, &str, &str)] = &[
    ("en", "numbers", include_str!("../data/en/numbers.json")),
    ("en", "formats", include_str!("../data/en/formats.json")),
    ("en", "ordinals", include_str!("../data/en/ordinals.json")),
    ("en", "money", include_str!("../data/en/money.json")),
    ("en", "measure", include_str!("../data/en/measure.json")),
    ("en", "date", include_str!("../data/en/date.json")),
    ("en", "time", include_str!("../data/en/time.json")),
    ("en", "electronic", include_str!("../data/en/electronic.json")),
    ("en", "telephone", include_str!("../data/en/telephone.json")),
    ("en", "whitelist", include_str!("../data/en/whitelist.json")),
    ("en", "fraction", include_str!("../data/en/fraction.json")),
    ("ru", "numbers", include_str!("../data/ru/numbers.json")),
    ("ru", "formats", include_str!("../data/ru/formats.json")),
];

/// One power-of-1000 magnitude word with its plural forms.
#[derive(Debug, Clone, Deserialize)]
pub struct Magnitude {
    /// Power of ten: 3, 6 or 9.
    pub power: u32,
    /// Form after a group ending in 1 (not 11).
    pub one: String,
    /// Form after a group ending in 2-4 (not 12-14).
    pub few: String,
    /// Every other form.
    pub many: String,
    /// Groups before this word use feminine unit forms.
    #[serde(default)]
    pub feminine: bool,
    /// A leading group of exactly 1 is rendered as the bare word.
    #[serde(default)]
    pub omit_leading_one: bool,
}

/// Cardinal number names for one language.
#[derive(Debug, Clone, Deserialize)]
pub struct NumberNameTable {
    pub zero: String,
    /// Words for 1..=9.
    pub units: Vec<String>,
    /// Feminine overrides keyed by digit (`"1"`, `"2"`).
    #[serde(default)]
    pub feminine_units: BTreeMap<String, String>,
    /// Words for 10..=19.
    pub teens: Vec<String>,
    /// Words for 20, 30, ..., 90.
    pub tens: Vec<String>,
    /// Words for 100, 200, ..., 900.
    pub hundreds: Vec<String>,
    pub magnitudes: Vec<Magnitude>,
    pub minus: String,
    /// Decimal point word, if the language has a decimal grammar.
    #[serde(default)]
    pub point: Option<String>,
}

impl NumberNameTable {
    /// Check entry counts, word values and magnitude powers.
    ///
    /// Magnitudes must cover 10^3 upwards without gaps.
    pub fn validate(&self, locale: &str) -> Result<(), GrammarError> {
        let counts = [
            ("units", self.units.len(), 9),
            ("teens", self.teens.len(), 10),
            ("tens", self.tens.len(), 8),
            ("hundreds", self.hundreds.len(), 9),
        ];
        for (field, actual, expected) in counts {
            if actual != expected {
                return Err(GrammarError::config(
                    locale,
                    "numbers",
                    format!("`{field}` has {actual} entries, expected {expected}"),
                ));
            }
        }
        let words = std::iter::once(&self.zero)
            .chain(&self.units)
            .chain(&self.teens)
            .chain(&self.tens)
            .chain(&self.hundreds)
            .chain(self.feminine_units.values())
            .chain(std::iter::once(&self.minus))
            .chain(&self.point);
        for word in words {
            check_value(locale, "numbers", word)?;
        }
        for key in self.feminine_units.keys() {
            let is_digit = key.len() == 1 && key.as_bytes()[0].is_ascii_digit() && key != "0";
            if !is_digit {
                return Err(GrammarError::config(
                    locale,
                    "numbers",
                    format!("feminine unit key {key:?} is not a digit 1-9"),
                ));
            }
        }
        let mut powers: Vec<u32> = self.magnitudes.iter().map(|m| m.power).collect();
        powers.sort_unstable();
        let contiguous = powers.iter().zip(1..).all(|(&p, i)| p == 3 * i);
        if !contiguous || powers.len() > 3 {
            return Err(GrammarError::config(
                locale,
                "numbers",
                format!("magnitude powers {powers:?} must be 3, 6, 9 without gaps"),
            ));
        }
        for m in &self.magnitudes {
            for word in [&m.one, &m.few, &m.many] {
                check_value(locale, "numbers", word)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rewrite {
    pub from: String,
    pub to: String,
}

/// Alternative spellings and digit-group separators.
#[derive(Debug, Clone, Deserialize)]
pub struct AlternativeFormats {
    pub separators: Vec<String>,
    #[serde(default)]
    pub rewrites: Vec<Rewrite>,
}

impl AlternativeFormats {
    /// Separators as characters (validated to be single characters at load).
    pub fn separator_chars(&self) -> Vec<char> {
        self.separators
            .iter()
            .filter_map(|s| s.chars().next())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrdinalTable {
    /// Last-word replacements, e.g. `one -> first`.
    pub irregular: BTreeMap<String, String>,
    /// Replacement for a final `y` of words ending in `ty`.
    pub ty_suffix: String,
    pub default_suffix: String,
    /// Written suffix after a final digit, e.g. `1 -> st`.
    pub numeral_suffixes: BTreeMap<String, String>,
    pub default_numeral_suffix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Currency {
    pub symbol: String,
    /// `[singular, plural]`
    pub major: [String; 2],
    #[serde(default)]
    pub minor: Option<[String; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoneyTable {
    pub currencies: Vec<Currency>,
    pub and: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeasureTable {
    /// Unit abbreviation -> `[singular, plural]`.
    pub units: BTreeMap<String, [String; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Month {
    pub name: String,
    #[serde(default)]
    pub abbr: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateTable {
    pub months: Vec<Month>,
    /// Reading of a zero tens digit in years: 1905 -> "nineteen oh five".
    pub oh: String,
    /// Reading of a zero year half: 1900 -> "nineteen hundred".
    pub hundred: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeTable {
    pub suffixes: BTreeMap<String, String>,
    pub oclock: String,
    pub oh: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElectronicTable {
    pub symbols: BTreeMap<String, String>,
    pub domains: Vec<String>,
    pub protocols: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelephoneTable {
    /// Reading of a leading `+`.
    pub plus: String,
    /// Emitted between digit groups.
    pub group_separator: String,
}

/// Fraction readings. Denominators are named by their ordinal unless
/// listed here.
#[derive(Debug, Clone, Deserialize)]
pub struct FractionTable {
    /// Spelled denominator -> `[singular, plural]`, e.g. `two -> half`.
    #[serde(default)]
    pub denominators: BTreeMap<String, [String; 2]>,
    /// Appended to an ordinal denominator after a numerator other than one.
    pub plural_suffix: String,
    /// Joins a whole part to the fraction: "two and one half".
    pub and: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhitelistTable {
    pub entries: BTreeMap<String, String>,
}

/// Every table of one locale. Class tables are optional; a class is built
/// only when its table exists.
#[derive(Debug, Clone)]
pub struct LocaleData {
    pub language: String,
    pub numbers: NumberNameTable,
    pub formats: AlternativeFormats,
    pub ordinals: Option<OrdinalTable>,
    pub money: Option<MoneyTable>,
    pub measure: Option<MeasureTable>,
    pub date: Option<DateTable>,
    pub time: Option<TimeTable>,
    pub electronic: Option<ElectronicTable>,
    pub telephone: Option<TelephoneTable>,
    pub whitelist: Option<WhitelistTable>,
    pub fraction: Option<FractionTable>,
}

impl LocaleData {
    /// Load and validate all tables of `language`.
    pub fn load(language: &str, data_dir: Option<&Path>) -> Result<Self, GrammarError> {
        let loader = Loader {
            language,
            dir: data_dir
                .map(Path::to_path_buf)
                .or_else(|| env::var_os(DATA_PATH_ENV).map(PathBuf::from)),
        };
        let data = LocaleData {
            language: language.to_string(),
            numbers: loader.required("numbers")?,
            formats: loader.required("formats")?,
            ordinals: loader.optional("ordinals")?,
            money: loader.optional("money")?,
            measure: loader.optional("measure")?,
            date: loader.optional("date")?,
            time: loader.optional("time")?,
            electronic: loader.optional("electronic")?,
            telephone: loader.optional("telephone")?,
            whitelist: loader.optional("whitelist")?,
            fraction: loader.optional("fraction")?,
        };
        data.validate()?;
        log::debug!("loaded locale data for {language:?}");
        Ok(data)
    }

    fn validate(&self) -> Result<(), GrammarError> {
        let lang = self.language.as_str();
        self.numbers.validate(lang)?;

        if self.formats.separators.is_empty() {
            return Err(GrammarError::config(lang, "formats", "no separators"));
        }
        for sep in &self.formats.separators {
            let mut chars = sep.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if !c.is_ascii_digit() && c != '"' => {}
                _ => {
                    return Err(GrammarError::config(
                        lang,
                        "formats",
                        format!("separator {sep:?} must be one non-digit character"),
                    ));
                }
            }
        }
        for rewrite in &self.formats.rewrites {
            check_value(lang, "formats", &rewrite.from)?;
            check_value(lang, "formats", &rewrite.to)?;
        }

        if let Some(money) = &self.money {
            for c in &money.currencies {
                if c.symbol.is_empty() {
                    return Err(GrammarError::config(lang, "money", "empty currency symbol"));
                }
            }
        }
        if let Some(date) = &self.date {
            if date.months.len() != 12 {
                return Err(GrammarError::config(
                    lang,
                    "date",
                    format!("{} months listed, expected 12", date.months.len()),
                ));
            }
        }
        if let Some(telephone) = &self.telephone {
            check_value(lang, "telephone", &telephone.plus)?;
            check_value(lang, "telephone", &telephone.group_separator)?;
        }
        if let Some(electronic) = &self.electronic {
            for (symbol, word) in &electronic.symbols {
                if symbol.chars().count() != 1 || symbol == "\"" {
                    return Err(GrammarError::config(
                        lang,
                        "electronic",
                        format!("symbol {symbol:?} must be one character other than a quote"),
                    ));
                }
                check_value(lang, "electronic", word)?;
            }
        }
        if let Some(whitelist) = &self.whitelist {
            for (from, to) in &whitelist.entries {
                if from.is_empty() || from.chars().any(char::is_whitespace) {
                    return Err(GrammarError::config(
                        lang,
                        "whitelist",
                        format!("entry {from:?} must be a single non-empty word"),
                    ));
                }
                check_value(lang, "whitelist", to)?;
            }
        }
        if let Some(fraction) = &self.fraction {
            if self.ordinals.is_none() {
                return Err(GrammarError::config(
                    lang,
                    "fraction",
                    "fractions need an ordinals table",
                ));
            }
            check_value(lang, "fraction", &fraction.plural_suffix)?;
            check_value(lang, "fraction", &fraction.and)?;
            for (denominator, forms) in &fraction.denominators {
                check_value(lang, "fraction", denominator)?;
                for word in forms {
                    check_value(lang, "fraction", word)?;
                }
            }
        }
        Ok(())
    }
}

/// Rendered words end up inside quoted token fields.
fn check_value(lang: &str, table: &str, word: &str) -> Result<(), GrammarError> {
    if word.is_empty() || word.contains('"') {
        return Err(GrammarError::config(
            lang,
            table,
            format!("value {word:?} is empty or contains a double quote"),
        ));
    }
    Ok(())
}

struct Loader<'a> {
    language: &'a str,
    dir: Option<PathBuf>,
}

impl Loader<'_> {
    fn source(&self, table: &str) -> Result<Option<String>, GrammarError> {
        let embedded = EMBEDDED
            .iter()
            .find(|(lang, name, _)| *lang == self.language && *name == table)
            .map(|(_, _, text)| (*text).to_string());
        if let Some(dir) = &self.dir {
            let path = dir.join(self.language).join(format!("{table}.json"));
            if path.is_file() {
                log::debug!("reading {}", path.display());
                return fs::read_to_string(&path).map(Some).map_err(|e| {
                    GrammarError::config(self.language, table, format!("{}: {e}", path.display()))
                });
            }
            if embedded.is_some() {
                log::warn!(
                    "{} not found, using the built-in {}/{table} table",
                    path.display(),
                    self.language
                );
            }
        }
        Ok(embedded)
    }

    fn parse<T: DeserializeOwned>(&self, table: &str, text: &str) -> Result<T, GrammarError> {
        serde_json::from_str(text)
            .map_err(|e| GrammarError::config(self.language, table, e.to_string()))
    }

    fn required<T: DeserializeOwned>(&self, table: &str) -> Result<T, GrammarError> {
        match self.source(table)? {
            Some(text) => self.parse(table, &text),
            None => Err(GrammarError::config(
                self.language,
                table,
                "no data for this locale",
            )),
        }
    }

    fn optional<T: DeserializeOwned>(&self, table: &str) -> Result<Option<T>, GrammarError> {
        self.source(table)?
            .map(|text| self.parse(table, &text))
            .transpose()
    }
}
