// Shared enums: SemioticClass, GrammarKind

use std::fmt;
use std::str::FromStr;

/// Category of normalizable entity recognised by a tagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SemioticClass {
    Cardinal,
    Ordinal,
    Decimal,
    Fraction,
    Money,
    Measure,
    Date,
    Time,
    Telephone,
    Electronic,
    Roman,
    Abbreviation,
    Whitelist,
    Word,
    Punctuation,
}

impl SemioticClass {
    /// All classes, in the order grammars list them.
    pub const ALL: [SemioticClass; 15] = [
        SemioticClass::Cardinal,
        SemioticClass::Ordinal,
        SemioticClass::Decimal,
        SemioticClass::Fraction,
        SemioticClass::Money,
        SemioticClass::Measure,
        SemioticClass::Date,
        SemioticClass::Time,
        SemioticClass::Telephone,
        SemioticClass::Electronic,
        SemioticClass::Roman,
        SemioticClass::Abbreviation,
        SemioticClass::Whitelist,
        SemioticClass::Word,
        SemioticClass::Punctuation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SemioticClass::Cardinal => "cardinal",
            SemioticClass::Ordinal => "ordinal",
            SemioticClass::Decimal => "decimal",
            SemioticClass::Fraction => "fraction",
            SemioticClass::Money => "money",
            SemioticClass::Measure => "measure",
            SemioticClass::Date => "date",
            SemioticClass::Time => "time",
            SemioticClass::Telephone => "telephone",
            SemioticClass::Electronic => "electronic",
            SemioticClass::Roman => "roman",
            SemioticClass::Abbreviation => "abbreviation",
            SemioticClass::Whitelist => "whitelist",
            SemioticClass::Word => "word",
            SemioticClass::Punctuation => "punctuation",
        }
    }

    /// Whether tokens of this class carry a `class { ... }` wrapper.
    ///
    /// Whitelist, word and punctuation tokens are a bare `name: "..."` field.
    pub fn is_wrapped(self) -> bool {
        !matches!(
            self,
            SemioticClass::Whitelist | SemioticClass::Word | SemioticClass::Punctuation
        )
    }
}

impl fmt::Display for SemioticClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown enum name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {what}: {name:?}")]
pub struct UnknownName {
    pub what: &'static str,
    pub name: String,
}

impl FromStr for SemioticClass {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemioticClass::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownName {
                what: "semiotic class",
                name: s.to_string(),
            })
    }
}

/// Role of a grammar: tagging raw text or rendering tagged tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarKind {
    /// Raw text -> tagged tokens.
    Classify,
    /// Tagged tokens -> spoken-form text.
    Verbalize,
}

impl GrammarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GrammarKind::Classify => "classify",
            GrammarKind::Verbalize => "verbalize",
        }
    }
}

impl fmt::Display for GrammarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrammarKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classify" => Ok(GrammarKind::Classify),
            "verbalize" => Ok(GrammarKind::Verbalize),
            _ => Err(UnknownName {
                what: "grammar kind",
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_parse_back() {
        for class in SemioticClass::ALL {
            assert_eq!(class.as_str().parse::<SemioticClass>(), Ok(class));
        }
    }

    #[test]
    fn unknown_class_is_error() {
        let err = "emoji".parse::<SemioticClass>().unwrap_err();
        assert_eq!(err.name, "emoji");
        assert_eq!(err.to_string(), "unknown semiotic class: \"emoji\"");
    }

    #[test]
    fn bare_classes() {
        assert!(SemioticClass::Cardinal.is_wrapped());
        assert!(!SemioticClass::Word.is_wrapped());
        assert!(!SemioticClass::Punctuation.is_wrapped());
    }

    #[test]
    fn kind_display() {
        assert_eq!(GrammarKind::Classify.to_string(), "classify");
        assert_eq!("verbalize".parse::<GrammarKind>(), Ok(GrammarKind::Verbalize));
        assert!("render".parse::<GrammarKind>().is_err());
    }
}
