// Tagged-token text format.
//
// Classify grammars emit a sequence of `tokens { ... }` blocks:
//
//     tokens { cardinal { negative: "true" integer: "5" } } tokens { name: "." }
//
// Each block holds fields. A field is either `name: "text"` or a nested group
// `name { field* }`. Quoted values never contain a double quote.

use std::fmt;

/// Value of a token field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// `name: "text"`
    Text(String),
    /// `name { ... }`
    Group(Vec<Field>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

impl Field {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Value::Text(value.into()),
        }
    }

    pub fn group(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            value: Value::Group(fields),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            Value::Text(s) => Some(s),
            Value::Group(_) => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::Text(s) => write!(f, "{}: \"{}\"", self.name, s),
            Value::Group(fields) => {
                write!(f, "{} {{", self.name)?;
                for field in fields {
                    write!(f, " {field}")?;
                }
                f.write_str(" }")
            }
        }
    }
}

/// One `tokens { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub fields: Vec<Field>,
}

impl Token {
    /// Semiotic class name of a wrapped token (`cardinal` for
    /// `tokens { cardinal { ... } }`), `None` for a bare `name:` token.
    pub fn class(&self) -> Option<&str> {
        match self.fields.first() {
            Some(Field {
                name,
                value: Value::Group(_),
            }) => Some(name),
            _ => None,
        }
    }

    /// First top-level or class-level text field called `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        for field in &self.fields {
            match &field.value {
                Value::Text(s) if field.name == name => return Some(s),
                Value::Group(inner) => {
                    if let Some(s) = inner.iter().find(|f| f.name == name).and_then(Field::as_text) {
                        return Some(s);
                    }
                }
                Value::Text(_) => {}
            }
        }
        None
    }

    /// The block contents without the `tokens { }` envelope, as consumed
    /// by a verbalizer: `cardinal { integer: "5" }`.
    pub fn body(&self) -> String {
        self.fields
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tokens {{ {} }}", self.body())
    }
}

/// Error from [`parse_tokens`], with the byte offset of the problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenParseError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),
    #[error("expected {expected} at byte {pos}")]
    Expected { expected: &'static str, pos: usize },
    #[error("expected `tokens` block at byte {0}")]
    NotATokenBlock(usize),
}

/// Parse a whitespace-separated sequence of `tokens { ... }` blocks.
pub fn parse_tokens(text: &str) -> Result<Vec<Token>, TokenParseError> {
    let mut parser = Parser {
        text,
        bytes: text.as_bytes(),
        pos: 0,
    };
    let mut tokens = Vec::new();
    parser.skip_space();
    while !parser.at_end() {
        let start = parser.pos;
        let name = parser.ident()?;
        if name != "tokens" {
            return Err(TokenParseError::NotATokenBlock(start));
        }
        parser.skip_space();
        parser.expect(b'{', "`{`")?;
        let fields = parser.fields()?;
        tokens.push(Token { fields });
        parser.skip_space();
    }
    Ok(tokens)
}

/// Parse the body of a single token (`cardinal { integer: "5" }`).
pub fn parse_fields(text: &str) -> Result<Vec<Field>, TokenParseError> {
    let mut parser = Parser {
        text,
        bytes: text.as_bytes(),
        pos: 0,
    };
    let mut fields = Vec::new();
    parser.skip_space();
    while !parser.at_end() {
        fields.push(parser.field()?);
        parser.skip_space();
    }
    Ok(fields)
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_space(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), TokenParseError> {
        match self.peek() {
            Some(b) if b == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(TokenParseError::Expected {
                expected,
                pos: self.pos,
            }),
            None => Err(TokenParseError::UnexpectedEnd(self.pos)),
        }
    }

    fn ident(&mut self) -> Result<&'a str, TokenParseError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.pos += 1;
        }
        if self.pos == start {
            return if self.at_end() {
                Err(TokenParseError::UnexpectedEnd(self.pos))
            } else {
                Err(TokenParseError::Expected {
                    expected: "field name",
                    pos: self.pos,
                })
            };
        }
        Ok(&self.text[start..self.pos])
    }

    /// Fields up to and including the closing `}`.
    fn fields(&mut self) -> Result<Vec<Field>, TokenParseError> {
        let mut fields = Vec::new();
        loop {
            self.skip_space();
            match self.peek() {
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(fields);
                }
                Some(_) => fields.push(self.field()?),
                None => return Err(TokenParseError::UnexpectedEnd(self.pos)),
            }
        }
    }

    fn field(&mut self) -> Result<Field, TokenParseError> {
        let name = self.ident()?.to_string();
        self.skip_space();
        match self.peek() {
            Some(b':') => {
                self.pos += 1;
                self.skip_space();
                self.expect(b'"', "`\"`")?;
                let start = self.pos;
                while self.peek().is_some_and(|b| b != b'"') {
                    self.pos += 1;
                }
                if self.at_end() {
                    return Err(TokenParseError::UnexpectedEnd(self.pos));
                }
                let value = self.text[start..self.pos].to_string();
                self.pos += 1;
                Ok(Field {
                    name,
                    value: Value::Text(value),
                })
            }
            Some(b'{') => {
                self.pos += 1;
                Ok(Field {
                    name,
                    value: Value::Group(self.fields()?),
                })
            }
            Some(_) => Err(TokenParseError::Expected {
                expected: "`:` or `{`",
                pos: self.pos,
            }),
            None => Err(TokenParseError::UnexpectedEnd(self.pos)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_wrapped_and_bare_tokens() {
        let text = r#"tokens { cardinal { negative: "true" integer: "five" } } tokens { name: "." }"#;
        let tokens = parse_tokens(text).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].class(), Some("cardinal"));
        assert_eq!(tokens[0].field("negative"), Some("true"));
        assert_eq!(tokens[0].field("integer"), Some("five"));
        assert_eq!(tokens[1].class(), None);
        assert_eq!(tokens[1].field("name"), Some("."));
    }

    #[test]
    fn display_matches_input() {
        let text = r#"tokens { money { integer_part: "five" currency: "dollars" } }"#;
        let tokens = parse_tokens(text).unwrap();
        assert_eq!(tokens[0].to_string(), text);
        assert_eq!(
            tokens[0].body(),
            r#"money { integer_part: "five" currency: "dollars" }"#
        );
    }

    #[test]
    fn nested_groups() {
        let text = r#"tokens { measure { cardinal { integer: "two" } units: "kilograms" } }"#;
        let tokens = parse_tokens(text).unwrap();
        let Value::Group(inner) = &tokens[0].fields[0].value else {
            panic!("expected group");
        };
        assert_eq!(inner[0].name, "cardinal");
        assert_eq!(tokens[0].field("units"), Some("kilograms"));
        assert_eq!(tokens[0].to_string(), text);
    }

    #[test]
    fn values_keep_inner_spaces_and_utf8() {
        let tokens = parse_tokens(r#"tokens { cardinal { integer: "тысяча один" } }"#).unwrap();
        assert_eq!(tokens[0].field("integer"), Some("тысяча один"));
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(parse_tokens("  ").unwrap().is_empty());
    }

    #[test]
    fn unterminated_value() {
        let err = parse_tokens(r#"tokens { name: "abc"#).unwrap_err();
        assert!(matches!(err, TokenParseError::UnexpectedEnd(_)));
    }

    #[test]
    fn wrong_block_name() {
        let err = parse_tokens(r#"token { name: "a" }"#).unwrap_err();
        assert_eq!(err, TokenParseError::NotATokenBlock(0));
    }

    #[test]
    fn missing_colon() {
        let err = parse_fields(r#"integer "5""#).unwrap_err();
        assert!(matches!(err, TokenParseError::Expected { pos: 8, .. }));
    }

    #[test]
    fn parse_single_body() {
        let fields = parse_fields(r#"roman { integer: "one" }"#).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].to_string(), r#"roman { integer: "one" }"#);
    }
}
