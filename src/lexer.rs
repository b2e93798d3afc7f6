//! Tokenizer over a buffered character source.
//!
//! Produces the token stream the recursive-descent parser consumes.
//! Beyond strict JSON, whitespace skipping also consumes C-style
//! `/* ... */` block comments and `//` line comments, a deliberate
//! permissive extension. Keywords are matched character by character.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::error::{Error, JsonResult};
use crate::number::Number;
use crate::source::CharSource;

/// Token classes produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Left brace `{`
    LeftBrace,
    /// Right brace `}`
    RightBrace,
    /// Left bracket `[`
    LeftBracket,
    /// Right bracket `]`
    RightBracket,
    /// Colon `:`
    Colon,
    /// Comma `,`
    Comma,
    /// Null literal
    Null,
    /// True literal
    True,
    /// False literal
    False,
    /// String value, escapes decoded
    String(String),
    /// Number value, already classified by the digit-count heuristic
    Number(Number),
    /// End of input
    Eof,
}

/// Tokenizer holding the cursor state for a single input.
///
/// Not reentrant: one lexer per parse, driven forward to exhaustion.
pub struct Lexer {
    source: CharSource,
}

impl Lexer {
    /// Create a lexer over the given source.
    pub fn new(source: CharSource) -> Self {
        Self { source }
    }

    /// Current cursor position, for error reporting.
    pub fn position(&self) -> usize {
        self.source.index()
    }

    /// Skip whitespace plus block and line comments.
    ///
    /// A `/` that does not open a comment is left in place for the token
    /// dispatch to reject.
    fn skip_whitespace(&mut self) -> JsonResult<()> {
        while let Some(c) = self.source.peek() {
            if c.is_whitespace() {
                self.source.bump();
            } else if c == '/' {
                self.source.bump();
                match self.source.peek() {
                    Some('*') => {
                        self.source.bump();
                        self.skip_block_comment()?;
                    }
                    Some('/') => {
                        while let Some(c) = self.source.bump() {
                            if c == '\n' {
                                break;
                            }
                        }
                    }
                    _ => {
                        self.source.retreat();
                        break;
                    }
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Consume up to and including the closing `*/`.
    fn skip_block_comment(&mut self) -> JsonResult<()> {
        loop {
            match self.source.bump() {
                None => {
                    return Err(Error::parse(
                        "unterminated comment while parsing JSON text",
                    ))
                }
                Some('*') => {
                    if self.source.peek() == Some('/') {
                        self.source.bump();
                        return Ok(());
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// Read the next token from the input.
    pub fn next_token(&mut self) -> JsonResult<Token> {
        self.skip_whitespace()?;

        match self.source.peek() {
            None => Ok(Token::Eof),
            Some('{') => {
                self.source.bump();
                Ok(Token::LeftBrace)
            }
            Some('}') => {
                self.source.bump();
                Ok(Token::RightBrace)
            }
            Some('[') => {
                self.source.bump();
                Ok(Token::LeftBracket)
            }
            Some(']') => {
                self.source.bump();
                Ok(Token::RightBracket)
            }
            Some(':') => {
                self.source.bump();
                Ok(Token::Colon)
            }
            Some(',') => {
                self.source.bump();
                Ok(Token::Comma)
            }
            Some('"') => self.read_string(),
            Some('-') | Some('0'..='9') => self.read_number(),
            Some('t') => {
                self.expect_keyword("true")?;
                Ok(Token::True)
            }
            Some('f') => {
                self.expect_keyword("false")?;
                Ok(Token::False)
            }
            Some('n') => {
                self.expect_keyword("null")?;
                Ok(Token::Null)
            }
            Some(c) => Err(Error::parse(format!(
                "invalid JSON token at character {}: {c:?}",
                self.source.index()
            ))),
        }
    }

    /// Match a keyword character by character.
    fn expect_keyword(&mut self, keyword: &'static str) -> JsonResult<()> {
        for expected in keyword.chars() {
            if self.source.bump() != Some(expected) {
                return Err(Error::parse(format!(
                    "invalid JSON token: expected '{keyword}' keyword"
                )));
            }
        }
        Ok(())
    }

    /// Read a string token, decoding escape sequences.
    fn read_string(&mut self) -> JsonResult<Token> {
        // Consume the opening quote.
        self.source.bump();

        let mut result = String::new();
        loop {
            match self.source.bump() {
                None => {
                    return Err(Error::parse(format!(
                        "unterminated string at character {}",
                        self.source.index()
                    )))
                }
                Some('"') => break,
                Some('\\') => result.push(self.read_escape()?),
                Some(c) => result.push(c),
            }
        }
        Ok(Token::String(result))
    }

    /// Decode the escape sequence after a backslash.
    fn read_escape(&mut self) -> JsonResult<char> {
        match self.source.bump() {
            None => Err(Error::parse("unterminated escape at end of input")),
            Some('"') => Ok('"'),
            Some('\\') => Ok('\\'),
            Some('/') => Ok('/'),
            Some('b') => Ok('\x08'),
            Some('f') => Ok('\x0C'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('u') => self.read_unicode_escape(),
            Some(c) => Err(Error::parse(format!("invalid escape character {c:?}"))),
        }
    }

    /// Decode a `\uXXXX` escape, pairing surrogates where required.
    fn read_unicode_escape(&mut self) -> JsonResult<char> {
        let unit = self.read_hex4()?;

        // A high surrogate must be completed by a \uXXXX low surrogate.
        if (0xD800..=0xDBFF).contains(&unit) {
            if self.source.bump() != Some('\\') || self.source.bump() != Some('u') {
                return Err(Error::parse("unpaired high surrogate in \\u escape"));
            }
            let low = self.read_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(Error::parse("invalid low surrogate in \\u escape"));
            }
            let combined = 0x10000 + ((unit as u32 - 0xD800) << 10) + (low as u32 - 0xDC00);
            return char::from_u32(combined)
                .ok_or_else(|| Error::parse("invalid surrogate pair in \\u escape"));
        }

        if (0xDC00..=0xDFFF).contains(&unit) {
            return Err(Error::parse("unpaired low surrogate in \\u escape"));
        }

        char::from_u32(unit as u32).ok_or_else(|| Error::parse("invalid \\u escape"))
    }

    /// Read exactly four hex digits, shifting 4 bits per digit.
    ///
    /// A non-hex character here is rejected rather than silently skipped.
    fn read_hex4(&mut self) -> JsonResult<u16> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let digit = match self.source.bump() {
                Some(c @ '0'..='9') => c as u16 - '0' as u16,
                Some(c @ 'a'..='f') => c as u16 - 'a' as u16 + 10,
                Some(c @ 'A'..='F') => c as u16 - 'A' as u16 + 10,
                Some(c) => {
                    return Err(Error::parse(format!(
                        "invalid hex digit {c:?} in \\u escape"
                    )))
                }
                None => return Err(Error::parse("unterminated \\u escape")),
            };
            value = (value << 4) | digit;
        }
        Ok(value)
    }

    /// Read a number token and classify its representation.
    ///
    /// The digit count covers the integer-part and fraction digit runs
    /// only; exponent digits are not counted. A fractional literal
    /// becomes `f64` under 17 digits and an arbitrary-precision decimal
    /// at 17 or more; an integral literal becomes `i64` under 20 digits
    /// and an arbitrary-precision integer at 20 or more. The count is a
    /// heuristic, not a range check: a 19-digit literal beyond the i64
    /// range is a parse failure, by long-standing compatibility.
    fn read_number(&mut self) -> JsonResult<Token> {
        let mut buf = String::new();
        let mut digits = 0usize;
        let mut fractional = false;

        if self.source.peek() == Some('-') {
            buf.push('-');
            self.source.bump();
        }
        digits += self.read_digits(&mut buf);

        if self.source.peek() == Some('.') {
            buf.push('.');
            self.source.bump();
            digits += self.read_digits(&mut buf);
            fractional = true;
        }

        if let Some('e') | Some('E') = self.source.peek() {
            buf.push(self.source.bump().unwrap_or('e'));
            if let Some(sign @ ('+' | '-')) = self.source.peek() {
                buf.push(sign);
                self.source.bump();
            }
            self.read_digits(&mut buf);
            fractional = true;
        }

        let number = if fractional {
            if digits < 17 {
                Number::Double(
                    f64::from_str(&buf)
                        .map_err(|_| Error::parse(format!("invalid number literal {buf:?}")))?,
                )
            } else {
                Number::BigDec(
                    BigDecimal::from_str(&buf)
                        .map_err(|_| Error::parse(format!("invalid number literal {buf:?}")))?,
                )
            }
        } else if digits < 20 {
            Number::Long(
                i64::from_str(&buf)
                    .map_err(|_| Error::parse(format!("invalid number literal {buf:?}")))?,
            )
        } else {
            Number::BigInt(
                BigInt::from_str(&buf)
                    .map_err(|_| Error::parse(format!("invalid number literal {buf:?}")))?,
            )
        };
        Ok(Token::Number(number))
    }

    /// Append the run of decimal digits under the cursor, returning how
    /// many were consumed.
    fn read_digits(&mut self, buf: &mut String) -> usize {
        let mut count = 0;
        while let Some(c @ '0'..='9') = self.source.peek() {
            buf.push(c);
            self.source.bump();
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> JsonResult<Vec<Token>> {
        let mut lexer = Lexer::new(CharSource::new(input));
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            if token == Token::Eof {
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }

    #[test]
    fn test_structural_tokens() {
        let tokens = lex("{}[],:").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LeftBrace,
                Token::RightBrace,
                Token::LeftBracket,
                Token::RightBracket,
                Token::Comma,
                Token::Colon,
            ]
        );
    }

    #[test]
    fn test_literals() {
        let tokens = lex("null true false").unwrap();
        assert_eq!(tokens, vec![Token::Null, Token::True, Token::False]);
    }

    #[test]
    fn test_keyword_mismatch_fails() {
        assert!(lex("nul").is_err());
        assert!(lex("tru e").is_err());
        assert!(lex("falze").is_err());
    }

    #[test]
    fn test_string_escapes() {
        let tokens = lex(r#""a\nb\tc\"d\\e\/f""#).unwrap();
        assert_eq!(
            tokens,
            vec![Token::String("a\nb\tc\"d\\e/f".to_string())]
        );
    }

    #[test]
    fn test_unicode_escape() {
        let tokens = lex("\"\\u0041\\u00e9\"").unwrap();
        assert_eq!(tokens, vec![Token::String("A\u{e9}".to_string())]);
    }

    #[test]
    fn test_surrogate_pair() {
        let tokens = lex("\"\\ud83d\\ude00\"").unwrap();
        assert_eq!(tokens, vec![Token::String("\u{1F600}".to_string())]);
    }

    #[test]
    fn test_bad_hex_digit_rejected() {
        assert!(lex(r#""\u00zz""#).is_err());
    }

    #[test]
    fn test_unpaired_surrogate_rejected() {
        assert!(lex(r#""\ud800""#).is_err());
    }

    #[test]
    fn test_unterminated_string() {
        assert!(lex(r#""abc"#).is_err());
    }

    #[test]
    fn test_comments_skipped() {
        let tokens = lex("/* header */ true // trailing\n false").unwrap();
        assert_eq!(tokens, vec![Token::True, Token::False]);
    }

    #[test]
    fn test_unterminated_comment() {
        assert!(lex("/* never closed").is_err());
    }

    #[test]
    fn test_stray_slash_rejected() {
        assert!(lex("/x").is_err());
    }

    #[test]
    fn test_number_classification_long() {
        let tokens = lex("42 -123 0").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(Number::Long(42)),
                Token::Number(Number::Long(-123)),
                Token::Number(Number::Long(0)),
            ]
        );
    }

    #[test]
    fn test_number_classification_double() {
        let tokens = lex("1.5 1.5e10 2E-3").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(Number::Double(1.5)),
                Token::Number(Number::Double(1.5e10)),
                Token::Number(Number::Double(2e-3)),
            ]
        );
    }

    #[test]
    fn test_number_classification_big_integer() {
        // 25 digits: classified as arbitrary precision, not truncated
        let tokens = lex("1234567890123456789012345").unwrap();
        match &tokens[0] {
            Token::Number(Number::BigInt(v)) => {
                assert_eq!(v.to_string(), "1234567890123456789012345");
            }
            other => panic!("expected BigInt token, got {other:?}"),
        }
    }

    #[test]
    fn test_number_classification_big_decimal() {
        // 17 significand digits with a fraction: arbitrary-precision decimal
        let tokens = lex("12345678901234567.8").unwrap();
        assert!(matches!(
            &tokens[0],
            Token::Number(Number::BigDec(_))
        ));
    }

    #[test]
    fn test_exponent_digits_not_counted() {
        // 16 significand digits stay f64 regardless of exponent width
        let tokens = lex("1234567890.123456e123").unwrap();
        assert!(matches!(&tokens[0], Token::Number(Number::Double(_))));
    }

    #[test]
    fn test_nineteen_digit_overflow_is_parse_error() {
        // 19 digits beyond i64::MAX: the heuristic routes this to the
        // fixed-width parse, which fails.
        assert!(lex("9999999999999999999").is_err());
        // 19 digits within range parse fine
        assert_eq!(
            lex("9223372036854775807").unwrap(),
            vec![Token::Number(Number::Long(i64::MAX))]
        );
    }

    #[test]
    fn test_bare_minus_rejected() {
        assert!(lex("-").is_err());
    }
}
