//! Recursive-descent parser over the token stream.
//!
//! One token of lookahead, no backtracking. Exactly one top-level value
//! is accepted; any trailing token other than end of input is rejected.
//! Duplicate object keys are accepted with last-write-wins semantics and
//! the first occurrence's position is kept.

use std::io::Read;

use indexmap::IndexMap;

use crate::error::{Error, JsonResult};
use crate::lexer::{Lexer, Token};
use crate::source::CharSource;
use crate::value::Value;

/// Parse a complete JSON text into a value tree.
pub fn parse(text: &str) -> JsonResult<Value> {
    Parser::new(Lexer::new(CharSource::new(text)))?.parse_document()
}

/// Parse a complete JSON text read from a byte stream.
///
/// The stream is buffered whole before parsing begins.
pub fn parse_reader(reader: impl Read) -> JsonResult<Value> {
    let source = CharSource::from_reader(reader)
        .map_err(|e| Error::parse(format!("failed to read input: {e}")))?;
    Parser::new(Lexer::new(source))?.parse_document()
}

/// Parser state: the lexer plus the single lookahead token.
struct Parser {
    lexer: Lexer,
    lookahead: Token,
}

impl Parser {
    fn new(mut lexer: Lexer) -> JsonResult<Self> {
        let lookahead = lexer.next_token()?;
        Ok(Self { lexer, lookahead })
    }

    /// Return the lookahead token and refill it.
    fn advance(&mut self) -> JsonResult<Token> {
        let token = std::mem::replace(&mut self.lookahead, Token::Eof);
        if token != Token::Eof {
            self.lookahead = self.lexer.next_token()?;
        }
        Ok(token)
    }

    /// Parse one value and require end of input after it.
    fn parse_document(mut self) -> JsonResult<Value> {
        let value = self.parse_value()?;
        match self.lookahead {
            Token::Eof => Ok(value),
            ref token => Err(Error::parse(format!(
                "unexpected trailing content after JSON value: {token:?}"
            ))),
        }
    }

    fn parse_value(&mut self) -> JsonResult<Value> {
        match self.advance()? {
            Token::Null => Ok(Value::Null),
            Token::True => Ok(Value::Bool(true)),
            Token::False => Ok(Value::Bool(false)),
            Token::String(s) => Ok(Value::String(s)),
            Token::Number(n) => Ok(Value::Number(n)),
            Token::LeftBracket => self.parse_array(),
            Token::LeftBrace => self.parse_object(),
            Token::Eof => Err(Error::parse("unexpected end of input, expected a value")),
            token => Err(Error::parse(format!(
                "unexpected token at character {}: {token:?}",
                self.lexer.position()
            ))),
        }
    }

    /// Parse the elements after an opening bracket.
    fn parse_array(&mut self) -> JsonResult<Value> {
        let mut items = Vec::new();

        if self.lookahead == Token::RightBracket {
            self.advance()?;
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value()?);
            match self.advance()? {
                Token::Comma => {}
                Token::RightBracket => return Ok(Value::Array(items)),
                token => {
                    return Err(Error::parse(format!(
                        "expected ',' or ']' in array, found {token:?}"
                    )))
                }
            }
        }
    }

    /// Parse the members after an opening brace.
    fn parse_object(&mut self) -> JsonResult<Value> {
        let mut members = IndexMap::new();

        if self.lookahead == Token::RightBrace {
            self.advance()?;
            return Ok(Value::Object(members));
        }

        loop {
            let key = match self.advance()? {
                Token::String(key) => key,
                token => {
                    return Err(Error::parse(format!(
                        "expected string key in object, found {token:?}"
                    )))
                }
            };
            match self.advance()? {
                Token::Colon => {}
                token => {
                    return Err(Error::parse(format!(
                        "expected ':' after object key, found {token:?}"
                    )))
                }
            }
            let value = self.parse_value()?;
            // Re-keying an existing member overwrites the value in place,
            // keeping the position of the first occurrence.
            members.insert(key, value);

            match self.advance()? {
                Token::Comma => {}
                Token::RightBrace => return Ok(Value::Object(members)),
                token => {
                    return Err(Error::parse(format!(
                        "expected ',' or '}}' in object, found {token:?}"
                    )))
                }
            }
        }
    }
}
