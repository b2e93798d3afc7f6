//! Buffered bidirectional character cursor over decoded input text.
//!
//! The parser consumes its input through this cursor rather than through a
//! streaming reader: the entire input is decoded into memory up front, so
//! memory use is bounded by input size and the lexer may step backwards
//! during lookahead (comment detection needs one character of retreat).

use std::io::{self, Read};

/// A random-access cursor over a fully buffered sequence of characters.
///
/// The cursor index addresses the character returned by [`peek`]; it may
/// sit one past the last character, where [`peek`] returns `None`.
///
/// [`peek`]: CharSource::peek
#[derive(Debug, Clone)]
pub struct CharSource {
    buffer: Vec<char>,
    index: usize,
}

impl CharSource {
    /// Buffer the given text.
    pub fn new(text: &str) -> Self {
        Self {
            buffer: text.chars().collect(),
            index: 0,
        }
    }

    /// Eagerly read a UTF-8 byte stream to exhaustion and buffer it.
    ///
    /// The reader is consumed whole before this returns; no further I/O
    /// happens during parsing.
    pub fn from_reader(mut reader: impl Read) -> io::Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::new(&text))
    }

    /// Number of buffered characters.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True when the input was empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Current cursor index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The character under the cursor, without advancing.
    pub fn peek(&self) -> Option<char> {
        self.buffer.get(self.index).copied()
    }

    /// Return the character under the cursor and advance past it.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.index += 1;
        }
        c
    }

    /// Step the cursor back one character and return what it now covers.
    ///
    /// At the beginning of input this is a no-op returning the first
    /// character (or `None` on empty input).
    pub fn retreat(&mut self) -> Option<char> {
        if self.index > 0 {
            self.index -= 1;
        }
        self.peek()
    }

    /// Rewind to the beginning and return the first character.
    pub fn first(&mut self) -> Option<char> {
        self.index = 0;
        self.peek()
    }

    /// Position the cursor at an arbitrary index.
    ///
    /// Indexes past the end are clamped to the one-past-end position.
    pub fn set_index(&mut self, index: usize) -> Option<char> {
        self.index = index.min(self.buffer.len());
        self.peek()
    }
}

impl From<&str> for CharSource {
    fn from(text: &str) -> Self {
        CharSource::new(text)
    }
}

impl From<String> for CharSource {
    fn from(text: String) -> Self {
        CharSource::new(&text)
    }
}
