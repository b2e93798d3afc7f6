//! json-tree - parse, navigate, and convert JSON value trees.
//!
//! This crate parses JSON text into an in-memory tree of [`Value`]s,
//! offers a navigation and mutation surface over that tree, renders it
//! back to indented text, and converts between tree values and typed
//! host values (numeric widths, dates, enumerations, arbitrary
//! precision numbers, and protocol types rebuilt from their models).
//!
//! # Architecture
//!
//! - [`source`] - buffered bidirectional character cursor
//! - [`lexer`] - tokenizer (comments, escapes, number classification)
//! - [`parser`] - recursive-descent grammar, one token of lookahead
//! - [`number`] - the four-representation numeric payload
//! - [`value`] - the value tree, its operations, and the renderer
//! - [`kind`] - primitive-kind catalog and the typed host value
//! - [`convert`] - text/value/scalar converters and the enum registry
//! - [`builder`] - factory-registered construction of host types
//! - [`date`] - RFC 1123 and ISO 8601 timestamp text
//! - [`error`] - the error taxonomy
//!
//! # Example
//!
//! ```
//! use json_tree::parse;
//!
//! let mut doc = parse(r#"{"name": "ada", "tags": [1, 2]}"#)?;
//! assert_eq!(doc.at("name")?.as_string()?, "ada");
//! doc.set("age", 36i64)?;
//! let text = doc.to_string();
//! assert_eq!(parse(&text)?, doc);
//! # Ok::<(), json_tree::Error>(())
//! ```

// Library code must avoid unwrap/expect/panic; failures surface as
// Error values. Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod builder;
pub mod convert;
pub mod date;
pub mod error;
pub mod kind;
pub mod lexer;
pub mod number;
pub mod parser;
pub mod source;
pub mod value;

// Re-export commonly used types
pub use builder::{FromJson, Registry};
pub use convert::Catalog;
pub use error::{Error, JsonResult};
pub use kind::{Kind, Scalar};
pub use number::Number;
pub use parser::{parse, parse_reader};
pub use source::CharSource;
pub use value::Value;
