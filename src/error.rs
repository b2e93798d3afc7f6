//! Error taxonomy for parsing, navigation, and conversion.
//!
//! Every failure surfaces synchronously as one of four variants. Nothing
//! is retried internally and no partial result survives an error: a parse
//! that fails discards whatever subtree it had accumulated.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type JsonResult<T> = Result<T, Error>;

/// The closed set of failures the library produces.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input text: bad token, unterminated string or comment,
    /// unexpected token, or premature end of input.
    #[error("parse error: {0}")]
    Parse(String),

    /// A navigation or mutation call invoked on a variant that does not
    /// support it, e.g. object-style `set` on an array.
    #[error("operation `{op}` is not supported on a {variant} value")]
    UnsupportedOperation {
        /// The operation that was attempted.
        op: &'static str,
        /// The variant it was attempted on.
        variant: &'static str,
    },

    /// Type-directed extraction found no applicable converter or
    /// constructor for the requested target type.
    #[error("cannot coerce a {variant} value to `{target}`")]
    Coercion {
        /// The requested target type or kind name.
        target: String,
        /// The source value's concrete variant.
        variant: &'static str,
    },

    /// A registered constructor or factory itself failed.
    #[error("construction of `{target}` failed")]
    Construction {
        /// The target type name.
        target: String,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Shorthand for an [`Error::Parse`] with a formatted message.
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse(message.into())
    }

    /// Shorthand for [`Error::UnsupportedOperation`].
    pub fn unsupported(op: &'static str, variant: &'static str) -> Self {
        Error::UnsupportedOperation { op, variant }
    }

    /// Shorthand for [`Error::Coercion`].
    pub fn coercion(target: impl Into<String>, variant: &'static str) -> Self {
        Error::Coercion {
            target: target.into(),
            variant,
        }
    }

    /// Wrap a failure from an underlying factory with the target type name.
    pub fn construction(target: impl Into<String>, cause: Error) -> Self {
        Error::Construction {
            target: target.into(),
            source: Box::new(cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = Error::unsupported("set", "array");
        assert_eq!(
            e.to_string(),
            "operation `set` is not supported on a array value"
        );

        let e = Error::coercion("integer", "object");
        assert_eq!(e.to_string(), "cannot coerce a object value to `integer`");
    }

    #[test]
    fn test_construction_carries_cause() {
        let cause = Error::parse("missing field");
        let e = Error::construction("Point", cause);
        assert_eq!(e.to_string(), "construction of `Point` failed");
        assert!(std::error::Error::source(&e).is_some());
    }
}
