//! Error types shared by every helper group.
//!
//! Helpers compute their result as `Result<_, HelperError>` and the adapters
//! in [`crate::convention`] convert failures into the engine's `RenderError`
//! at the boundary, so a malformed call surfaces as a normal template
//! rendering error with a descriptive message.

use handlebars::RenderError;
use thiserror::Error;

/// An error raised by a helper while interpreting its arguments.
///
/// Most helpers degrade gracefully on mis-typed input (returning an empty
/// string or passing the value through); the variants here cover the cases
/// that fail fast instead: structurally broken calls, unknown operators, and
/// I/O failures.
#[derive(Error, Debug)]
pub enum HelperError {
    /// An argument had an unusable type, e.g. a math helper fed a non-number.
    #[error("{{{{{helper}}}}}: expected {expected}, received `{received}`")]
    Type {
        /// The helper name as registered.
        helper: &'static str,
        /// Description of the expected argument.
        expected: &'static str,
        /// Rendered form of what was actually received.
        received: String,
    },

    /// A mandatory positional or hash argument was absent.
    #[error("{{{{{helper}}}}}: missing required argument `{argument}`")]
    MissingArgument {
        /// The helper name as registered.
        helper: &'static str,
        /// The missing argument, by name or position.
        argument: &'static str,
    },

    /// A comparison helper was given an operator outside its table.
    #[error("{{{{{helper}}}}}: invalid operator `{operator}`")]
    InvalidOperator {
        /// The helper name as registered.
        helper: &'static str,
        /// The operator that was supplied.
        operator: String,
    },

    /// A lookup-style helper (i18n, option) could not resolve a key.
    #[error("{{{{{helper}}}}}: {message}")]
    Lookup {
        /// The helper name as registered.
        helper: &'static str,
        /// What could not be found.
        message: String,
    },

    /// A filesystem helper failed to read its target.
    #[error("{{{{{helper}}}}}: failed to access `{path}`: {source}")]
    Io {
        /// The helper name as registered.
        helper: &'static str,
        /// The path being read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A string that was expected to be well-formed (JSON, URL, glob, regex)
    /// failed to parse.
    #[error("{{{{{helper}}}}}: {message}")]
    Parse {
        /// The helper name as registered.
        helper: &'static str,
        /// Description of the parse failure.
        message: String,
    },
}

impl From<HelperError> for RenderError {
    fn from(err: HelperError) -> Self {
        Self::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_error_display() {
        let err = HelperError::Type {
            helper: "abs",
            expected: "a number",
            received: "foo".to_string(),
        };
        assert_eq!(err.to_string(), "{{abs}}: expected a number, received `foo`");
    }

    #[test]
    fn test_invalid_operator_display() {
        let err = HelperError::InvalidOperator {
            helper: "compare",
            operator: "~>".to_string(),
        };
        assert_eq!(err.to_string(), "{{compare}}: invalid operator `~>`");
    }

    #[test]
    fn test_conversion_to_render_error() {
        let err = HelperError::MissingArgument {
            helper: "jsfiddle",
            argument: "id",
        };
        let rendered = RenderError::from(err);
        assert!(rendered.to_string().contains("jsfiddle"));
        assert!(rendered.to_string().contains("id"));
    }
}
