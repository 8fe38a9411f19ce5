//! # Error Hierarchy
//!
//! Structured validation errors for circuit layouts and circuit inputs,
//! built with `thiserror`. Each variant carries the offending signal and
//! enough context to fix the input without guesswork.

use thiserror::Error;

/// Errors raised while validating a [`CircuitLayout`](crate::CircuitLayout).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout declares no signals.
    #[error("circuit layout \"{0}\" declares no signals")]
    Empty(String),

    /// Two signals share the same name.
    #[error("circuit layout declares signal \"{0}\" more than once")]
    DuplicateSignal(String),

    /// A signal was declared with zero limbs.
    #[error("signal \"{0}\" has arity 0")]
    ZeroArity(String),

    /// A signal name is empty.
    #[error("circuit layout contains a signal with an empty name")]
    EmptySignalName,
}

/// Errors raised while checking [`CircuitInputs`](crate::CircuitInputs)
/// against a layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The inputs carry a signal the layout does not declare.
    #[error("unknown signal \"{0}\"")]
    UnknownSignal(String),

    /// A declared signal is absent from the inputs.
    #[error("missing signal \"{0}\"")]
    MissingSignal(String),

    /// The signal has the wrong number of limbs.
    #[error("signal \"{signal}\" expects {expected} values, got {actual}")]
    ArityMismatch {
        /// The signal name.
        signal: String,
        /// Arity declared by the layout.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// A value is not a non-negative decimal integer.
    #[error("signal \"{signal}\"[{index}] is not a decimal integer: \"{value}\"")]
    NotDecimal {
        /// The signal name.
        signal: String,
        /// Position inside the signal array.
        index: usize,
        /// The rejected text.
        value: String,
    },

    /// A value does not fit in the scalar field.
    #[error("signal \"{signal}\"[{index}] is not below the scalar field modulus")]
    OutOfField {
        /// The signal name.
        signal: String,
        /// Position inside the signal array.
        index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_mismatch_message_names_signal_and_counts() {
        let err = InputError::ArityMismatch {
            signal: "modulus".into(),
            expected: 32,
            actual: 31,
        };
        let msg = err.to_string();
        assert!(msg.contains("modulus"));
        assert!(msg.contains("32"));
        assert!(msg.contains("31"));
    }

    #[test]
    fn not_decimal_message_quotes_value() {
        let err = InputError::NotDecimal {
            signal: "signature".into(),
            index: 4,
            value: "0x1f".into(),
        };
        assert_eq!(
            err.to_string(),
            "signal \"signature\"[4] is not a decimal integer: \"0x1f\""
        );
    }

    #[test]
    fn layout_errors_display() {
        assert!(LayoutError::Empty("rsa".into()).to_string().contains("rsa"));
        assert!(LayoutError::ZeroArity("sig".into()).to_string().contains("arity 0"));
        assert!(LayoutError::DuplicateSignal("m".into())
            .to_string()
            .contains("more than once"));
    }
}
