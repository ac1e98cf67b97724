//! Error taxonomy shared by every layer of the calculator.

use thiserror::Error;

/// Coarse classification of a [`CalcError`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind {
    InsufficientArguments,
    TypeMismatch,
    Units,
    Domain,
    NotImplemented,
    Other,
}

/// Errors raised while executing calculator instructions.
///
/// Every variant is recoverable: the instruction loop reports it and moves on,
/// and the stack is left exactly as it was before the failing instruction.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum CalcError {
    #[error("{op}: insufficient arguments (needs {needed}, stack has {available})")]
    InsufficientArguments {
        op: String,
        needed: usize,
        available: usize,
    },

    #[error("{op}: type mismatch ({kinds})")]
    TypeMismatch { op: String, kinds: String },

    #[error("{op}: units prohibited")]
    UnitsProhibited { op: String },

    #[error("units mismatch: '{left}' vs '{right}'")]
    UnitsMismatch { left: String, right: String },

    #[error("domain error: {0}")]
    Domain(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not implemented: {0}")]
    NotImplemented(String),

    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("{0}")]
    Stack(String),
}

impl CalcError {
    /// Shorthand for a domain error.
    pub fn domain(msg: impl Into<String>) -> Self {
        CalcError::Domain(msg.into())
    }

    /// Shorthand for an invalid-argument error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        CalcError::InvalidArgument(msg.into())
    }

    /// Shorthand for a type mismatch.
    pub fn mismatch(op: impl Into<String>, kinds: impl Into<String>) -> Self {
        CalcError::TypeMismatch {
            op: op.into(),
            kinds: kinds.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::InsufficientArguments { .. } => ErrorKind::InsufficientArguments,
            CalcError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            CalcError::UnitsProhibited { .. } | CalcError::UnitsMismatch { .. } => {
                ErrorKind::Units
            }
            CalcError::Domain(_) | CalcError::DivisionByZero => ErrorKind::Domain,
            CalcError::NotImplemented(_) => ErrorKind::NotImplemented,
            CalcError::InvalidArgument(_)
            | CalcError::UnknownOperation(_)
            | CalcError::Stack(_) => ErrorKind::Other,
        }
    }
}

/// Result alias used across the calculator crates.
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_by_zero_is_a_domain_error() {
        assert_eq!(CalcError::DivisionByZero.kind(), ErrorKind::Domain);
        assert_eq!(CalcError::domain("gcd != 1").kind(), ErrorKind::Domain);
    }

    #[test]
    fn units_errors_share_a_kind() {
        let prohibited = CalcError::UnitsProhibited { op: "det".into() };
        let mismatch = CalcError::UnitsMismatch {
            left: "m".into(),
            right: "s".into(),
        };
        assert_eq!(prohibited.kind(), ErrorKind::Units);
        assert_eq!(mismatch.kind(), ErrorKind::Units);
    }

    #[test]
    fn display_messages() {
        let err = CalcError::InsufficientArguments {
            op: "+".into(),
            needed: 2,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "+: insufficient arguments (needs 2, stack has 1)"
        );
        assert_eq!(CalcError::DivisionByZero.to_string(), "division by zero");
    }
}
