//! Error types for numval

use crate::variant::ValueType;
use thiserror::Error;

/// Result type alias using numval's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`]
///
/// Callers that only care about the failure category (for example to map
/// errors onto a host runtime's exception kinds) match on this instead of the
/// individual variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An indexer selected a row, column or coefficient outside the matrix
    InvalidIndex,
    /// An argument violated the domain of an operation
    InvalidParameterValue,
    /// A series did not converge
    CanNotConverge,
    /// A decomposition or solve hit a singular matrix (strict mode only)
    Singular,
    /// An allocation could not be satisfied
    OutOfMemory,
    /// A persisted matrix did not match the expected layout
    InvalidFileFormat,
    /// A persisted matrix ended early
    UnexpectedEndOfFile,
    /// Any other I/O failure reported by the operating system
    Io,
}

/// Errors that can occur in numval operations
#[derive(Error, Debug)]
pub enum Error {
    /// Two-dimensional index out of range (indices are one-based)
    #[error("Index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    InvalidIndex {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// Linear (row-major) index out of range
    #[error("Index {index} out of range for matrix with {len} coefficients")]
    InvalidLinearIndex {
        /// Requested index
        index: usize,
        /// Number of coefficients
        len: usize,
    },

    /// An index value could not be turned into a positive integer
    #[error("Invalid index value: {reason}")]
    InvalidIndexValue {
        /// Why the value was rejected
        reason: String,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidParameter {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Operand extents are incompatible
    #[error("Shape mismatch in {op}: {}x{} vs {}x{}", .lhs.0, .lhs.1, .rhs.0, .rhs.1)]
    ShapeMismatch {
        /// Operation name
        op: &'static str,
        /// Left operand extents (rows, cols)
        lhs: (usize, usize),
        /// Right operand extents (rows, cols)
        rhs: (usize, usize),
    },

    /// A variant carried a value that the operation cannot accept
    #[error("Operation '{op}' does not accept a value of type {value_type:?}")]
    TypeMismatch {
        /// Operation name
        op: &'static str,
        /// The offending tag
        value_type: ValueType,
    },

    /// Series summation gave up
    #[error("Summation failed to converge after {terms} terms")]
    CanNotConverge {
        /// Number of base terms evaluated
        terms: usize,
    },

    /// Singular matrix (only returned when strict linear algebra is requested)
    #[error("Matrix is singular in {op}")]
    Singular {
        /// Operation name
        op: &'static str,
    },

    /// Out of memory
    #[error("Out of memory: failed to allocate {elements} coefficients")]
    OutOfMemory {
        /// Requested number of coefficients
        elements: usize,
    },

    /// Malformed persisted matrix
    #[error("Invalid file format: {reason}")]
    InvalidFileFormat {
        /// What did not match
        reason: String,
    },

    /// Persisted matrix ended before its declared payload
    #[error("Unexpected end of file")]
    UnexpectedEndOfFile,

    /// Underlying I/O error
    #[error("I/O error: {0}")]
    Io(std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEndOfFile
        } else {
            Self::Io(err)
        }
    }
}

impl Error {
    /// Create an out-of-range two-dimensional index error
    pub fn invalid_index(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        Self::InvalidIndex {
            row,
            col,
            rows,
            cols,
        }
    }

    /// Create an invalid index value error
    pub fn invalid_index_value(reason: impl Into<String>) -> Self {
        Self::InvalidIndexValue {
            reason: reason.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_parameter(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            arg,
            reason: reason.into(),
        }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(op: &'static str, lhs: (usize, usize), rhs: (usize, usize)) -> Self {
        Self::ShapeMismatch { op, lhs, rhs }
    }

    /// Create a type mismatch error for a variant argument
    pub fn type_mismatch(op: &'static str, value_type: ValueType) -> Self {
        Self::TypeMismatch { op, value_type }
    }

    /// Create an invalid file format error
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Self::InvalidFileFormat {
            reason: reason.into(),
        }
    }

    /// The category this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidIndex { .. }
            | Self::InvalidLinearIndex { .. }
            | Self::InvalidIndexValue { .. } => ErrorKind::InvalidIndex,
            Self::InvalidParameter { .. }
            | Self::ShapeMismatch { .. }
            | Self::TypeMismatch { .. } => ErrorKind::InvalidParameterValue,
            Self::CanNotConverge { .. } => ErrorKind::CanNotConverge,
            Self::Singular { .. } => ErrorKind::Singular,
            Self::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            Self::InvalidFileFormat { .. } => ErrorKind::InvalidFileFormat,
            Self::UnexpectedEndOfFile => ErrorKind::UnexpectedEndOfFile,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(Error::invalid_index(3, 1, 2, 2).kind(), ErrorKind::InvalidIndex);
        assert_eq!(
            Error::shape_mismatch("add", (1, 2), (2, 1)).kind(),
            ErrorKind::InvalidParameterValue
        );
        assert_eq!(
            Error::CanNotConverge { terms: 10 }.kind(),
            ErrorKind::CanNotConverge
        );
    }

    #[test]
    fn test_eof_io_error_maps_to_unexpected_end() {
        let io = std::io::Error::from(std::io::ErrorKind::UnexpectedEof);
        assert_eq!(Error::from(io).kind(), ErrorKind::UnexpectedEndOfFile);

        let io = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        assert_eq!(Error::from(io).kind(), ErrorKind::Io);
    }

    #[test]
    fn test_display() {
        let err = Error::invalid_index(3, 1, 2, 2);
        assert_eq!(err.to_string(), "Index (3, 1) out of range for 2x2 matrix");
    }
}
