//! Error type shared by every fallible operation in the crate.
//!
//! All checks run before any mutation, so an `Err` always means the receiver
//! was left untouched.

use std::fmt;

/// Failure kinds for rows, truth tables, gates and circuits.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// A value outside `{0, 1}` was supplied where a bit is required.
    InvalidBit { value: u8 },
    /// A bit or row index outside `0..len`.
    IndexOutOfRange { index: usize, len: usize },
    /// Gate target/controls violate the width or disjointness rule.
    InvalidGateGeometry {
        width: usize,
        controls: Vec<usize>,
        target: usize,
    },
    /// A row or table has the wrong width for its context.
    SizeMismatch { expected: usize, actual: usize },
    /// A table replacement has the wrong number of rows.
    RowCountMismatch { expected: usize, actual: usize },
    /// A gate's width differs from the circuit's established width.
    WidthMismatch { expected: usize, actual: usize },
    /// A truth table is not a permutation of its inputs.
    NotReversible,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidBit { value } => {
                write!(f, "invalid bit value {}, expected 0 or 1", value)
            }
            Error::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for length {}", index, len)
            }
            Error::InvalidGateGeometry {
                width,
                controls,
                target,
            } => write!(
                f,
                "invalid gate geometry: width {}, controls {:?}, target {}",
                width, controls, target
            ),
            Error::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {}, got {}", expected, actual)
            }
            Error::RowCountMismatch { expected, actual } => {
                write!(f, "row count mismatch: expected {} rows, got {}", expected, actual)
            }
            Error::WidthMismatch { expected, actual } => {
                write!(f, "gate width {} does not match circuit width {}", actual, expected)
            }
            Error::NotReversible => write!(f, "truth table is not reversible"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T, E = Error> = std::result::Result<T, E>;
