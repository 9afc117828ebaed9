//! Error types for prngkey

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using prngkey's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in key derivation and bit generation
///
/// Every variant is a caller contract violation detected before any output
/// is produced; none of them are transient.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Seed outside the domain accepted by an implementation
    #[error("Invalid seed {seed} for PRNG implementation '{impl_name}': {reason}")]
    InvalidSeed {
        /// The rejected seed
        seed: i128,
        /// Implementation that rejected it
        impl_name: &'static str,
        /// Reason for rejection
        reason: String,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Bit width not offered by an implementation
    #[error("Unsupported bit width {width} for PRNG implementation '{impl_name}'")]
    UnsupportedWidth {
        /// The requested width
        width: u32,
        /// Implementation that was asked
        impl_name: &'static str,
    },

    /// Key produced by a different implementation than the one dispatched
    #[error("Key implementation mismatch: expected key<{expected}>, got key<{got}>")]
    KeyImplMismatch {
        /// Implementation performing the operation
        expected: &'static str,
        /// Implementation the key is tagged with
        got: &'static str,
    },

    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Unsupported dtype for an operation
    #[error("Unsupported dtype {dtype:?} for operation '{op}'")]
    UnsupportedDType {
        /// The unsupported dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },

    /// No implementation registered under the requested name
    #[error("Unknown PRNG implementation '{name}'")]
    UnknownImpl {
        /// The requested name
        name: String,
    },

    /// An implementation with this name is already registered
    #[error("PRNG implementation '{name}' is already registered")]
    DuplicateImpl {
        /// The conflicting name
        name: &'static str,
    },

    /// Index out of bounds
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Size of the dimension
        size: usize,
    },
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create an invalid seed error
    pub fn invalid_seed(seed: i128, impl_name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSeed {
            seed,
            impl_name,
            reason: reason.into(),
        }
    }

    /// Create an unsupported dtype error
    pub fn unsupported_dtype(dtype: DType, op: &'static str) -> Self {
        Self::UnsupportedDType { dtype, op }
    }
}
