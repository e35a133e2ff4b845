//! Error types for heap fixtures.
//!
//! Allocation is the only runtime failure. Configuration errors are
//! reported separately so callers using the default fixtures never have
//! to match on them.

use std::error::Error;
use std::fmt;

/// Errors from obtaining memory on the C heap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The allocator returned null for the request.
    OutOfMemory {
        /// Number of bytes requested.
        requested: usize,
    },
    /// The type's alignment exceeds what `malloc` guarantees.
    UnsupportedAlignment {
        /// Alignment required by the type.
        align: usize,
        /// Largest alignment the C heap guarantees.
        max: usize,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory { requested } => {
                write!(f, "allocation of {requested} bytes failed")
            }
            Self::UnsupportedAlignment { align, max } => {
                write!(f, "alignment {align} exceeds malloc alignment {max}")
            }
        }
    }
}

impl Error for AllocError {}

/// Errors from validating a [`FixtureConfig`](crate::FixtureConfig).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The greeting text contains a NUL byte before its end.
    InteriorNul {
        /// Byte offset of the first NUL.
        position: usize,
    },
    /// The greeting text plus its terminator does not fit the buffer.
    TextTooLong {
        /// Length of the text in bytes, excluding the terminator.
        len: usize,
        /// Capacity of the greeting buffer in bytes.
        capacity: usize,
    },
    /// A buffer capacity of zero was requested.
    ZeroCapacity {
        /// Which capacity was zero.
        field: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InteriorNul { position } => {
                write!(f, "greeting text contains NUL at byte {position}")
            }
            Self::TextTooLong { len, capacity } => {
                write!(
                    f,
                    "greeting text of {len} bytes plus terminator exceeds capacity {capacity}"
                )
            }
            Self::ZeroCapacity { field } => write!(f, "{field} must be non-zero"),
        }
    }
}

impl Error for ConfigError {}

/// Errors from the configurable fixture constructors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FixtureError {
    /// The fixture configuration was rejected.
    Config(ConfigError),
    /// The fixture region could not be allocated.
    Alloc(AllocError),
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid fixture config: {e}"),
            Self::Alloc(e) => write!(f, "fixture allocation failed: {e}"),
        }
    }
}

impl Error for FixtureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Alloc(e) => Some(e),
        }
    }
}

impl From<ConfigError> for FixtureError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<AllocError> for FixtureError {
    fn from(e: AllocError) -> Self {
        Self::Alloc(e)
    }
}
