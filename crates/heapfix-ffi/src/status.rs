//! C-compatible status codes.
//!
//! [`HeapfixStatus`] is a `repr(i32)` enum covering every failure a
//! status-returning entry point can report.

use heapfix_core::{AllocError, FixtureError};

/// C-compatible status code returned by status-returning FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeapfixStatus {
    /// Success.
    Ok = 0,
    /// An argument is null or otherwise invalid.
    InvalidArgument = -1,
    /// The C heap could not satisfy the allocation.
    AllocationFailed = -2,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&AllocError> for HeapfixStatus {
    fn from(_e: &AllocError) -> Self {
        HeapfixStatus::AllocationFailed
    }
}

impl From<&FixtureError> for HeapfixStatus {
    fn from(e: &FixtureError) -> Self {
        match e {
            FixtureError::Config(_) => HeapfixStatus::InvalidArgument,
            FixtureError::Alloc(e) => HeapfixStatus::from(e),
        }
    }
}
