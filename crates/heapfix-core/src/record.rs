//! The fixed-layout two-field record.

use std::ffi::c_int;

/// A C-layout pair of `int`s, `struct { int first; int second; }`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PairRecord {
    /// First field; always 1 in the fixture.
    pub first: c_int,
    /// Second field; always 2 in the fixture.
    pub second: c_int,
}

// Compile-time layout assertions for ABI stability.
const _: () = assert!(std::mem::size_of::<PairRecord>() == 2 * std::mem::size_of::<c_int>());
const _: () = assert!(std::mem::align_of::<PairRecord>() == std::mem::align_of::<c_int>());

impl PairRecord {
    /// Value of `first` in the fixture record.
    pub const FIRST: c_int = 1;

    /// Value of `second` in the fixture record.
    pub const SECOND: c_int = 2;

    /// The record the fixture allocator populates.
    pub const fn fixture() -> Self {
        Self {
            first: Self::FIRST,
            second: Self::SECOND,
        }
    }
}
