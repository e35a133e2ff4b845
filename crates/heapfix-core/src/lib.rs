//! C-heap owning types and heap fixtures for heapfix.
//!
//! Every region handed out by this crate comes from the C library heap
//! (`calloc`/`malloc`), so it can cross the FFI boundary and be released
//! with a plain `free`. This crate is one of two that may contain
//! `unsafe` code (along with `heapfix-wrap`).
//!
//! # Fixtures
//!
//! ```text
//! allocate_greeting_string  -> HeapBlock (128 bytes, "test 123\0" + zeros)
//! allocate_pair_record      -> slot <- HeapBox<PairRecord> { first: 1, second: 2 }
//! allocate_empty_buffer     -> HeapBlock (256 bytes, all zero)
//! ```
//!
//! The three operations are independent: none calls another, and each
//! call returns a region owned solely by the caller.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod block;
pub mod config;
pub mod error;
pub mod fixture;
pub mod record;

// Public re-exports for the primary API surface.
pub use block::{HeapBlock, HeapBox, MALLOC_ALIGN};
pub use config::FixtureConfig;
pub use error::{AllocError, ConfigError, FixtureError};
pub use fixture::{
    allocate_empty_buffer, allocate_empty_buffer_with, allocate_greeting_string,
    allocate_greeting_string_with, allocate_pair_record, new_pair_record,
};
pub use record::PairRecord;
