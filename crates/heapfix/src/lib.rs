//! heapfix: heap fixtures and owning FFI pointer wrappers.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the heapfix sub-crates. The C ABI lives in `heapfix-ffi` and is linked
//! separately.
//!
//! # Quick start
//!
//! ```rust
//! use heapfix::prelude::*;
//!
//! let greeting = allocate_greeting_string().unwrap();
//! assert_eq!(&greeting.as_bytes()[..9], b"test 123\0");
//!
//! let mut slot = None;
//! allocate_pair_record(&mut slot).unwrap();
//! assert_eq!(slot.as_deref(), Some(&PairRecord { first: 1, second: 2 }));
//!
//! let empty = allocate_empty_buffer().unwrap();
//! assert!(empty.as_bytes().iter().all(|&b| b == 0));
//!
//! // Hand a region to C and take it back through a wrapper.
//! let adopted = FreeWrapper::from_ptr(empty.into_raw().cast());
//! assert!(!adopted.is_null());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`heap`] | `heapfix-core` | `HeapBlock`, `HeapBox`, `PairRecord`, fixtures, errors, config |
//! | [`wrap`] | `heapfix-wrap` | `HasPointer`, `FromPointer`, `FreeWrapper`, `freeing_wrapper!` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// C-heap owning types and fixtures (`heapfix-core`).
pub use heapfix_core as heap;

/// Owning FFI pointer wrappers (`heapfix-wrap`).
pub use heapfix_wrap as wrap;

pub use heapfix_wrap::freeing_wrapper;

/// Common imports for working with heapfix.
pub mod prelude {
    pub use heapfix_core::{
        allocate_empty_buffer, allocate_empty_buffer_with, allocate_greeting_string,
        allocate_greeting_string_with, allocate_pair_record, AllocError, FixtureConfig,
        FixtureError, HeapBlock, HeapBox, PairRecord,
    };
    pub use heapfix_wrap::{FreeWrapper, FromPointer, HasPointer};
}
