//! C ABI for the heapfix heap fixtures.
//!
//! Exposes the fixtures under the symbol names the external heap
//! inspection harness links against (`malloc_string`, `malloc_struct`,
//! `malloc_empty_string`). Every region returned here comes from the C
//! heap and may be released with `free` or [`heapfix_free`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run `$body`, returning `$default` if it panics.
///
/// A panic must never unwind across `extern "C"`.
macro_rules! ffi_guard_or {
    ($default:expr, $body:block) => {
        match ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| $body)) {
            Ok(value) => value,
            Err(payload) => {
                ::tracing::error!(
                    panic = %$crate::panic_message(payload.as_ref()),
                    "panic caught at FFI boundary"
                );
                $default
            }
        }
    };
}

/// [`ffi_guard_or!`] for status-returning entry points.
macro_rules! ffi_guard {
    ($body:block) => {
        ffi_guard_or!($crate::status::HeapfixStatus::Panicked as i32, $body)
    };
}

pub mod fixtures;
pub mod status;

pub use fixtures::{
    heapfix_free, heapfix_malloc_struct, malloc_empty_string, malloc_string, malloc_struct,
};
pub use status::HeapfixStatus;

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
