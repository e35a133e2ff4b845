//! Owning wrappers for FFI pointers that need to be freed eventually.
//!
//! A pointer handed back by C is adopted by a newtype that calls the
//! matching release function when it goes out of scope. Different
//! allocators need different release functions; [`freeing_wrapper!`]
//! declares a wrapper for any of them, and [`FreeWrapper`] is the one for
//! the C library's `free`. On Windows, the `windows` module adds wrappers
//! for the Win32 allocators and handle types. This crate is one of two that
//! may contain `unsafe` code (along with `heapfix-core`).
//!
//! # Example
//!
//! ```
//! use heapfix_wrap::{FreeWrapper, FromPointer, HasPointer};
//!
//! let pointer = FreeWrapper::from_ptr(unsafe { libc::calloc(128, 1) });
//! assert_eq!(unsafe { libc::strlen(pointer.ptr().cast()) }, 0);
//! // `free` runs here, when `pointer` is dropped.
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod pointer;

pub use pointer::{FromPointer, HasPointer};

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}

/// Declare a newtype over `*mut c_void` that releases its pointer on drop.
///
/// ```
/// use heapfix_wrap::{freeing_wrapper, FromPointer, HasPointer};
/// use std::ffi::c_void;
///
/// unsafe fn release(p: *mut c_void) {
///     libc::free(p)
/// }
///
/// freeing_wrapper! {
///     /// Frees with `release`.
///     pub struct ReleaseWrapper => release;
/// }
///
/// let w = ReleaseWrapper::from_ptr(unsafe { libc::malloc(8) });
/// assert!(!w.is_null());
/// ```
///
/// The release function must accept a `*mut c_void` and is only called
/// when the pointer is non-null.
#[macro_export]
macro_rules! freeing_wrapper {
    ($(#[$meta:meta])* $vis:vis struct $name:ident => $free:path;) => {
        $(#[$meta])*
        $vis struct $name(pub *mut ::std::ffi::c_void);

        impl $crate::HasPointer for $name {
            fn new() -> Self {
                Self(::std::ptr::null_mut())
            }

            fn ptr(&self) -> *const ::std::ffi::c_void {
                self.0
            }

            fn mut_ptr(&mut self) -> *mut ::std::ffi::c_void {
                self.0
            }

            fn mut_ref(&mut self) -> *mut *mut ::std::ffi::c_void {
                &mut self.0
            }
        }

        impl $crate::FromPointer for $name {
            fn from_ptr(p: *mut ::std::ffi::c_void) -> Self {
                Self(p)
            }
        }

        impl $name {
            /// Give up ownership without releasing the pointer.
            pub fn into_raw(self) -> *mut ::std::ffi::c_void {
                ::std::mem::ManuallyDrop::new(self).0
            }
        }

        impl Drop for $name {
            fn drop(&mut self) {
                if !self.0.is_null() {
                    $crate::__private::tracing::trace!(
                        wrapper = stringify!($name),
                        ptr = ?self.0,
                        "releasing wrapped pointer"
                    );
                    // SAFETY: the wrapper owns a non-null pointer from the
                    // allocator that `$free` releases.
                    #[allow(unsafe_code)]
                    unsafe {
                        $free(self.0);
                    };
                }
            }
        }
    };
}

#[cfg(windows)]
pub mod windows;

freeing_wrapper! {
    /// Frees its pointer with the C library's `free`.
    #[derive(Debug)]
    pub struct FreeWrapper => libc::free;
}

impl Default for FreeWrapper {
    fn default() -> Self {
        <Self as HasPointer>::new()
    }
}
