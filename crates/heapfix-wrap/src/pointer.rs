//! Access traits shared by every pointer wrapper.

use std::ffi::c_void;

/// Defines access to the raw pointer held by a wrapper.
pub trait HasPointer {
    /// Builds a new wrapper with a null pointer.
    fn new() -> Self
    where
        Self: Sized;

    /// Returns the wrapped pointer.
    fn ptr(&self) -> *const c_void;

    /// Returns the wrapped pointer for mutation of the pointee.
    fn mut_ptr(&mut self) -> *mut c_void;

    /// Returns the address of the wrapped pointer itself.
    ///
    /// Pass this to C functions that return an allocation through a
    /// `void **` output parameter; the wrapper then owns the result.
    fn mut_ref(&mut self) -> *mut *mut c_void;

    /// Whether the wrapped pointer is null.
    fn is_null(&self) -> bool {
        self.ptr().is_null()
    }

    /// Reads a `T` from the start of the pointee.
    ///
    /// # Safety
    ///
    /// The pointer must be non-null, aligned for `T`, and point to an
    /// initialised `T`.
    unsafe fn read<T>(&self) -> T {
        // SAFETY: forwarded from the caller.
        unsafe { std::ptr::read(self.ptr().cast::<T>()) }
    }

    /// Reads a `T` located `offset` bytes into the pointee.
    ///
    /// # Safety
    ///
    /// As [`read`](Self::read), for the address `ptr + offset`, which must
    /// stay within the same allocation.
    unsafe fn read_offset<T>(&self, offset: isize) -> T {
        // SAFETY: forwarded from the caller.
        unsafe { std::ptr::read(self.ptr().cast::<u8>().offset(offset).cast::<T>()) }
    }

    /// Reads the `n`th `T` of an array starting at the pointee.
    ///
    /// # Safety
    ///
    /// The pointee must be an array of at least `n + 1` initialised `T`s.
    unsafe fn nth<T>(&self, n: usize) -> T {
        // SAFETY: forwarded from the caller.
        unsafe { std::ptr::read(self.ptr().cast::<T>().add(n)) }
    }
}

/// Builds a wrapper that takes ownership of an existing pointer.
pub trait FromPointer {
    /// Adopts `p`; the wrapper releases it on drop unless it is null.
    fn from_ptr(p: *mut c_void) -> Self;
}
