//! Owned regions on the C heap.
//!
//! [`HeapBlock`] owns an untyped byte region from `calloc`; [`HeapBox`]
//! owns a single typed value from `malloc`. Both release their memory with
//! `free` on drop, and both can give that duty up with `into_raw` so the
//! region can be handed to C code that will `free` it itself.

#![allow(unsafe_code)]

use std::fmt;
use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::error::AllocError;

/// Largest alignment `malloc` is relied upon to provide.
///
/// Matches `alignof(max_align_t)` on the mainstream 32- and 64-bit ABIs.
pub const MALLOC_ALIGN: usize = 2 * mem::size_of::<usize>();

/// A zero-initialised byte region owned on the C heap.
pub struct HeapBlock {
    ptr: NonNull<u8>,
    len: usize,
}

// SAFETY: HeapBlock uniquely owns its region; no other handle aliases it.
unsafe impl Send for HeapBlock {}
// SAFETY: shared access only hands out `&[u8]`.
unsafe impl Sync for HeapBlock {}

impl HeapBlock {
    /// Allocate `len` bytes, all zero.
    ///
    /// A zero-length request still allocates one byte so the pointer is
    /// unique and non-null; [`len`](Self::len) reports 0.
    pub fn zeroed(len: usize) -> Result<Self, AllocError> {
        // SAFETY: calloc has no preconditions; null is handled below.
        let raw = unsafe { libc::calloc(len.max(1), 1) } as *mut u8;
        let ptr = NonNull::new(raw).ok_or(AllocError::OutOfMemory { requested: len })?;
        Ok(Self { ptr, len })
    }

    /// Adopt a region previously released with [`into_raw`](Self::into_raw).
    ///
    /// Returns `None` if `ptr` is null.
    ///
    /// # Safety
    ///
    /// `ptr` must come from the C heap (`malloc` family), be valid for
    /// reads and writes of `len` initialised bytes, and not be owned by
    /// anything else.
    pub unsafe fn from_raw(ptr: *mut u8, len: usize) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { ptr, len })
    }

    /// Size of the region in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the region holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrow the region.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: ptr is valid for len initialised bytes for the life of self.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Mutably borrow the region.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        // SAFETY: as above, and &mut self guarantees exclusivity.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Pointer to the first byte.
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// Give up ownership, returning a pointer the caller must `free`.
    pub fn into_raw(self) -> *mut u8 {
        ManuallyDrop::new(self).ptr.as_ptr()
    }
}

impl Drop for HeapBlock {
    fn drop(&mut self) {
        // SAFETY: ptr came from the C heap and is owned by self.
        unsafe { libc::free(self.ptr.as_ptr().cast()) }
    }
}

impl AsRef<[u8]> for HeapBlock {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsMut<[u8]> for HeapBlock {
    fn as_mut(&mut self) -> &mut [u8] {
        self.as_bytes_mut()
    }
}

impl fmt::Debug for HeapBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapBlock")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .finish()
    }
}

/// A single value owned on the C heap.
///
/// Restricted to `Copy` types: the region is released with `free` and
/// never runs a destructor for its contents.
pub struct HeapBox<T: Copy> {
    ptr: NonNull<T>,
}

// SAFETY: HeapBox uniquely owns its value, like Box<T>.
unsafe impl<T: Copy + Send> Send for HeapBox<T> {}
// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Copy + Sync> Sync for HeapBox<T> {}

impl<T: Copy> HeapBox<T> {
    /// Move `value` into a fresh C-heap allocation.
    pub fn new(value: T) -> Result<Self, AllocError> {
        let align = mem::align_of::<T>();
        if align > MALLOC_ALIGN {
            return Err(AllocError::UnsupportedAlignment {
                align,
                max: MALLOC_ALIGN,
            });
        }
        let size = mem::size_of::<T>();
        // SAFETY: malloc has no preconditions; null is handled below.
        let raw = unsafe { libc::malloc(size.max(1)) } as *mut T;
        let ptr = NonNull::new(raw).ok_or(AllocError::OutOfMemory { requested: size })?;
        // SAFETY: ptr is non-null, sized for T and aligned to MALLOC_ALIGN >= align.
        unsafe { ptr.as_ptr().write(value) };
        Ok(Self { ptr })
    }

    /// Adopt a value previously released with [`into_raw`](Self::into_raw).
    ///
    /// Returns `None` if `ptr` is null.
    ///
    /// # Safety
    ///
    /// `ptr` must come from the C heap, point to an initialised `T`, and
    /// not be owned by anything else.
    pub unsafe fn from_raw(ptr: *mut T) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { ptr })
    }

    /// Give up ownership, returning a pointer the caller must `free`.
    pub fn into_raw(self) -> *mut T {
        ManuallyDrop::new(self).ptr.as_ptr()
    }
}

impl<T: Copy> Deref for HeapBox<T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: ptr holds an initialised T for the life of self.
        unsafe { self.ptr.as_ref() }
    }
}

impl<T: Copy> DerefMut for HeapBox<T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: as above, and &mut self guarantees exclusivity.
        unsafe { self.ptr.as_mut() }
    }
}

impl<T: Copy> Drop for HeapBox<T> {
    fn drop(&mut self) {
        // SAFETY: ptr came from malloc and is owned by self.
        unsafe { libc::free(self.ptr.as_ptr().cast()) }
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for HeapBox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HeapBox").field(&**self).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapfix_test_utils::first_nonzero;

    #[test]
    fn zeroed_block_is_all_zero() {
        let block = HeapBlock::zeroed(512).unwrap();
        assert_eq!(block.len(), 512);
        assert_eq!(first_nonzero(block.as_bytes()), None);
    }

    #[test]
    fn zero_length_block_is_non_null() {
        let block = HeapBlock::zeroed(0).unwrap();
        assert!(block.is_empty());
        assert!(!block.as_ptr().is_null());
        assert!(block.as_bytes().is_empty());
    }

    #[test]
    fn impossible_request_reports_out_of_memory() {
        let err = HeapBlock::zeroed(usize::MAX).unwrap_err();
        assert_eq!(
            err,
            AllocError::OutOfMemory {
                requested: usize::MAX
            }
        );
    }

    #[test]
    fn block_write_is_visible_through_read() {
        let mut block = HeapBlock::zeroed(16).unwrap();
        block.as_bytes_mut()[3] = 0xAB;
        assert_eq!(block.as_bytes()[3], 0xAB);
        assert_eq!(first_nonzero(block.as_bytes()), Some(3));
    }

    #[test]
    fn block_survives_raw_round_trip() {
        let mut block = HeapBlock::zeroed(4).unwrap();
        block.as_bytes_mut().copy_from_slice(b"abcd");
        let raw = block.into_raw();
        let block = unsafe { HeapBlock::from_raw(raw, 4) }.unwrap();
        assert_eq!(block.as_bytes(), b"abcd");
    }

    #[test]
    fn from_raw_rejects_null() {
        assert!(unsafe { HeapBlock::from_raw(std::ptr::null_mut(), 8) }.is_none());
        assert!(unsafe { HeapBox::<u32>::from_raw(std::ptr::null_mut()) }.is_none());
    }

    #[test]
    fn heap_box_holds_value() {
        let mut b = HeapBox::new(41u64).unwrap();
        *b += 1;
        assert_eq!(*b, 42);
    }

    #[test]
    fn heap_box_pointer_is_aligned() {
        let b = HeapBox::new(0u64).unwrap();
        let raw = b.into_raw();
        assert_eq!(raw as usize % mem::align_of::<u64>(), 0);
        drop(unsafe { HeapBox::from_raw(raw) });
    }

    #[test]
    fn over_aligned_type_rejected() {
        #[repr(align(64))]
        #[derive(Clone, Copy, Debug)]
        struct Wide(u8);

        let err = HeapBox::new(Wide(0)).unwrap_err();
        assert_eq!(
            err,
            AllocError::UnsupportedAlignment {
                align: 64,
                max: MALLOC_ALIGN,
            }
        );
    }

    #[test]
    fn zero_sized_value_allocates() {
        let raw = HeapBox::new(()).unwrap().into_raw();
        assert!(!raw.is_null());
        drop(unsafe { HeapBox::from_raw(raw) });
    }
}
