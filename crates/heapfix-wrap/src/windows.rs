//! Windows-specific wrappers.
//!
//! Win32 hands out memory and handles from several allocators, each with
//! its own release function. Each wrapper here pairs a pointer with the
//! one function that may release it.

use std::ffi::c_void;

use winapi::um::{
    handleapi::CloseHandle,
    lmapibuf::NetApiBufferFree,
    ntlsa::LsaFreeReturnBuffer,
    securitybaseapi::FreeSid,
    winbase::{GlobalFree, LocalFree},
};

use crate::{FromPointer, HasPointer};

freeing_wrapper! {
    /// A local memory object from `LocalAlloc`/`LocalReAlloc`, released
    /// with `LocalFree`. Not for memory from `GlobalAlloc`.
    pub struct LocalFreeWrapper => LocalFree;
}

freeing_wrapper! {
    /// A global memory object from `GlobalAlloc`/`GlobalReAlloc`, released
    /// with `GlobalFree`. Not for memory from `LocalAlloc`.
    pub struct GlobalFreeWrapper => GlobalFree;
}

freeing_wrapper! {
    /// A buffer allocated by the LSA, released with `LsaFreeReturnBuffer`.
    pub struct LsaFreeReturnBufferWrapper => LsaFreeReturnBuffer;
}

freeing_wrapper! {
    /// A buffer from `NetApiBufferAllocate` or a network management
    /// function, released with `NetApiBufferFree`.
    pub struct NetApiBufferFreeWrapper => NetApiBufferFree;
}

freeing_wrapper! {
    /// An open object handle, closed with `CloseHandle`.
    pub struct CloseHandleWrapper => CloseHandle;
}

freeing_wrapper! {
    /// A SID from `AllocateAndInitializeSid`, released with `FreeSid`.
    pub struct FreeSidWrapper => FreeSid;
}

#[link(name = "wintrust")]
extern "system" {
    fn CryptCATAdminReleaseContext(h_cat_admin: *mut c_void, dw_flags: u32) -> i32;
    fn CryptCATAdminReleaseCatalogContext(
        h_cat_admin: *mut c_void,
        h_cat_info: *mut c_void,
        dw_flags: u32,
    ) -> i32;
}

/// A catalog administrator context from `CryptCATAdminAcquireContext`,
/// released with `CryptCATAdminReleaseContext`.
pub struct CryptCATAdminReleaseContextWrapper(pub *mut c_void);

impl HasPointer for CryptCATAdminReleaseContextWrapper {
    fn new() -> Self {
        Self(std::ptr::null_mut())
    }

    fn ptr(&self) -> *const c_void {
        self.0
    }

    fn mut_ptr(&mut self) -> *mut c_void {
        self.0
    }

    fn mut_ref(&mut self) -> *mut *mut c_void {
        &mut self.0
    }
}

impl FromPointer for CryptCATAdminReleaseContextWrapper {
    fn from_ptr(p: *mut c_void) -> Self {
        Self(p)
    }
}

impl Drop for CryptCATAdminReleaseContextWrapper {
    fn drop(&mut self) {
        if !self.0.is_null() {
            tracing::trace!(ptr = ?self.0, "releasing catalog admin context");
            // SAFETY: self.0 is a live admin context owned by this wrapper.
            unsafe {
                CryptCATAdminReleaseContext(self.0, 0);
            }
        }
    }
}

/// A catalog context from `CryptCATAdminAddCatalog`, released with
/// `CryptCATAdminReleaseCatalogContext`.
///
/// Borrows the admin context it was issued by, so that context cannot be
/// released first.
pub struct CryptCATAdminReleaseCatalogContextWrapper<'ctx>(
    *mut c_void,
    &'ctx CryptCATAdminReleaseContextWrapper,
);

impl<'ctx> CryptCATAdminReleaseCatalogContextWrapper<'ctx> {
    /// Builds a null wrapper tied to `admin`.
    pub fn new(admin: &'ctx CryptCATAdminReleaseContextWrapper) -> Self {
        Self(std::ptr::null_mut(), admin)
    }

    /// Adopts `p`, a catalog context issued by `admin`.
    pub fn from_ptr(admin: &'ctx CryptCATAdminReleaseContextWrapper, p: *mut c_void) -> Self {
        Self(p, admin)
    }

    /// Returns the wrapped pointer.
    pub fn ptr(&self) -> *const c_void {
        self.0
    }

    /// Returns the wrapped pointer for mutation of the pointee.
    pub fn mut_ptr(&mut self) -> *mut c_void {
        self.0
    }

    /// Returns the address of the wrapped pointer itself.
    pub fn mut_ref(&mut self) -> *mut *mut c_void {
        &mut self.0
    }

    /// Whether the wrapped pointer is null.
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// The admin context this catalog context belongs to.
    pub fn admin(&self) -> &'ctx CryptCATAdminReleaseContextWrapper {
        self.1
    }

    /// Reads a `T` from the start of the pointee.
    ///
    /// # Safety
    ///
    /// The pointer must be non-null, aligned for `T`, and point to an
    /// initialised `T`.
    pub unsafe fn read<T>(&self) -> T {
        // SAFETY: forwarded from the caller.
        unsafe { std::ptr::read(self.0.cast::<T>()) }
    }

    /// Reads a `T` located `offset` bytes into the pointee.
    ///
    /// # Safety
    ///
    /// As [`read`](Self::read), for the address `ptr + offset`.
    pub unsafe fn read_offset<T>(&self, offset: isize) -> T {
        // SAFETY: forwarded from the caller.
        unsafe { std::ptr::read(self.0.cast::<u8>().offset(offset).cast::<T>()) }
    }

    /// Reads the `n`th `T` of an array starting at the pointee.
    ///
    /// # Safety
    ///
    /// The pointee must be an array of at least `n + 1` initialised `T`s.
    pub unsafe fn nth<T>(&self, n: usize) -> T {
        // SAFETY: forwarded from the caller.
        unsafe { std::ptr::read(self.0.cast::<T>().add(n)) }
    }
}

impl Drop for CryptCATAdminReleaseCatalogContextWrapper<'_> {
    fn drop(&mut self) {
        if !self.0.is_null() {
            tracing::trace!(ptr = ?self.0, "releasing catalog context");
            // SAFETY: self.0 was issued by the admin context in self.1,
            // which the borrow keeps alive.
            unsafe {
                CryptCATAdminReleaseCatalogContext(self.1 .0, self.0, 0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winapi::um::winbase::{GlobalAlloc, LocalAlloc};

    #[test]
    fn local_free_wrapper_releases_local_alloc() {
        let mut w = LocalFreeWrapper::from_ptr(unsafe { LocalAlloc(0, 16) });
        assert!(!w.is_null());
        unsafe { w.mut_ptr().cast::<u32>().write(7) };
        assert_eq!(unsafe { w.read::<u32>() }, 7);
    }

    #[test]
    fn global_free_wrapper_releases_global_alloc() {
        let w = GlobalFreeWrapper::from_ptr(unsafe { GlobalAlloc(0, 16) });
        assert!(!w.is_null());
    }

    #[test]
    fn null_wrappers_release_nothing() {
        drop(CloseHandleWrapper::new());
        drop(FreeSidWrapper::new());
        drop(NetApiBufferFreeWrapper::new());
        let admin = CryptCATAdminReleaseContextWrapper::new();
        let catalog = CryptCATAdminReleaseCatalogContextWrapper::new(&admin);
        assert!(catalog.is_null());
        assert!(std::ptr::eq(catalog.admin(), &admin));
    }
}
