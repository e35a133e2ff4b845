//! Fixture entry points: greeting buffer, pair record, empty buffer.
//!
//! Ownership of every returned region passes to the caller, who releases
//! it with `free` (or [`heapfix_free`]). Allocation failure is reported as
//! NULL, or by leaving the output slot untouched; these functions never
//! abort the process.

use std::ffi::{c_char, c_void};
use std::ptr;

use heapfix_core::{allocate_empty_buffer, allocate_greeting_string, new_pair_record, PairRecord};

use crate::status::HeapfixStatus;

/// Allocate a 128-byte zeroed buffer holding `"test 123"` at offset 0.
///
/// Returns NULL if the allocation fails.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn malloc_string() -> *mut c_char {
    ffi_guard_or!(ptr::null_mut(), {
        match allocate_greeting_string() {
            Ok(block) => block.into_raw().cast(),
            Err(_) => ptr::null_mut(),
        }
    })
}

/// Allocate a `{ first = 1, second = 2 }` record and store it in `*ts`.
///
/// `*ts` is left untouched if `ts` is NULL or the allocation fails.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn malloc_struct(ts: *mut *mut c_void) {
    ffi_guard_or!((), {
        if ts.is_null() {
            return;
        }
        let Ok(record) = new_pair_record() else {
            return;
        };
        // SAFETY: ts is non-null and valid for writes per caller contract.
        unsafe { *ts = record.into_raw().cast() };
    })
}

/// Status-returning form of [`malloc_struct`].
///
/// On success writes the record to `*out` and returns `HEAPFIX_STATUS_OK`.
/// On failure `*out` is left untouched.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn heapfix_malloc_struct(out: *mut *mut PairRecord) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return HeapfixStatus::InvalidArgument as i32;
        }
        let record = match new_pair_record() {
            Ok(record) => record,
            Err(e) => return HeapfixStatus::from(&e) as i32,
        };
        // SAFETY: out is non-null and valid for writes per caller contract.
        unsafe { *out = record.into_raw() };
        HeapfixStatus::Ok as i32
    })
}

/// Allocate a 256-byte buffer with every byte zero.
///
/// Returns NULL if the allocation fails.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn malloc_empty_string() -> *mut c_void {
    ffi_guard_or!(ptr::null_mut(), {
        match allocate_empty_buffer() {
            Ok(block) => block.into_raw().cast(),
            Err(_) => ptr::null_mut(),
        }
    })
}

/// Release a region returned by any heapfix entry point. NULL is a no-op.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn heapfix_free(p: *mut c_void) {
    // SAFETY: p is NULL or a C-heap region the caller owns.
    unsafe { libc::free(p) }
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use heapfix_test_utils::{first_nonzero, hex, GREETING_BYTES};
    use proptest::prelude::*;

    fn bytes<'a>(p: *const c_void, len: usize) -> &'a [u8] {
        assert!(!p.is_null());
        unsafe { std::slice::from_raw_parts(p.cast::<u8>(), len) }
    }

    #[test]
    fn malloc_string_layout() {
        let p = malloc_string();
        let region = bytes(p.cast::<c_void>(), 128);
        assert_eq!(hex(&region[..9]), "74 65 73 74 20 31 32 33 00");
        assert_eq!(&region[..9], &GREETING_BYTES);
        assert_eq!(first_nonzero(&region[9..]), None);
        heapfix_free(p.cast());
    }

    #[test]
    fn malloc_struct_writes_slot() {
        let mut ts: *mut c_void = ptr::null_mut();
        malloc_struct(&mut ts);
        assert!(!ts.is_null());
        let record = unsafe { *ts.cast::<PairRecord>() };
        assert_eq!(record, PairRecord { first: 1, second: 2 });
        heapfix_free(ts);
    }

    #[test]
    fn malloc_struct_null_slot_is_ignored() {
        malloc_struct(ptr::null_mut());
    }

    #[test]
    fn heapfix_malloc_struct_reports_status() {
        let mut out: *mut PairRecord = ptr::null_mut();
        assert_eq!(heapfix_malloc_struct(&mut out), HeapfixStatus::Ok as i32);
        assert_eq!(unsafe { *out }, PairRecord::fixture());
        heapfix_free(out.cast());

        assert_eq!(
            heapfix_malloc_struct(ptr::null_mut()),
            HeapfixStatus::InvalidArgument as i32
        );
    }

    #[test]
    fn malloc_empty_string_is_zero() {
        let p = malloc_empty_string();
        assert_eq!(first_nonzero(bytes(p, 256)), None);
        heapfix_free(p);
    }

    #[test]
    fn heapfix_free_accepts_null() {
        heapfix_free(ptr::null_mut());
    }

    proptest! {
        #[test]
        fn greeting_regions_do_not_alias(offset in 0usize..128, value: u8) {
            let a = malloc_string();
            let b = malloc_string();
            prop_assert_ne!(a, b);
            unsafe { *a.cast::<u8>().add(offset) = value };
            let region = bytes(b.cast::<c_void>(), 128);
            prop_assert_eq!(&region[..9], &GREETING_BYTES[..]);
            prop_assert_eq!(first_nonzero(&region[9..]), None);
            heapfix_free(a.cast());
            heapfix_free(b.cast());
        }
    }
}
