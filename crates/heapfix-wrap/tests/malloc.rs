//! Wrappers adopting the regions returned by the C-ABI fixtures.

use heapfix_core::PairRecord;
use heapfix_ffi::{malloc_empty_string, malloc_string, malloc_struct};
use heapfix_test_utils::first_nonzero;
use heapfix_wrap::{FreeWrapper, FromPointer, HasPointer};
use std::ffi::CStr;

#[test]
fn malloc_string_reads_back() {
    let fw = FreeWrapper::from_ptr(malloc_string().cast());
    assert!(!fw.is_null());
    let s = unsafe { CStr::from_ptr(fw.ptr().cast()) };
    assert_eq!(s.to_str().unwrap(), "test 123");
}

#[test]
fn malloc_string_tail_is_zero() {
    let fw = FreeWrapper::from_ptr(malloc_string().cast());
    let bytes: Vec<u8> = (0..128).map(|i| unsafe { fw.nth::<u8>(i) }).collect();
    assert_eq!(&bytes[..9], b"test 123\0");
    assert_eq!(first_nonzero(&bytes[9..]), None);
}

#[test]
fn malloc_struct_fills_output_slot() {
    let mut fw = FreeWrapper::new();
    malloc_struct(fw.mut_ref());
    assert!(!fw.is_null());

    let ts: PairRecord = unsafe { fw.read() };
    assert_eq!(ts.first, 1);
    assert_eq!(ts.second, 2);
    assert_eq!(
        unsafe { fw.read_offset::<i32>(std::mem::size_of::<i32>() as isize) },
        2
    );
}

#[test]
fn malloc_empty_string_accepts_writes() {
    let mut fw = FreeWrapper::from_ptr(malloc_empty_string());
    assert_eq!(
        unsafe { CStr::from_ptr(fw.ptr().cast()) }.to_bytes(),
        b"",
        "empty buffer starts with a terminator"
    );

    unsafe { std::ptr::write_bytes(fw.mut_ptr().cast::<u8>(), b'a', 1) };
    let s = unsafe { CStr::from_ptr(fw.ptr().cast()) };
    assert_eq!(s.to_str().unwrap(), "a");
}

#[test]
fn into_raw_hands_region_back() {
    let fw = FreeWrapper::from_ptr(malloc_empty_string());
    let raw = fw.into_raw();
    assert!(!raw.is_null());
    heapfix_ffi::heapfix_free(raw);
}
