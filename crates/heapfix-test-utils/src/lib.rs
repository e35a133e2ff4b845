//! Test utilities for inspecting heapfix regions.
//!
//! Pure byte-slice helpers: callers turn their regions into `&[u8]`
//! however they like (owned block, raw pointer from the C ABI) and use
//! these to assert on contents.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::fmt::Write;

/// `"test 123"` followed by its NUL terminator.
pub const GREETING_BYTES: [u8; 9] = *b"test 123\0";

/// Index of the first non-zero byte, if any.
pub fn first_nonzero(bytes: &[u8]) -> Option<usize> {
    bytes.iter().position(|&b| b != 0)
}

/// Bytes up to (not including) the first NUL, or the whole slice.
pub fn c_str_bytes(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}

/// Space-separated lowercase hex, e.g. `"74 65 73"`.
pub fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{b:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_nonzero_finds_offset() {
        assert_eq!(first_nonzero(&[0, 0, 3, 0]), Some(2));
        assert_eq!(first_nonzero(&[0; 16]), None);
        assert_eq!(first_nonzero(&[]), None);
    }

    #[test]
    fn c_str_bytes_stops_at_nul() {
        assert_eq!(c_str_bytes(b"ab\0cd"), b"ab");
        assert_eq!(c_str_bytes(b"abc"), b"abc");
    }

    #[test]
    fn hex_of_greeting() {
        assert_eq!(hex(&GREETING_BYTES), "74 65 73 74 20 31 32 33 00");
    }
}
