#![cfg(windows)]

//! LSA buffers adopted through an output slot.

use heapfix_wrap::windows::LsaFreeReturnBufferWrapper;
use heapfix_wrap::HasPointer;
use winapi::um::ntlsa::LsaEnumerateLogonSessions;

#[test]
fn lsa_free_return_buffer() {
    let mut logon_sessions = LsaFreeReturnBufferWrapper::new();
    let mut logon_session_count: u32 = 0;

    let status = unsafe {
        LsaEnumerateLogonSessions(&mut logon_session_count, logon_sessions.mut_ref().cast())
    };

    assert_eq!(status, 0, "LsaEnumerateLogonSessions failed: {status:#x}");
    assert!(logon_session_count == 0 || !logon_sessions.is_null());
}
