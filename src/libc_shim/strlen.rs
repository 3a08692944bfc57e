use core::ffi::c_char;

/// `strlen` for `CStr::from_ptr`.
#[cfg(not(test))]
#[unsafe(no_mangle)]
unsafe extern "C" fn strlen(s: *const c_char) -> usize {
    let mut len = 0;
    // SAFETY: the caller guarantees `s` is NUL-terminated
    while unsafe { *s.add(len) } != 0 {
        len += 1;
    }
    len
}
