/// Length of the NUL-terminated prefix of `buf`, or `buf.len()` if it holds no NUL
pub fn strnlen(buf: &[u8]) -> usize {
    buf.iter().position(|&b| b == 0).unwrap_or(buf.len())
}

/// `buf` up to, not including, its first NUL
pub fn until_nul(buf: &[u8]) -> &[u8] {
    buf.get(..strnlen(buf)).unwrap_or(buf)
}

/// Zero `len` bytes starting at `dst`.
///
/// Volatile writes keep the stores even though nothing in this process reads them back; the
/// reader is the kernel, on behalf of another process.
///
/// # Safety
/// - `dst..dst+len` must be valid for writes.
pub unsafe fn memzero_volatile(dst: *mut u8, len: usize) {
    for i in 0..len {
        unsafe { core::ptr::write_volatile(dst.add(i), 0) };
    }
}

/// Copy `src` to `dst` with volatile stores.
///
/// # Safety
/// - `dst..dst+src.len()` must be valid for writes and must not overlap `src`.
pub unsafe fn memcpy_volatile(dst: *mut u8, src: &[u8]) {
    for (i, &b) in src.iter().enumerate() {
        unsafe { core::ptr::write_volatile(dst.add(i), b) };
    }
}
