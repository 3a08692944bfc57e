/// `memset` for zero-initialized arrays and core's fills.
#[cfg(not(test))]
#[unsafe(no_mangle)]
unsafe extern "C" fn memset(
    dest: *mut core::ffi::c_void,
    c: core::ffi::c_int,
    n: usize,
) -> *mut core::ffi::c_void {
    let d = dest as *mut u8;

    // SAFETY: the caller guarantees `dest` is writable for `n` bytes
    for i in 0..n {
        unsafe { core::ptr::write_volatile(d.add(i), c as u8) };
    }
    dest
}
