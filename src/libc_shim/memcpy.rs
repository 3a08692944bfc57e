/// `memcpy` for core's copies.  Regions must not overlap.
#[cfg(not(test))]
#[unsafe(no_mangle)]
unsafe extern "C" fn memcpy(
    dest: *mut core::ffi::c_void,
    src: *const core::ffi::c_void,
    n: usize,
) -> *mut core::ffi::c_void {
    let d = dest as *mut u8;
    let s = src as *const u8;

    // Volatile accesses keep the compiler from turning this loop back into a call to memcpy.
    //
    // SAFETY: the caller guarantees both regions are valid for `n` bytes and disjoint
    for i in 0..n {
        unsafe { core::ptr::write_volatile(d.add(i), core::ptr::read_volatile(s.add(i))) };
    }
    dest
}
