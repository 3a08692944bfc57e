/// `bcmp` for core's slice comparisons.  Only equality matters: zero when the regions match,
/// non-zero otherwise.
#[cfg(not(test))]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bcmp(
    a: *const core::ffi::c_void,
    b: *const core::ffi::c_void,
    n: usize,
) -> i32 {
    let a = a as *const u8;
    let b = b as *const u8;

    // Volatile reads keep the compiler from turning this loop back into a call to bcmp.
    //
    // SAFETY: the caller guarantees both regions are readable for `n` bytes
    for i in 0..n {
        let (x, y) = unsafe {
            (
                core::ptr::read_volatile(a.add(i)),
                core::ptr::read_volatile(b.add(i)),
            )
        };
        if x != y {
            return 1;
        }
    }
    0
}
