use crate::types::c_int;

/// Terminate every thread of the process
#[inline]
pub fn exit(status: c_int) -> ! {
    unsafe { crate::syscall::exit_group(status) }
}
