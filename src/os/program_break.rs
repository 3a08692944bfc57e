use crate::err::Errno;

/// Current program break of the calling process
#[inline]
pub fn program_break() -> Result<usize, Errno> {
    // SAFETY: brk(0) never moves the break, it only reports it
    unsafe { crate::syscall::brk(0) }
}
