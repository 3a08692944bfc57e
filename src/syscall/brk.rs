use crate::err::*;
use syscalls::{Sysno, syscall};

// `man 2 brk`:
//
// SYNOPSIS
//        int brk(void *addr);
//
// RETURN VALUE
//        The raw Linux system call returns the new program break on success.  On failure, it
//        returns the current break.  Passing 0 therefore always reports the current break.
pub unsafe fn brk(addr: usize) -> Result<usize, Errno> {
    syscall!(Sysno::brk, addr)
}
