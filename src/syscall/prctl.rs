use crate::err::*;
use crate::types::*;
use syscalls::{Sysno, syscall};

/// prctl operations
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub enum PrctlOption {
    /// Set the calling thread's name (visible in /proc/[pid]/task/[tid]/comm)
    PR_SET_NAME = 15,
    /// Read the calling thread's name into a 16 byte buffer
    PR_GET_NAME = 16,
    /// Modify kernel memory map descriptor fields of the calling process
    PR_SET_MM = 35,
}

impl PrctlOption {
    pub fn bits(self) -> c_int {
        self as c_int
    }
}

/// PR_SET_MM sub-operations
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub enum PrctlMmOption {
    /// Replace all memory map fields at once from a `prctl_mm_map`
    PR_SET_MM_MAP = 14,
    /// Report the size of `prctl_mm_map` the kernel expects
    PR_SET_MM_MAP_SIZE = 15,
}

impl PrctlMmOption {
    pub fn bits(self) -> c_int {
        self as c_int
    }
}

// `man 2 prctl`:
//
// SYNOPSIS
//        int prctl(int option, unsigned long arg2, unsigned long arg3,
//                  unsigned long arg4, unsigned long arg5);
//
// RETURN VALUE
//        On success, PR_GET_NAME and PR_SET_NAME return 0.  On error, -1 is returned, and errno is
//        set to indicate the error.

/// Perform operations on a process or thread
pub unsafe fn prctl(option: PrctlOption, arg2: usize) -> Result<(), Errno> {
    syscall!(Sysno::prctl, option.bits(), arg2, 0, 0, 0).map(|_| ())
}

/// Perform a PR_SET_MM operation
///
/// `arg` points at the operation's argument and `size` is its byte length where the operation
/// takes one (PR_SET_MM_MAP) or zero otherwise.
pub unsafe fn prctl_mm(option: PrctlMmOption, arg: usize, size: usize) -> Result<(), Errno> {
    syscall!(
        Sysno::prctl,
        PrctlOption::PR_SET_MM.bits(),
        option.bits(),
        arg,
        size,
        0
    )
    .map(|_| ())
}
