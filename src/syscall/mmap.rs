use crate::err::*;
use crate::types::*;
use core::ops::BitOr;
use syscalls::{Sysno, syscall};

#[derive(Clone, Copy)]
pub struct ProtFlags(c_int);

impl ProtFlags {
    pub const PROT_READ: Self = Self(0x1);
    pub const PROT_WRITE: Self = Self(0x2);

    pub const fn bits(self) -> c_int {
        self.0
    }
}

impl BitOr for ProtFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

#[derive(Clone, Copy)]
pub struct MapFlags(c_int);

impl MapFlags {
    pub const MAP_PRIVATE: Self = Self(0x02);
    pub const MAP_ANONYMOUS: Self = Self(0x20);

    pub const fn bits(self) -> c_int {
        self.0
    }
}

impl BitOr for MapFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

// `man 2 mmap`:
//
// SYNOPSIS
//        void *mmap(void addr[.length], size_t length, int prot, int flags,
//                   int fd, off_t offset);
//
// RETURN VALUE
//        On success, mmap() returns a pointer to the mapped area.  On error, the value MAP_FAILED
//        (that is, (void *) -1) is returned, and errno is set to indicate the error.
pub unsafe fn mmap(
    len: usize,
    prot: ProtFlags,
    flags: MapFlags,
    fd: c_int,
    offset: off_t,
) -> Result<*mut u8, Errno> {
    syscall!(
        Sysno::mmap,
        0usize,
        len,
        prot.bits(),
        flags.bits(),
        fd,
        offset
    )
    .map(|addr| addr as *mut u8)
}

// `man 2 munmap`:
//
// SYNOPSIS
//        int munmap(void addr[.length], size_t length);
//
// RETURN VALUE
//        On success, munmap() returns 0.  On failure, it returns -1, and errno is set to indicate
//        the error (probably to EINVAL).
pub unsafe fn munmap(addr: *mut u8, len: usize) -> Result<(), Errno> {
    syscall!(Sysno::munmap, addr, len).map(|_| ())
}
