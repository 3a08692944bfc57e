//! # Error handling
//!
//! Nothing in this crate is fatal to the hosting process.  Every failure degrades to "the title
//! capacity stays where it was":
//!
//! - Discovery of the argument block fails: fall back to `argv[0]`'s own bytes.
//! - The kernel relocation path is unavailable or refuses: keep writing into the fixed block.
//! - An allocation fails: leave the previous state untouched.
//!
//! Thin system call wrappers return the raw `Errno`.  The title engine maps those into `Error`,
//! which is reported upward for the host to log or ignore.  Nothing is retried automatically.

use crate::os::{Fd, Print};

pub type Errno = syscalls::Errno;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The argument block could not be located or `argv[0]` did not match memory
    Discovery,
    /// The kernel's `prctl_mm_map` differs in size from ours
    StructureMismatch { expected: u32, found: u32 },
    /// The kernel does not offer `PR_SET_MM_MAP` at all
    Unsupported(Errno),
    /// /proc/self/stat did not have the expected field layout
    Parse,
    /// /proc/self/stat could not be opened or read
    StatusRead(Errno),
    /// The kernel refused to move the argument range
    KernelRejection(Errno),
    /// Memory for a copy or a new title buffer could not be mapped
    Allocation(Errno),
}

impl Error {
    /// Whether retrying the kernel relocation path could ever succeed without a change in system
    /// state.  Permanent failures switch the process to the fixed-capacity writer for good.
    pub fn is_permanent(&self) -> bool {
        match self {
            Error::StructureMismatch { .. }
            | Error::Unsupported(_)
            | Error::Parse
            | Error::KernelRejection(_) => true,
            Error::Discovery | Error::StatusRead(_) | Error::Allocation(_) => false,
        }
    }

    pub fn errno(&self) -> Option<Errno> {
        match self {
            Error::Unsupported(e)
            | Error::StatusRead(e)
            | Error::KernelRejection(e)
            | Error::Allocation(e) => Some(*e),
            Error::Discovery | Error::StructureMismatch { .. } | Error::Parse => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Error::Discovery => "argument block not found",
            Error::StructureMismatch { .. } => "prctl_mm_map size mismatch",
            Error::Unsupported(_) => "PR_SET_MM_MAP unsupported",
            Error::Parse => "unexpected /proc/self/stat layout",
            Error::StatusRead(_) => "unable to read /proc/self/stat",
            Error::KernelRejection(_) => "kernel refused PR_SET_MM_MAP",
            Error::Allocation(_) => "unable to map memory",
        }
    }
}

impl Print for Error {
    fn print(&self, fd: Fd) {
        self.as_str().print(fd.clone());

        if let Error::StructureMismatch { expected, found } = self {
            ": expected ".print(fd.clone());
            expected.print(fd.clone());
            " found ".print(fd.clone());
            found.print(fd);
            return;
        }

        if let Some(e) = self.errno().and_then(|e| e.description()) {
            ": ".print(fd.clone());
            e.print(fd);
        }
    }
}
