use crate::err::*;
use crate::syscall::*;
use crate::types::*;

pub const STDOUT: Fd = Fd(1);
pub const STDERR: Fd = Fd(2);

pub use crate::syscall::OpenFlags;

/// File descriptor
#[derive(Clone)]
pub struct Fd(c_int);

impl Fd {
    pub fn open(path: &CStr, flags: OpenFlags) -> Result<Self, Errno> {
        unsafe { openat(AT_FDCWD, path, flags).map(Self) }
    }

    pub fn read(&self, buf: &mut [u8]) -> Result<usize, Errno> {
        unsafe { read(self.0, buf) }
    }

    /// Read until end of file or until `buf` is full, retrying interrupted reads.
    ///
    /// Returns the number of bytes read.  A return value equal to `buf.len()` means the file may
    /// have been cut short.
    pub fn read_to_end(&self, buf: &mut [u8]) -> Result<usize, Errno> {
        let mut filled = 0;
        while let Some(rest) = buf.get_mut(filled..) {
            if rest.is_empty() {
                break;
            }
            match self.read(rest) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(Errno::EINTR) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    pub fn write(&self, buf: &[u8]) -> Result<usize, Errno> {
        unsafe { write(self.0, buf) }
    }

    pub fn close(self) -> Result<(), Errno> {
        unsafe { close(self.0) }
    }
}

// Fds are not closed on drop.  STDOUT and STDERR are plain constants of this type and must never
// be closed by a temporary going out of scope; the one file this crate opens is closed
// explicitly.
