use crate::err::*;
use crate::syscall::*;

/// Anonymous, private, read-write memory obtained straight from the kernel.
///
/// This is the crate's only source of heap-like storage, so no global allocator is required.
#[derive(Debug)]
pub struct Mapping {
    ptr: *mut u8,
    len: usize,
}

// The mapping is plain process memory; which thread touches it is up to the owner.
unsafe impl Send for Mapping {}

impl Mapping {
    /// Map `len` zeroed bytes.  The kernel rounds the mapping up to whole pages.
    pub fn new(len: usize) -> Result<Self, Errno> {
        if len == 0 {
            return Err(Errno::EINVAL);
        }
        let ptr = unsafe {
            mmap(
                len,
                ProtFlags::PROT_READ | ProtFlags::PROT_WRITE,
                MapFlags::MAP_PRIVATE | MapFlags::MAP_ANONYMOUS,
                -1,
                0,
            )
        }?;
        Ok(Self { ptr, len })
    }

    #[inline]
    pub fn as_mut_ptr(&self) -> *mut u8 {
        self.ptr
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return the memory to the kernel.
    ///
    /// Only call this once nothing, including the kernel's view of the process, refers to the
    /// mapping any more.
    pub fn unmap(self) -> Result<(), Errno> {
        unsafe { munmap(self.ptr, self.len) }
    }
}

// Mappings are not unmapped on drop.  Relocated environment and argument strings must outlive
// every reader in the process, and a title buffer may be referenced by the kernel's
// arg_start/arg_end.  Owners decide explicitly when a mapping can go.
