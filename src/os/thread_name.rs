use crate::constants::THREAD_NAME_SIZE;
use crate::err::Errno;
use crate::syscall::PrctlOption;

/// Short kernel name of a thread: up to 15 visible bytes plus the terminating NUL.
///
/// This name appears in /proc/[pid]/task/[tid]/comm and in tools like htop, ps -L, and pstree.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ThreadName([u8; THREAD_NAME_SIZE]);

impl ThreadName {
    pub const fn empty() -> Self {
        Self([0; THREAD_NAME_SIZE])
    }

    /// Build a name from `name`, stopping at the first NUL and truncating to 15 bytes.
    pub fn new(name: &[u8]) -> Self {
        let mut buf = [0u8; THREAD_NAME_SIZE];
        for (dst, &src) in buf
            .iter_mut()
            .take(THREAD_NAME_SIZE - 1)
            .zip(name.iter().take_while(|&&b| b != 0))
        {
            *dst = src;
        }
        Self(buf)
    }

    pub fn as_bytes(&self) -> &[u8] {
        let len = self.0.iter().position(|&b| b == 0).unwrap_or(self.0.len());
        self.0.get(..len).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }
}

impl core::fmt::Debug for ThreadName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("ThreadName")
            .field(&self.as_bytes().escape_ascii())
            .finish()
    }
}

/// Set the calling thread's kernel name
#[inline]
pub fn set_thread_name(name: &ThreadName) -> Result<(), Errno> {
    // SAFETY: the buffer is 16 bytes and always NUL-terminated by construction
    unsafe { crate::syscall::prctl(PrctlOption::PR_SET_NAME, name.0.as_ptr() as usize) }
}

/// Read the calling thread's kernel name
#[inline]
pub fn get_thread_name() -> Result<ThreadName, Errno> {
    let mut name = ThreadName::empty();
    // SAFETY: PR_GET_NAME writes at most 16 bytes, including the NUL
    unsafe { crate::syscall::prctl(PrctlOption::PR_GET_NAME, name.0.as_mut_ptr() as usize) }?;
    // Guarantee termination regardless of what the kernel wrote
    name.0[THREAD_NAME_SIZE - 1] = 0;
    Ok(name)
}
