//! Kernel-assisted title relocation (Linux `PR_SET_MM_MAP`)
//!
//! The kernel serves /proc/[pid]/cmdline from the `[arg_start, arg_end)` range recorded in the
//! process's memory descriptor.  `PR_SET_MM_MAP` replaces that descriptor wholesale, so the range
//! can be pointed at a buffer of any size.  Every other field must be handed back unchanged,
//! which is why the current values are read from /proc/self/stat first.

use crate::err::Error;
use crate::log;
use crate::os::{Hex, Mapping, program_break};
use crate::syscall::{PrctlMmOption, prctl_mm};
use crate::title::{ArgBlock, MemoryLayout};
use crate::types::prctl_mm_map;
use crate::util::mem::memcpy_volatile;

/// A title buffer the kernel now reports as the process's arguments
#[derive(Debug)]
pub struct Grown {
    pub block: ArgBlock,
    pub mapping: Mapping,
}

/// Check that the kernel offers `PR_SET_MM_MAP` with the structure layout we were built for.
pub fn probe() -> Result<(), Error> {
    let mut found: u32 = 0;
    // SAFETY: PR_SET_MM_MAP_SIZE writes one u32 through the pointer
    unsafe {
        prctl_mm(
            PrctlMmOption::PR_SET_MM_MAP_SIZE,
            &mut found as *mut u32 as usize,
            0,
        )
    }
    .map_err(Error::Unsupported)?;

    let expected = prctl_mm_map::size() as u32;
    if found != expected {
        return Err(Error::StructureMismatch { expected, found });
    }
    Ok(())
}

/// Move the kernel's argument range to a new buffer holding exactly `title` and its NUL.
///
/// Nothing is modified unless every check passes.  If the kernel refuses the new layout, the
/// buffer is returned to it and the previous title keeps displaying.
pub fn try_grow(title: &[u8]) -> Result<Grown, Error> {
    probe()?;
    let layout = MemoryLayout::read_self()?;
    let brk = program_break().map_err(Error::StatusRead)?;

    let capacity = title.len() + 1;
    let mapping = Mapping::new(capacity).map_err(Error::Allocation)?;

    // SAFETY: the mapping is at least `capacity` bytes and freshly zeroed, so the terminator is
    // already in place.
    unsafe { memcpy_volatile(mapping.as_mut_ptr(), title) };

    let arg_start = mapping.as_mut_ptr() as u64;
    let map = prctl_mm_map {
        start_code: layout.start_code,
        end_code: layout.end_code,
        start_data: layout.start_data,
        end_data: layout.end_data,
        start_brk: layout.start_brk,
        brk: brk as u64,
        start_stack: layout.start_stack,
        arg_start,
        arg_end: arg_start + capacity as u64,
        env_start: layout.env_start,
        env_end: layout.env_end,
        auxv: core::ptr::null_mut(),
        auxv_size: 0,
        exe_fd: prctl_mm_map::EXE_FD_UNCHANGED,
    };

    // SAFETY: the kernel copies `map` in and validates every address itself
    let applied = unsafe {
        prctl_mm(
            PrctlMmOption::PR_SET_MM_MAP,
            &map as *const prctl_mm_map as usize,
            prctl_mm_map::size(),
        )
    };

    if let Err(e) = applied {
        // The kernel never adopted the buffer, so it can go back.
        let _ = mapping.unmap();
        return Err(Error::KernelRejection(e));
    }

    log::debug_value("argument range moved to ", Hex(arg_start as usize));

    // SAFETY: the mapping is process-owned, writable, and `capacity` bytes long
    let block = unsafe { ArgBlock::from_raw_parts(mapping.as_mut_ptr(), capacity) };
    Ok(Grown { block, mapping })
}

/// Held by tests that move the real process's argument range, so they do not observe each other
#[cfg(test)]
pub static TEST_RANGE_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
