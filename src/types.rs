//! System call types that are strongly associated with specific system calls are defined in the
//! corresponding system call file.  Those shared across many, or mirrored from kernel headers,
//! are defined here.

#[allow(non_camel_case_types)]
pub type off_t = i64;

#[allow(non_camel_case_types)]
pub type c_int = core::ffi::c_int;

#[allow(non_camel_case_types)]
pub type c_char = core::ffi::c_char;

pub type CStr = core::ffi::CStr;

#[allow(non_camel_case_types)]
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct timespec {
    pub tv_sec: i64,
    pub tv_nsec: i64,
}
const _: () = assert!(core::mem::size_of::<timespec>() == 16);

/// Mirror of `struct prctl_mm_map` from `include/uapi/linux/prctl.h`.
///
/// The kernel reports the size it expects through `PR_SET_MM_MAP_SIZE`; the relocation path is
/// only attempted when that answer equals `size_of::<prctl_mm_map>()`.
#[allow(non_camel_case_types)]
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct prctl_mm_map {
    pub start_code: u64,
    pub end_code: u64,
    pub start_data: u64,
    pub end_data: u64,
    pub start_brk: u64,
    pub brk: u64,
    pub start_stack: u64,
    pub arg_start: u64,
    pub arg_end: u64,
    pub env_start: u64,
    pub env_end: u64,
    pub auxv: *mut u64,
    pub auxv_size: u32,
    pub exe_fd: u32,
}
const _: () = assert!(core::mem::size_of::<prctl_mm_map>() == 104);

impl prctl_mm_map {
    /// `exe_fd` value telling the kernel to leave /proc/self/exe alone
    pub const EXE_FD_UNCHANGED: u32 = u32::MAX;

    pub const fn size() -> usize {
        core::mem::size_of::<Self>()
    }
}
