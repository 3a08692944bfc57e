use crate::types::CStr;

/// Kernel thread name buffer, including the terminating NUL (TASK_COMM_LEN)
pub const THREAD_NAME_SIZE: usize = 16;

/// How far below the first environment string the argument scan may walk before giving up.
///
/// Argument strings sit immediately below the environment strings; anything further away is
/// unrelated memory.
pub const ARGV_SCAN_LIMIT: usize = 8192;

/// Path of the process status pseudo-file read by the kernel relocation path
pub const PROC_SELF_STAT: &CStr = c"/proc/self/stat";

/// /proc/self/stat is a single line of 52 fields.  Even with every numeric field at its widest
/// and a maximal process name it stays well below this.
pub const PROC_STAT_BUF_SIZE: usize = 2048;

/// Prefix of every debug log line
pub const LOG_PREFIX: &str = "[proctitle] ";

// Runtime configuration overrides read from the host environment at setup.

/// Do not relocate the environment; title capacity is limited to the argument strings.
pub const ENV_NOENV: &[u8] = b"PROCTITLE_NOENV";
/// Never move the kernel's argument range.
pub const ENV_NOGROW: &[u8] = b"PROCTITLE_NOGROW";
/// Write debug lines to stderr.
pub const ENV_DEBUG: &[u8] = b"PROCTITLE_DEBUG";
