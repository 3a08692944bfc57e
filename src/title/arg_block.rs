use crate::constants::ARGV_SCAN_LIMIT;
use crate::err::Error;
use crate::os::{Argv, Envp};
use core::ffi::CStr;

/// The contiguous byte range that held `argv[0..argc)` back to back, NUL-separated, possibly
/// extended over the environment strings that followed it.
///
/// A block is only ever built from memory that was verified to look like an argument area, and
/// is never resized afterwards; a larger block is a new value.  Only the bytes it covers change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArgBlock {
    start: *mut u8,
    capacity: usize,
}

// The block addresses process-lifetime memory; access is serialized by the title engine's lock.
unsafe impl Send for ArgBlock {}

impl ArgBlock {
    /// # Safety
    /// - `start..start+capacity` must be valid for reads and writes for the rest of the process.
    /// - `capacity` must be non-zero.
    pub unsafe fn from_raw_parts(start: *mut u8, capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self { start, capacity }
    }

    /// Find the argument block by walking backward from the first environment string.
    ///
    /// The kernel lays out argument strings immediately before environment strings.  Starting
    /// just below `envp[0]`, `argc - 1` NUL-terminated strings are counted off by their NUL
    /// boundaries, then the bytes below them must equal `argv[0]` exactly.  Only `argv[0]` is
    /// taken from the host, so this works even when the host's `argv` table no longer points at
    /// the original strings.
    ///
    /// Needs at least one environment string as the anchor; with an empty environment this always
    /// fails and `from_adjacent_args` is the next best thing.
    pub fn locate(argv: &Argv, envp: &Envp) -> Result<Self, Error> {
        let arg0 = argv.first().ok_or(Error::Discovery)?.to_bytes();
        let anchor = envp.ptr(0).ok_or(Error::Discovery)? as *mut u8;

        // SAFETY: the scan reads at most ARGV_SCAN_LIMIT bytes below the first environment
        // string, which on Linux is the argument area and the stack above the initial frame.
        let capacity = unsafe { scan_back(anchor, argv.len(), arg0) }?;

        Ok(Self {
            start: anchor.wrapping_sub(capacity),
            capacity,
        })
    }

    /// Block covering only `argv[0]` and its NUL, wherever the host keeps it.
    pub fn from_first_arg(argv: &Argv) -> Result<Self, Error> {
        let arg0 = argv.first().ok_or(Error::Discovery)?;
        Ok(Self {
            start: arg0.as_ptr() as *mut u8,
            capacity: arg0.to_bytes_with_nul().len(),
        })
    }

    /// Block covering `argv[0]` and each following argument whose string starts exactly where the
    /// previous one ended, following the host's own pointers.
    ///
    /// Unlike `locate` this needs no environment, but it trusts the host's `argv` table to still
    /// point at the original strings.
    pub fn from_adjacent_args(argv: &Argv) -> Result<Self, Error> {
        Ok(Self::from_first_arg(argv)?.extend_over(argv.iter().skip(1)))
    }

    /// This block grown over every environment string that starts exactly where the previous
    /// string ended.
    ///
    /// Reads only.  The strings must be relocated before anything is written to the extension.
    pub fn extend_over_environ(self, envp: &Envp) -> Self {
        self.extend_over(envp.iter())
    }

    fn extend_over<'s>(self, strings: impl Iterator<Item = &'s CStr>) -> Self {
        let mut capacity = self.capacity;
        for entry in strings {
            if entry.as_ptr() as *const u8 != self.start.wrapping_add(capacity) {
                break;
            }
            capacity += entry.to_bytes_with_nul().len();
        }
        Self {
            start: self.start,
            capacity,
        }
    }

    #[inline]
    pub fn start(&self) -> *mut u8 {
        self.start
    }

    /// One past the last byte
    #[inline]
    pub fn end(&self) -> *mut u8 {
        self.start.wrapping_add(self.capacity)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Longest title the block can display, keeping one byte for the terminator
    #[inline]
    pub fn max_len(&self) -> usize {
        self.capacity.saturating_sub(1)
    }

    #[inline]
    pub fn contains(&self, p: *const u8) -> bool {
        let addr = p as usize;
        addr >= self.start as usize && addr < self.end() as usize
    }
}

/// Walk backward from `anchor` over `argc - 1` strings and check `arg0` sits below them.
///
/// Returns the distance from the start of `argv[0]` to `anchor`.
///
/// # Safety
/// - The `ARGV_SCAN_LIMIT` bytes below `anchor` must be readable.
unsafe fn scan_back(anchor: *const u8, argc: usize, arg0: &[u8]) -> Result<usize, Error> {
    let at = |offset: usize| unsafe { *anchor.wrapping_sub(offset) };

    // Offset of the terminator of the string currently being walked over, starting with the last
    // argument.
    let mut offset = 1;

    for _ in 1..argc {
        if at(offset) != 0 {
            return Err(Error::Discovery);
        }
        loop {
            offset += 1;
            if offset >= ARGV_SCAN_LIMIT {
                return Err(Error::Discovery);
            }
            if at(offset) == 0 {
                break;
            }
        }
    }

    // Now on the terminator of argv[0]
    if at(offset) != 0 {
        return Err(Error::Discovery);
    }

    let start = offset + arg0.len();
    if start >= ARGV_SCAN_LIMIT {
        return Err(Error::Discovery);
    }

    let found = unsafe { core::slice::from_raw_parts(anchor.wrapping_sub(start), arg0.len()) };
    if found != arg0 {
        return Err(Error::Discovery);
    }

    Ok(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::title::test_util::FakeProcess;
    use std::vec::Vec;

    fn strings(block: &ArgBlock) -> Vec<Vec<u8>> {
        let bytes = unsafe { core::slice::from_raw_parts(block.start(), block.capacity()) };
        bytes
            .strip_suffix(b"\0")
            .unwrap()
            .split(|&b| b == 0)
            .map(|s| s.to_vec())
            .collect()
    }

    #[test]
    fn test_locate_reconstructs_arguments() {
        let mut proc = FakeProcess::new(&["myproc", "--flag"], &["HOME=/root"]);
        let (argv, envp) = proc.tables();
        let block = ArgBlock::locate(&argv, &envp).unwrap();
        assert_eq!(block.start(), proc.args_start());
        assert_eq!(block.capacity(), 14);
        assert_eq!(block.max_len(), 13);
        assert_eq!(strings(&block), [b"myproc".to_vec(), b"--flag".to_vec()]);
    }

    #[test]
    fn test_locate_single_argument() {
        let mut proc = FakeProcess::new(&["daemon"], &["A=1"]);
        let (argv, envp) = proc.tables();
        let block = ArgBlock::locate(&argv, &envp).unwrap();
        assert_eq!(block.start(), proc.args_start());
        assert_eq!(block.capacity(), 7);
    }

    #[test]
    fn test_locate_identical_and_empty_arguments() {
        let args = ["prog", "x", "x", "", "x"];
        let mut proc = FakeProcess::new(&args, &["A=1"]);
        let (argv, envp) = proc.tables();
        let block = ArgBlock::locate(&argv, &envp).unwrap();
        let expected: Vec<Vec<u8>> = args.iter().map(|a| a.as_bytes().to_vec()).collect();
        assert_eq!(strings(&block), expected);
    }

    #[test]
    fn test_locate_works_with_detached_argv() {
        let mut proc = FakeProcess::new(&["myproc", "-m", "mod"], &["A=1"]);
        proc.detach_argv();
        let (argv, envp) = proc.tables();
        assert!(!ArgBlock::from_first_arg(&argv).unwrap().contains(proc.args_start()));
        let block = ArgBlock::locate(&argv, &envp).unwrap();
        assert_eq!(block.start(), proc.args_start());
        assert_eq!(block.capacity(), 14);
    }

    #[test]
    fn test_locate_rejects_mismatched_first_argument() {
        let mut proc = FakeProcess::new(&["myproc", "--flag"], &["A=1"]);
        proc.replace_first_arg("yourpr");
        let (argv, envp) = proc.tables();
        assert_eq!(ArgBlock::locate(&argv, &envp), Err(Error::Discovery));
    }

    #[test]
    fn test_locate_rejects_longer_first_argument() {
        let mut proc = FakeProcess::new(&["myproc", "--flag"], &["A=1"]);
        proc.replace_first_arg("somemyproc");
        let (argv, envp) = proc.tables();
        assert_eq!(ArgBlock::locate(&argv, &envp), Err(Error::Discovery));
    }

    #[test]
    fn test_locate_needs_environment_anchor() {
        let mut proc = FakeProcess::new(&["myproc"], &[]);
        let (argv, envp) = proc.tables();
        assert_eq!(ArgBlock::locate(&argv, &envp), Err(Error::Discovery));
    }

    #[test]
    fn test_locate_rejects_gap_before_environment() {
        let mut proc = FakeProcess::with_gap(&["myproc", "--flag"], &["A=1"], 3);
        let (argv, envp) = proc.tables();
        assert_eq!(ArgBlock::locate(&argv, &envp), Err(Error::Discovery));
    }

    #[test]
    fn test_from_first_arg_covers_only_argv0() {
        let mut proc = FakeProcess::new(&["myproc", "--flag"], &["A=1"]);
        let (argv, _) = proc.tables();
        let block = ArgBlock::from_first_arg(&argv).unwrap();
        assert_eq!(block.start(), proc.args_start());
        assert_eq!(block.capacity(), 7);
    }

    #[test]
    fn test_extend_over_contiguous_environment() {
        let mut proc = FakeProcess::new(&["myproc", "--flag"], &["HOME=/root", "A=1"]);
        let (argv, envp) = proc.tables();
        let block = ArgBlock::locate(&argv, &envp).unwrap();
        let extended = block.extend_over_environ(&envp);
        assert_eq!(extended.start(), block.start());
        assert_eq!(extended.capacity(), 14 + 11 + 4);
        assert_eq!(extended.end(), proc.strings_end());
    }

    #[test]
    fn test_extend_stops_at_first_gap() {
        let mut proc = FakeProcess::new(&["myproc"], &["HOME=/root", "A=1"]);
        let moved = std::ffi::CString::new("A=1").unwrap();
        proc.point_env_at(1, moved.as_ptr());
        let (argv, envp) = proc.tables();
        let block = ArgBlock::locate(&argv, &envp).unwrap();
        assert_eq!(block.extend_over_environ(&envp).capacity(), 7 + 11);
    }

    #[test]
    fn test_contains() {
        let mut proc = FakeProcess::new(&["ab"], &["A=1"]);
        let (argv, envp) = proc.tables();
        let block = ArgBlock::locate(&argv, &envp).unwrap();
        assert!(block.contains(block.start()));
        assert!(block.contains(block.start().wrapping_add(2)));
        assert!(!block.contains(block.end()));
    }

    #[test]
    fn test_adjacent_args_without_environment() {
        let mut proc = FakeProcess::new(&["myproc", "--flag", "x"], &[]);
        let (argv, envp) = proc.tables();
        assert_eq!(ArgBlock::locate(&argv, &envp), Err(Error::Discovery));
        let block = ArgBlock::from_adjacent_args(&argv).unwrap();
        assert_eq!(block.start(), proc.args_start());
        assert_eq!(block.capacity(), 16);
        assert_eq!(block.end(), proc.strings_end());
    }

    #[test]
    fn test_adjacent_args_stop_at_moved_argument() {
        let mut proc = FakeProcess::new(&["myproc", "--flag", "x"], &[]);
        let moved = std::ffi::CString::new("--flag").unwrap();
        let (mut argv, _) = proc.tables();
        unsafe { argv.set(1, moved.as_ptr()) };
        assert_eq!(ArgBlock::from_adjacent_args(&argv).unwrap().capacity(), 7);
    }
}
