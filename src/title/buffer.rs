use crate::title::ArgBlock;
use crate::util::mem::{memcpy_volatile, memzero_volatile, strnlen};

/// Fixed-capacity writer over an `ArgBlock`.
///
/// Whatever the block holds is what process listing tools display.  Writes go straight to it;
/// external readers may observe a partially written title, which is inherent to the mechanism.
#[derive(Debug)]
pub struct TitleBuffer {
    block: ArgBlock,
    len: usize,
}

impl TitleBuffer {
    /// Take over `block`, whose first `len` bytes are already the displayed title.
    pub fn new(block: ArgBlock, len: usize) -> Self {
        Self {
            block,
            len: len.min(block.max_len()),
        }
    }

    /// Take over a freshly located block: join the original arguments with spaces, in place, and
    /// clear everything after them.
    ///
    /// `args_len` is the byte length of the original argument strings including their NULs; the
    /// rest of the block is reclaimed environment space.
    pub fn from_arguments(block: ArgBlock, args_len: usize) -> Self {
        let args_len = args_len.min(block.capacity());
        let start = block.start();

        // SAFETY: ArgBlock guarantees start..start+capacity is valid for reads and writes.
        unsafe {
            for i in 0..args_len.saturating_sub(1) {
                let p = start.add(i);
                if *p == 0 {
                    core::ptr::write_volatile(p, b' ');
                }
            }
            memzero_volatile(start.add(args_len), block.capacity() - args_len);
        }

        // The argument area ends in a NUL, so the joined title is one shorter.
        Self::new(block, args_len.saturating_sub(1))
    }

    /// Display `title`, truncated to the block's capacity.
    ///
    /// Bytes after the first NUL in `title` are ignored.  Every byte past the new title is zeroed
    /// so nothing of a longer previous title remains.  Returns the number of bytes displayed.
    pub fn set(&mut self, title: &[u8]) -> usize {
        let len = strnlen(title).min(self.block.max_len());
        let start = self.block.start();

        // SAFETY: len < capacity, and ArgBlock guarantees the whole range is writable.
        unsafe {
            memcpy_volatile(start, title.get(..len).unwrap_or(&[]));
            memzero_volatile(start.add(len), self.block.capacity() - len);
        }

        self.len = len;
        len
    }

    /// Copy the displayed title into `out`, up to the first NUL or `out.len()` bytes.
    ///
    /// Reads the block itself rather than trusting `len`, so anything else that wrote into the
    /// block is reflected.
    pub fn get(&self, out: &mut [u8]) -> usize {
        // SAFETY: ArgBlock guarantees the range is readable.
        let displayed = unsafe {
            core::slice::from_raw_parts(self.block.start() as *const u8, self.block.max_len())
        };
        let len = strnlen(displayed).min(out.len());
        if let (Some(dst), Some(src)) = (out.get_mut(..len), displayed.get(..len)) {
            dst.copy_from_slice(src);
        }
        len
    }

    #[inline]
    pub fn block(&self) -> &ArgBlock {
        &self.block
    }

    /// Length of the title last written
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn max_len(&self) -> usize {
        self.block.max_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::title::test_util::FakeProcess;

    fn located(proc: &mut FakeProcess) -> ArgBlock {
        let (argv, envp) = proc.tables();
        ArgBlock::locate(&argv, &envp).unwrap()
    }

    fn read(buf: &TitleBuffer) -> std::vec::Vec<u8> {
        let mut out = [0u8; 256];
        let len = buf.get(&mut out);
        out[..len].to_vec()
    }

    fn raw(block: &ArgBlock) -> &[u8] {
        unsafe { core::slice::from_raw_parts(block.start(), block.capacity()) }
    }

    #[test]
    fn test_from_arguments_joins_with_spaces() {
        let mut proc = FakeProcess::new(&["myproc", "--flag", "x"], &["A=1"]);
        let block = located(&mut proc);
        let buf = TitleBuffer::from_arguments(block, block.capacity());
        assert_eq!(read(&buf), b"myproc --flag x");
        assert_eq!(buf.len(), 15);
    }

    #[test]
    fn test_from_arguments_clears_reclaimed_environment() {
        let mut proc = FakeProcess::new(&["myproc"], &["HOME=/root"]);
        let (argv, envp) = proc.tables();
        let args = ArgBlock::locate(&argv, &envp).unwrap();
        let block = args.extend_over_environ(&envp);
        let buf = TitleBuffer::from_arguments(block, args.capacity());
        assert_eq!(read(&buf), b"myproc");
        assert!(raw(&block)[6..].iter().all(|&b| b == 0));
        assert_eq!(buf.max_len(), 7 + 11 - 1);
    }

    #[test]
    fn test_set_then_get() {
        let mut proc = FakeProcess::new(&["myproc", "--flag"], &["A=1"]);
        let mut buf = TitleBuffer::new(located(&mut proc), 0);
        assert_eq!(buf.set(b"X"), 1);
        assert_eq!(read(&buf), b"X");
    }

    #[test]
    fn test_set_truncates_to_capacity() {
        let mut proc = FakeProcess::new(&["myproc", "--flag"], &["A=1"]);
        let mut buf = TitleBuffer::new(located(&mut proc), 0);
        let title = b"a title far longer than fifteen bytes";
        assert_eq!(buf.set(title), 13);
        assert_eq!(read(&buf), &title[..13]);
        assert_eq!(raw(buf.block())[13], 0);
    }

    #[test]
    fn test_shorter_title_leaves_no_residue() {
        let mut proc = FakeProcess::new(&["myproc", "--flag"], &["A=1"]);
        let mut buf = TitleBuffer::new(located(&mut proc), 0);
        buf.set(b"long title!!");
        buf.set(b"ab");
        assert_eq!(read(&buf), b"ab");
        assert!(raw(buf.block())[2..].iter().all(|&b| b == 0));
        // Nothing past the block was touched
        assert_eq!(proc.env(0), b"A=1");
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut proc = FakeProcess::new(&["myproc", "--flag"], &["A=1"]);
        let mut buf = TitleBuffer::new(located(&mut proc), 0);
        buf.set(b"same");
        let once = raw(buf.block()).to_vec();
        buf.set(b"same");
        assert_eq!(raw(buf.block()), &once[..]);
        assert_eq!(read(&buf), b"same");
    }

    #[test]
    fn test_set_stops_at_nul() {
        let mut proc = FakeProcess::new(&["myproc", "--flag"], &["A=1"]);
        let mut buf = TitleBuffer::new(located(&mut proc), 0);
        assert_eq!(buf.set(b"abc\0def"), 3);
        assert_eq!(read(&buf), b"abc");
    }

    #[test]
    fn test_set_empty_title() {
        let mut proc = FakeProcess::new(&["myproc", "--flag"], &["A=1"]);
        let mut buf = TitleBuffer::new(located(&mut proc), 0);
        buf.set(b"something");
        assert_eq!(buf.set(b""), 0);
        assert!(buf.is_empty());
        assert_eq!(read(&buf), b"");
    }

    #[test]
    fn test_get_limited_by_output_buffer() {
        let mut proc = FakeProcess::new(&["myproc", "--flag"], &["A=1"]);
        let mut buf = TitleBuffer::new(located(&mut proc), 0);
        buf.set(b"abcdef");
        let mut out = [0u8; 4];
        assert_eq!(buf.get(&mut out), 4);
        assert_eq!(&out, b"abcd");
    }

    #[test]
    fn test_zero_capacity_block() {
        let mut proc = FakeProcess::new(&[""], &["A=1"]);
        let (argv, _) = proc.tables();
        let mut buf = TitleBuffer::new(ArgBlock::from_first_arg(&argv).unwrap(), 0);
        assert_eq!(buf.max_len(), 0);
        assert_eq!(buf.set(b"anything"), 0);
        assert_eq!(read(&buf), b"");
    }
}
