//! Print framework
//!
//! `core::fmt` machinery is avoided; each printable type writes its bytes directly to a file
//! descriptor.  Write errors are ignored since there is nowhere left to report them.

use crate::os::{Fd, STDERR, STDOUT};
use core::ffi::CStr;

pub fn print<T: Print>(s: T) {
    s.print(STDOUT);
}

pub fn println<T: Print>(s: T) {
    s.print(STDOUT);
    b"\n".print(STDOUT);
}

pub fn eprint<T: Print>(s: T) {
    s.print(STDERR);
}

pub fn eprintln<T: Print>(s: T) {
    s.print(STDERR);
    b"\n".print(STDERR);
}

pub trait Print {
    fn print(&self, fd: Fd);
}

impl<T: Print + ?Sized> Print for &T {
    fn print(&self, fd: Fd) {
        (**self).print(fd);
    }
}

impl Print for [u8] {
    fn print(&self, fd: Fd) {
        let _ = fd.write(self);
    }
}

impl<const N: usize> Print for [u8; N] {
    fn print(&self, fd: Fd) {
        let _ = fd.write(self);
    }
}

impl Print for str {
    fn print(&self, fd: Fd) {
        let _ = fd.write(self.as_bytes());
    }
}

impl Print for CStr {
    fn print(&self, fd: Fd) {
        let _ = fd.write(self.to_bytes());
    }
}

impl Print for u32 {
    fn print(&self, fd: Fd) {
        let _ = fd.write(itoa::Buffer::new().format(*self).as_bytes());
    }
}

impl Print for u64 {
    fn print(&self, fd: Fd) {
        let _ = fd.write(itoa::Buffer::new().format(*self).as_bytes());
    }
}

impl Print for usize {
    fn print(&self, fd: Fd) {
        let _ = fd.write(itoa::Buffer::new().format(*self).as_bytes());
    }
}

/// Print an address in hexadecimal, e.g. `0x7ffd5e2c1a40`
pub struct Hex(pub usize);

impl Print for Hex {
    fn print(&self, fd: Fd) {
        let mut buf = [0u8; 2 + 2 * core::mem::size_of::<usize>()];
        let len = format_hex(self.0, &mut buf);
        let _ = fd.write(buf.get(..len).unwrap_or(&[]));
    }
}

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Render `value` as `0x`-prefixed lowercase hex into `buf`, returning the length used.
fn format_hex(value: usize, buf: &mut [u8; 2 + 2 * core::mem::size_of::<usize>()]) -> usize {
    buf[0] = b'0';
    buf[1] = b'x';

    let digits = if value == 0 {
        1
    } else {
        (usize::BITS - value.leading_zeros()).div_ceil(4) as usize
    };

    for i in 0..digits {
        let nibble = (value >> (4 * (digits - 1 - i))) & 0xf;
        buf[2 + i] = HEX_DIGITS[nibble];
    }

    2 + digits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(value: usize) -> std::string::String {
        let mut buf = [0u8; 2 + 2 * core::mem::size_of::<usize>()];
        let len = format_hex(value, &mut buf);
        std::string::String::from_utf8(buf[..len].to_vec()).unwrap()
    }

    #[test]
    fn test_format_hex_zero() {
        assert_eq!(hex(0), "0x0");
    }

    #[test]
    fn test_format_hex_address() {
        assert_eq!(hex(0x7ffd_5e2c_1a40), "0x7ffd5e2c1a40");
    }

    #[test]
    fn test_format_hex_max() {
        assert_eq!(hex(usize::MAX).len(), 2 + 2 * core::mem::size_of::<usize>());
        assert!(hex(usize::MAX)[2..].bytes().all(|b| b == b'f'));
    }
}
