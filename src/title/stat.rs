//! Memory layout fields of /proc/self/stat
//!
//! Field numbers follow proc(5).  The process name (field 2) is wrapped in parentheses and may
//! itself contain spaces and parentheses, so fields are counted from the last `)`.

use crate::constants::{PROC_SELF_STAT, PROC_STAT_BUF_SIZE};
use crate::err::Error;
use crate::os::{Fd, OpenFlags};

/// The fields `prctl_mm_map` needs that only /proc/self/stat reports
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryLayout {
    pub start_code: u64,
    pub end_code: u64,
    pub start_stack: u64,
    pub start_data: u64,
    pub end_data: u64,
    pub start_brk: u64,
    pub env_start: u64,
    pub env_end: u64,
}

// Field numbers, one-based
const FIELD_STATE: usize = 3;
const FIELD_START_CODE: usize = 26;
const FIELD_END_CODE: usize = 27;
const FIELD_START_STACK: usize = 28;
const FIELD_START_DATA: usize = 45;
const FIELD_END_DATA: usize = 46;
const FIELD_START_BRK: usize = 47;
// 48 arg_start and 49 arg_end are replaced, not read
const FIELD_ENV_START: usize = 50;
const FIELD_ENV_END: usize = 51;

impl MemoryLayout {
    /// Read and parse /proc/self/stat
    pub fn read_self() -> Result<Self, Error> {
        let mut buf = [0u8; PROC_STAT_BUF_SIZE];

        let fd = Fd::open(PROC_SELF_STAT, OpenFlags::O_RDONLY | OpenFlags::O_CLOEXEC)
            .map_err(Error::StatusRead)?;
        let read = fd.read_to_end(&mut buf);
        let _ = fd.close();
        let len = read.map_err(Error::StatusRead)?;

        // A full buffer may have cut the line short
        if len == buf.len() {
            return Err(Error::Parse);
        }

        Self::parse(buf.get(..len).ok_or(Error::Parse)?)
    }

    /// Parse the contents of a stat file.  Any field that is missing, empty, not purely decimal,
    /// or too large for `u64` fails the whole parse.
    pub fn parse(stat: &[u8]) -> Result<Self, Error> {
        let close = stat.iter().rposition(|&b| b == b')').ok_or(Error::Parse)?;
        let rest = stat.get(close + 1..).ok_or(Error::Parse)?;
        let rest = rest.strip_prefix(b" ").ok_or(Error::Parse)?;

        let mut fields = Fields::new(rest);
        Ok(Self {
            start_code: fields.get(FIELD_START_CODE)?,
            end_code: fields.get(FIELD_END_CODE)?,
            start_stack: fields.get(FIELD_START_STACK)?,
            start_data: fields.get(FIELD_START_DATA)?,
            end_data: fields.get(FIELD_END_DATA)?,
            start_brk: fields.get(FIELD_START_BRK)?,
            env_start: fields.get(FIELD_ENV_START)?,
            env_end: fields.get(FIELD_ENV_END)?,
        })
    }
}

/// Forward-only cursor over the space-separated fields following the process name
struct Fields<'a> {
    iter: core::slice::Split<'a, u8, fn(&u8) -> bool>,
    next_field: usize,
}

impl<'a> Fields<'a> {
    fn new(rest: &'a [u8]) -> Self {
        let is_space: fn(&u8) -> bool = |&b| b == b' ';
        Self {
            iter: rest.split(is_space),
            next_field: FIELD_STATE,
        }
    }

    /// Numeric value of field `field`, which must not precede previously read fields
    fn get(&mut self, field: usize) -> Result<u64, Error> {
        if field < self.next_field {
            return Err(Error::Parse);
        }
        let raw = self
            .iter
            .nth(field - self.next_field)
            .ok_or(Error::Parse)?;
        self.next_field = field + 1;
        parse_u64(raw.strip_suffix(b"\n").unwrap_or(raw))
    }
}

fn parse_u64(digits: &[u8]) -> Result<u64, Error> {
    if digits.is_empty() {
        return Err(Error::Parse);
    }
    digits.iter().try_fold(0u64, |acc, &b| {
        if !b.is_ascii_digit() {
            return Err(Error::Parse);
        }
        acc.checked_mul(10)
            .and_then(|acc| acc.checked_add(u64::from(b - b'0')))
            .ok_or(Error::Parse)
    })
}
