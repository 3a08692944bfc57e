//! Relocation of environment and argument strings off the argument block.
//!
//! Copies live in anonymous mappings that are never unmapped.  Any code anywhere in the process
//! may still be reading the old or the new pointer tables without synchronization with us, so the
//! copies are a permanent resource hold, not a leak waiting for a fix.

use crate::err::Error;
use crate::os::{Argv, Envp, Mapping};
use crate::title::ArgBlock;
use core::ffi::{CStr, c_char};

/// Process-lifetime copies of a set of strings plus a null-terminated pointer table to them
#[derive(Debug)]
struct StringCopies {
    table: *mut *const c_char,
    len: usize,
}

impl StringCopies {
    /// Copy `strings` into one new mapping: the pointer table first, the strings after it.
    fn new<'s, I>(strings: I) -> Result<Self, Error>
    where
        I: Iterator<Item = &'s CStr> + Clone,
    {
        let (len, bytes) = strings
            .clone()
            .fold((0usize, 0usize), |(n, b), s| (n + 1, b + s.to_bytes_with_nul().len()));

        let table_size = (len + 1) * core::mem::size_of::<*const c_char>();
        let mapping = Mapping::new(table_size + bytes).map_err(Error::Allocation)?;

        let table = mapping.as_mut_ptr() as *mut *const c_char;
        let mut dst = mapping.as_mut_ptr().wrapping_add(table_size);

        for (i, s) in strings.take(len).enumerate() {
            let src = s.to_bytes_with_nul();
            // SAFETY: the mapping was sized for exactly these strings and the table in front of
            // them; page alignment of the mapping keeps the table aligned.
            unsafe {
                core::ptr::copy_nonoverlapping(src.as_ptr(), dst, src.len());
                *table.add(i) = dst as *const c_char;
            }
            dst = dst.wrapping_add(src.len());
        }
        // The terminating null slot is already zero from the fresh mapping.

        Ok(Self { table, len })
    }

    fn ptr(&self, i: usize) -> Option<*const c_char> {
        if i >= self.len {
            return None;
        }
        Some(unsafe { *self.table.add(i) })
    }

    fn get(&self, i: usize) -> Option<&'static CStr> {
        // SAFETY: the table and strings live for the rest of the process.
        self.ptr(i).map(|p| unsafe { CStr::from_ptr(p) })
    }
}

/// Relocated environment strings and the replacement pointer table
#[derive(Debug)]
pub struct EnvironSnapshot(StringCopies);

// Process-lifetime, read-only after construction.
unsafe impl Send for EnvironSnapshot {}

impl EnvironSnapshot {
    /// Null-terminated table of the relocated strings, suitable as a libc `environ`
    pub fn table(&self) -> *const *const c_char {
        self.0.table
    }

    pub fn len(&self) -> usize {
        self.0.len
    }

    pub fn is_empty(&self) -> bool {
        self.0.len == 0
    }

    pub fn get(&self, i: usize) -> Option<&'static CStr> {
        self.0.get(i)
    }
}

/// Copy every environment string into new storage and repoint `envp`'s slots at the copies.
///
/// Afterwards nothing refers to the original environment strings, and the bytes they occupied may
/// be reused for the title.  Must happen at most once per process.
pub fn relocate_environ(envp: &mut Envp) -> Result<EnvironSnapshot, Error> {
    let copies = StringCopies::new(envp.iter())?;
    for i in 0..copies.len {
        if let Some(p) = copies.ptr(i) {
            // SAFETY: the copies live for the rest of the process.
            unsafe { envp.set(i, p) };
        }
    }
    Ok(EnvironSnapshot(copies))
}

/// Relocated argument strings
#[derive(Debug)]
pub struct ArgvSnapshot(StringCopies);

// Process-lifetime, read-only after construction.
unsafe impl Send for ArgvSnapshot {}

impl ArgvSnapshot {
    pub fn len(&self) -> usize {
        self.0.len
    }

    pub fn is_empty(&self) -> bool {
        self.0.len == 0
    }

    pub fn get(&self, i: usize) -> Option<&'static CStr> {
        self.0.get(i)
    }
}

/// Copy the argument strings and repoint every `argv` slot that points inside `block`.
///
/// The title overwrites the block, so without this the host would read the title back through
/// its own argv table.  Slots pointing elsewhere, e.g. at a host's private copies, are left alone.
pub fn relocate_args(argv: &mut Argv, block: &ArgBlock) -> Result<ArgvSnapshot, Error> {
    let copies = StringCopies::new(argv.iter())?;
    let mut copy_idx = 0;
    for i in 0..argv.len() {
        let Some(original) = argv.ptr(i) else {
            continue;
        };
        if let Some(p) = copies.ptr(copy_idx)
            && block.contains(original as *const u8)
        {
            // SAFETY: the copies live for the rest of the process.
            unsafe { argv.set(i, p) };
        }
        copy_idx += 1;
    }
    Ok(ArgvSnapshot(copies))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::title::test_util::FakeProcess;

    #[test]
    fn test_relocate_environ_preserves_every_pair() {
        let env = ["HOME=/root", "PATH=/bin:/usr/bin", "EMPTY=", "LANG=C.UTF-8"];
        let mut proc = FakeProcess::new(&["prog"], &env);
        let (_, mut envp) = proc.tables();
        let snapshot = relocate_environ(&mut envp).unwrap();

        assert_eq!(snapshot.len(), env.len());
        for (i, entry) in env.iter().enumerate() {
            assert_eq!(proc.env(i), entry.as_bytes());
            assert_eq!(snapshot.get(i).unwrap().to_bytes(), entry.as_bytes());
        }
    }

    #[test]
    fn test_relocate_environ_survives_scribbled_original() {
        let mut proc = FakeProcess::new(&["prog"], &["HOME=/root", "A=1"]);
        let (_, mut envp) = proc.tables();
        relocate_environ(&mut envp).unwrap();
        proc.scribble();
        assert_eq!(proc.env(0), b"HOME=/root");
        assert_eq!(proc.env(1), b"A=1");
        assert!(!proc.strings().is_empty());
    }

    #[test]
    fn test_relocate_environ_repoints_outside_block() {
        let mut proc = FakeProcess::new(&["prog"], &["HOME=/root"]);
        let old = proc.envp_ptr(0);
        let (argv, mut envp) = proc.tables();
        let block = ArgBlock::locate(&argv, &envp).unwrap().extend_over_environ(&envp);
        relocate_environ(&mut envp).unwrap();
        assert_ne!(proc.envp_ptr(0), old);
        assert!(!block.contains(proc.envp_ptr(0) as *const u8));
    }

    #[test]
    fn test_snapshot_table_is_null_terminated() {
        let mut proc = FakeProcess::new(&["prog"], &["A=1", "B=2"]);
        let (_, mut envp) = proc.tables();
        let snapshot = relocate_environ(&mut envp).unwrap();
        let table = snapshot.table();
        unsafe {
            assert_eq!(CStr::from_ptr(*table).to_bytes(), b"A=1");
            assert_eq!(CStr::from_ptr(*table.add(1)).to_bytes(), b"B=2");
            assert!((*table.add(2)).is_null());
        }
        assert!(snapshot.get(2).is_none());
    }

    #[test]
    fn test_relocate_empty_environ() {
        let mut proc = FakeProcess::new(&["prog"], &[]);
        let (_, mut envp) = proc.tables();
        let snapshot = relocate_environ(&mut envp).unwrap();
        assert!(snapshot.is_empty());
        assert!(unsafe { *snapshot.table() }.is_null());
    }

    #[test]
    fn test_relocate_args_only_inside_block() {
        let mut proc = FakeProcess::new(&["myproc", "--flag", "x"], &["A=1"]);
        let outside = std::ffi::CString::new("x").unwrap();
        let (mut argv, envp) = proc.tables();
        let block = ArgBlock::locate(&argv, &envp).unwrap();
        unsafe { argv.set(2, outside.as_ptr()) };

        let snapshot = relocate_args(&mut argv, &block).unwrap();
        assert_eq!(snapshot.len(), 3);
        assert!(!block.contains(proc.argv_ptr(0) as *const u8));
        assert!(!block.contains(proc.argv_ptr(1) as *const u8));
        assert_eq!(proc.argv_ptr(2), outside.as_ptr());

        proc.scribble();
        assert_eq!(proc.arg(0), b"myproc");
        assert_eq!(proc.arg(1), b"--flag");
        assert_eq!(proc.arg(2), b"x");
    }
}
