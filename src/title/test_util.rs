//! Synthetic process image for exercising the title engine without touching the real one.

use crate::os::{Argv, Envp};
use core::ffi::{CStr, c_char};
use std::ffi::CString;
use std::vec::Vec;

/// Filler around the strings so scans that overshoot read defined, non-NUL memory
const PADDING: usize = 16;
const FILL: u8 = b'#';

/// Argument strings followed by environment strings in one buffer, with pointer tables into it,
/// laid out the way the kernel lays out a new process.
pub struct FakeProcess {
    memory: Vec<u8>,
    args_offset: usize,
    strings_end: usize,
    argv: Vec<*const c_char>,
    envp: Vec<*const c_char>,
    detached: Vec<CString>,
}

impl FakeProcess {
    pub fn new(args: &[&str], env: &[&str]) -> Self {
        Self::with_gap(args, env, 0)
    }

    /// Like `new`, with `gap` filler bytes between the last argument and the first environment
    /// string.
    pub fn with_gap(args: &[&str], env: &[&str], gap: usize) -> Self {
        let mut memory = std::vec![FILL; PADDING];
        let args_offset = memory.len();

        let mut arg_offsets = Vec::new();
        for arg in args {
            arg_offsets.push(memory.len());
            memory.extend_from_slice(arg.as_bytes());
            memory.push(0);
        }

        memory.extend(core::iter::repeat_n(FILL, gap));

        let mut env_offsets = Vec::new();
        for entry in env {
            env_offsets.push(memory.len());
            memory.extend_from_slice(entry.as_bytes());
            memory.push(0);
        }

        let strings_end = memory.len();
        memory.extend(core::iter::repeat_n(FILL, PADDING));

        // The buffer is never resized after this point, so these pointers stay valid.
        let base = memory.as_mut_ptr();
        let argv = arg_offsets
            .iter()
            .map(|&o| base.wrapping_add(o) as *const c_char)
            .collect();
        let mut envp: Vec<*const c_char> = env_offsets
            .iter()
            .map(|&o| base.wrapping_add(o) as *const c_char)
            .collect();
        envp.push(core::ptr::null());

        Self {
            memory,
            args_offset,
            strings_end,
            argv,
            envp,
            detached: Vec::new(),
        }
    }

    /// Pointer tables as the host would hand them over
    pub fn tables<'a>(&mut self) -> (Argv<'a>, Envp<'a>) {
        unsafe {
            (
                Argv::from_raw(self.argv.len() as isize, self.argv.as_mut_ptr()),
                Envp::from_raw(self.envp.as_mut_ptr()),
            )
        }
    }

    pub fn args_start(&self) -> *mut u8 {
        self.memory.as_ptr().wrapping_add(self.args_offset) as *mut u8
    }

    /// One past the NUL of the last environment string
    pub fn strings_end(&self) -> *mut u8 {
        self.memory.as_ptr().wrapping_add(self.strings_end) as *mut u8
    }

    /// Raw bytes of the original string area, arguments through environment
    pub fn strings(&self) -> &[u8] {
        unsafe {
            core::slice::from_raw_parts(self.args_start(), self.strings_end - self.args_offset)
        }
    }

    /// Repoint every argv slot at a private copy, as hosts that rewrite their arguments do
    pub fn detach_argv(&mut self) {
        for slot in self.argv.iter_mut() {
            let copy = unsafe { CStr::from_ptr(*slot) }.to_owned();
            *slot = copy.as_ptr();
            self.detached.push(copy);
        }
    }

    /// Host claims `argv[0]` is `arg0`, which is not what memory holds
    pub fn replace_first_arg(&mut self, arg0: &str) {
        let copy = CString::new(arg0).unwrap();
        self.argv[0] = copy.as_ptr();
        self.detached.push(copy);
    }

    pub fn point_env_at(&mut self, i: usize, p: *const c_char) {
        self.envp[i] = p;
    }

    pub fn argv_ptr(&self, i: usize) -> *const c_char {
        self.argv[i]
    }

    pub fn envp_ptr(&self, i: usize) -> *const c_char {
        self.envp[i]
    }

    /// What the host reads through its argv table
    pub fn arg(&self, i: usize) -> Vec<u8> {
        unsafe { CStr::from_ptr(self.argv[i]) }.to_bytes().to_vec()
    }

    /// What the host reads through its environment table
    pub fn env(&self, i: usize) -> Vec<u8> {
        unsafe { CStr::from_ptr(self.envp[i]) }.to_bytes().to_vec()
    }

    /// Overwrite the original string area
    pub fn scribble(&mut self) {
        let start = self.args_offset;
        let end = self.strings_end;
        for b in &mut self.memory[start..end] {
            *b = b'Z';
        }
    }
}
