use core::ffi::{CStr, c_char};
use core::marker::PhantomData;

/// Ergonomic wrapper over the ABI argv pointer table.
///
/// Unlike a plain slice, this keeps the table writable so entries can be repointed at relocated
/// copies of their strings.
pub struct Argv<'a> {
    raw: *mut *const c_char,
    len: usize,
    _pd: PhantomData<&'a mut [*const c_char]>,
}

impl<'a> Argv<'a> {
    /// # Safety
    /// - `argv..argv+argc` must be valid for reads and writes during `'a`.
    /// - Every entry must point at a NUL-terminated string valid for reads during `'a`.
    /// - Ideally immediately use ABI-provided argc+argv in main()
    pub unsafe fn from_raw(argc: isize, argv: *mut *const c_char) -> Self {
        let len = if argv.is_null() || argc < 0 {
            0
        } else {
            argc as usize
        };
        Self {
            raw: argv,
            len,
            _pd: PhantomData,
        }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn first(&self) -> Option<&'a CStr> {
        self.get(0)
    }

    /// Raw pointer stored in slot `i`
    #[inline]
    pub fn ptr(&self, i: usize) -> Option<*const c_char> {
        if i >= self.len {
            return None;
        }
        // SAFETY: caller of from_raw guaranteed the table holds `len` readable entries.
        let p = unsafe { *self.raw.add(i) };
        if p.is_null() { None } else { Some(p) }
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<&'a CStr> {
        // SAFETY: caller of from_raw guaranteed entries point at valid C strings during 'a.
        self.ptr(i).map(|p| unsafe { CStr::from_ptr(p) })
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &'a CStr> + Clone + '_ {
        (0..self.len).filter_map(|i| self.get(i))
    }

    /// Point slot `i` at a different string.
    ///
    /// # Safety
    /// - `p` must point at a NUL-terminated string that stays valid for the rest of `'a`.
    pub unsafe fn set(&mut self, i: usize, p: *const c_char) {
        if i < self.len {
            unsafe { *self.raw.add(i) = p };
        }
    }
}
