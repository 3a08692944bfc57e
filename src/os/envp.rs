use core::ffi::{CStr, c_char};
use core::marker::PhantomData;

/// Ergonomic wrapper over the ABI null-terminated envp pointer table.
pub struct Envp<'a> {
    raw: *mut *const c_char,
    len: usize,
    _pd: PhantomData<&'a mut [*const c_char]>,
}

impl<'a> Envp<'a> {
    /// # Safety
    /// - `envp` must be null or a valid null-terminated array of pointers that remains valid for
    ///   reads and writes for the duration of `'a`.
    /// - Every entry must point at a NUL-terminated string valid for reads during `'a`.
    /// - Ideally immediately use ABI-provided envp in main()
    pub unsafe fn from_raw(envp: *mut *const c_char) -> Self {
        let mut len = 0;
        if !envp.is_null() {
            // SAFETY: caller guaranteed the table is null-terminated.
            while !unsafe { *envp.add(len) }.is_null() {
                len += 1;
            }
        }
        Self {
            raw: envp,
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

    /// Raw pointer stored in slot `i`
    #[inline]
    pub fn ptr(&self, i: usize) -> Option<*const c_char> {
        if i >= self.len {
            return None;
        }
        // SAFETY: the first `len` entries were verified non-null in from_raw.
        Some(unsafe { *self.raw.add(i) })
    }

    /// Whole `VAR=value` entry in slot `i`
    #[inline]
    pub fn get(&self, i: usize) -> Option<&'a CStr> {
        // SAFETY: caller of from_raw guaranteed entries point at valid C strings during 'a.
        self.ptr(i).map(|p| unsafe { CStr::from_ptr(p) })
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &'a CStr> + Clone + '_ {
        (0..self.len).filter_map(|i| self.get(i))
    }

    /// Iterate over `(variable, value)` pairs
    pub fn vars(&self) -> impl Iterator<Item = (&'a [u8], &'a [u8])> + '_ {
        self.iter().map(|entry| {
            // Split at `=`
            let bytes = entry.to_bytes();
            match bytes.iter().position(|&c| c == b'=') {
                Some(eq_idx) => (
                    bytes.get(..eq_idx).unwrap_or(&[]),
                    bytes.get(eq_idx + 1..).unwrap_or(&[]),
                ),
                None => (bytes, &[][..]),
            }
        })
    }

    /// Look up the value of `var`
    pub fn var(&self, var: &[u8]) -> Option<&'a [u8]> {
        self.vars().find(|(name, _)| *name == var).map(|(_, val)| val)
    }

    /// Point slot `i` at a different string.
    ///
    /// # Safety
    /// - `p` must point at a NUL-terminated string that stays valid for the rest of `'a`.
    pub unsafe fn set(&mut self, i: usize, p: *const c_char) {
        if i < self.len && !p.is_null() {
            unsafe { *self.raw.add(i) = p };
        }
    }
}
