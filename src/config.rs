//! Runtime configuration
//!
//! Defaults come from Cargo features.  `Config::from_envp` then applies overrides found in the
//! host's environment table; it must run before the environment is relocated, which setup takes
//! care of.

use crate::constants::*;
use crate::os::Envp;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Move environment strings off the argument block to reclaim their space
    pub relocate_environ: bool,
    /// Allow the kernel relocation path to lift the capacity ceiling
    pub growable: bool,
    /// Refresh the calling thread's short kernel name when the relocation path sets a title
    pub update_comm: bool,
    /// Write debug lines to stderr
    pub debug: bool,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            relocate_environ: true,
            growable: true,
            update_comm: cfg!(feature = "comm"),
            debug: cfg!(feature = "debug"),
        }
    }

    /// Feature defaults with overrides from `envp` applied
    pub fn from_envp(envp: &Envp) -> Self {
        let mut config = Self::new();
        if is_set(envp.var(ENV_NOENV)) {
            config.relocate_environ = false;
        }
        if is_set(envp.var(ENV_NOGROW)) {
            config.growable = false;
        }
        if is_set(envp.var(ENV_DEBUG)) {
            config.debug = true;
        }
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// A variable counts as set when present with a non-empty value other than `0`
fn is_set(value: Option<&[u8]>) -> bool {
    matches!(value, Some(v) if !v.is_empty() && v != b"0")
}
