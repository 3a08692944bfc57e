//! Debug logging
//!
//! Lines go straight to stderr through the print framework and are dropped unless enabled, either
//! at build time with the `debug` feature or at setup time through `PROCTITLE_DEBUG`.

use crate::constants::LOG_PREFIX;
use crate::os::{Print, eprint};
use core::sync::atomic::{AtomicBool, Ordering};

static ENABLED: AtomicBool = AtomicBool::new(cfg!(feature = "debug"));

pub fn enable() {
    ENABLED.store(true, Ordering::Relaxed);
}

pub fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// `[proctitle] <msg>`
pub fn debug<M: Print>(msg: M) {
    if !enabled() {
        return;
    }
    eprint(LOG_PREFIX);
    eprint(msg);
    eprint("\n");
}

/// `[proctitle] <msg><value>`
pub fn debug_value<M: Print, V: Print>(msg: M, value: V) {
    if !enabled() {
        return;
    }
    eprint(LOG_PREFIX);
    eprint(msg);
    eprint(value);
    eprint("\n");
}
