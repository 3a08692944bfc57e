//! Per-thread short names
//!
//! Independent of the process title: a separate 16 byte kernel buffer per thread, set and read
//! with prctl.  No state is kept here; every call addresses the calling thread.

use crate::log;
use crate::os::{ThreadName, get_thread_name, set_thread_name};

/// Set the calling thread's name, truncated to 15 bytes.  Failures are logged and ignored.
pub fn set_thread_title(name: &[u8]) {
    if let Err(e) = set_thread_name(&ThreadName::new(name)) {
        log::debug_value("unable to set thread name: ", e.description().unwrap_or("unknown"));
    }
}

/// The calling thread's name, or an empty name if it cannot be read.
pub fn get_thread_title() -> ThreadName {
    get_thread_name().unwrap_or_else(|e| {
        log::debug_value("unable to get thread name: ", e.description().unwrap_or("unknown"));
        ThreadName::empty()
    })
}
