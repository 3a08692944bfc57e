//! Change the process title shown by `ps` and `top`, from a running Linux process.
//!
//! ```ignore
//! // Early in main, with the tables the process started with
//! unsafe { proctitle::setup(argc, argv, envp) }?;
//! proctitle::set_title(b"worker: idle");
//! ```
//!
//! No libc is required; everything goes through raw system calls.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod constants;
pub mod err;
pub mod log;
pub mod os;
pub mod syscall;
pub mod title;
pub mod types;
pub mod util;

// Link setup for the demo binary, compiled here only so its tests run with the library's
#[cfg(test)]
#[path = "build/main.rs"]
mod build_script;

pub use config::Config;
pub use err::Error;
pub use os::ThreadName;
pub use title::{
    environ_table, get_thread_title, get_title, set_thread_title, set_title, setup,
    setup_with_config, title_capacity,
};
