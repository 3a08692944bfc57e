//! Thin wrappers over raw Linux system calls.
//!
//! Each file mirrors one `man 2` page.  Functions are `unsafe` and do no validation beyond what
//! the types express; the safe layer lives in `crate::os`.

mod brk;
mod close;
mod exit;
mod mmap;
mod nanosleep;
mod open;
mod prctl;
mod read;
mod write;

pub use brk::*;
pub use close::*;
pub use exit::*;
pub use mmap::*;
pub use nanosleep::*;
pub use open::*;
pub use prctl::*;
pub use read::*;
pub use write::*;
