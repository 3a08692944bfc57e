//! Process title engine
//!
//! `ps` and `top` show a process's arguments by reading the memory the kernel originally filled
//! with them.  Retitling means finding that memory, making room in it, and overwriting it:
//!
//! - `arg_block` finds the argument strings and extends over the environment strings after them
//! - `environ` moves strings the host still needs out of the way
//! - `buffer` writes titles within a fixed capacity
//! - `growable` asks the kernel to read arguments from a new buffer when a title does not fit
//! - `engine` ties these together behind a process-wide lock
//!
//! `thread` handles the unrelated per-thread short name.

mod arg_block;
mod buffer;
mod engine;
mod environ;
pub mod growable;
mod stat;
mod thread;

#[cfg(test)]
mod test_util;

pub use arg_block::*;
pub use buffer::*;
pub use engine::*;
pub use environ::*;
pub use stat::*;
pub use thread::*;
