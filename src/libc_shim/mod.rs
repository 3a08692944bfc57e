//! The handful of symbols Rust core expects libc to provide.
//!
//! Only the nolibc demo binary `mod`s this, and it never `use`s anything from here; the linker
//! picks the symbols up on its own.  Anything that links std (unit tests, the library when built
//! for a libc host) must not bring it in, or the symbols collide.

#![allow(unused)]

mod bcmp;
mod memcpy;
mod memset;
mod panic;
mod startup;
mod strlen;
