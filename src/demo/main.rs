#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]

// Implementation of features Rust core expects from libc
//
// This conflicts with std, which unit tests link, so only this binary `mod`s it.  We don't need
// to use anything from it, just make it visible to the linker.
#[cfg(not(test))]
#[path = "../libc_shim/mod.rs"]
mod libc_shim;

use proctitle::os::*;
use proctitle::types::c_char;

/// Time to look at the process in `ps` between changes
const PAUSE_SECONDS: i64 = 10;

/// Retitle the process twice: first to the first argument (or a fixed greeting), then to a fixed
/// title.  Run it and watch `ps -o pid,args` or `top -c` from another terminal.
///
/// # Safety
///
/// Platform ABI guarantees incoming C-style format
#[cfg(not(test))]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn main(
    argc: isize,
    argv: *mut *const c_char,
    envp: *mut *const c_char,
) -> core::ffi::c_int {
    // Safety:
    // - These are the kernel's own tables, valid for the life of the process.
    // - No other thread exists yet.
    if let Err(e) = unsafe { proctitle::setup(argc, argv, envp) } {
        eprint("proctitle-demo: setup failed: ");
        eprintln(e);
    }

    let mut buf = [0u8; 256];
    print("initial title: ");
    println(proctitle::get_title(&mut buf));
    print("capacity: ");
    println(proctitle::title_capacity());

    // setup moved argv[1] out of the block before it could be overwritten
    let first = unsafe { Argv::from_raw(argc, argv) }
        .get(1)
        .map_or(&b"hello, world"[..], |arg| arg.to_bytes());
    show(first);

    show(b"new title!");

    0
}

fn show(title: &[u8]) {
    proctitle::set_title(title);

    let mut buf = [0u8; 256];
    print("title: ");
    println(proctitle::get_title(&mut buf));

    let thread = proctitle::get_thread_title();
    print("thread title: ");
    println(thread.as_bytes());

    if sleep(PAUSE_SECONDS).is_err() {
        eprintln("proctitle-demo: sleep failed");
    }
}
