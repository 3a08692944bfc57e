// The library itself needs nothing from the build script.  The demo binary brings its own
// `_start` and libc symbols, so it must be linked without the C runtime; otherwise crt1's
// `_start` collides with the shim's.
//
// lib.rs also `mod`s this file under cfg(test) so the link setup is covered by unit tests.

/// Binaries that link `src/libc_shim` instead of libc
pub const NOLIBC_BINS: &[&str] = &["proctitle-demo"];

/// Linker arguments needed for a nostd, nolibc program
pub const NOLIBC_LINK_ARGS: &[&str] = &["-nostartfiles", "-nostdlib", "-static", "-no-pie"];

#[allow(dead_code)]
fn main() {
    compiler_instructions();
}

#[allow(dead_code)]
fn compiler_instructions() {
    for bin in NOLIBC_BINS {
        for arg in NOLIBC_LINK_ARGS {
            println!("cargo:rustc-link-arg-bin={bin}={arg}");
        }
    }
    println!("cargo:rerun-if-changed=src/build/main.rs");
}
