use proctitle::os::{Print, STDERR, exit};

/// Panic handler
///
/// Nothing in the demo is expected to panic, but core still wants a handler to exist.  Debug
/// builds say where the panic came from; release builds only exit.
#[cfg_attr(not(test), panic_handler)]
fn panic(info: &core::panic::PanicInfo) -> ! {
    #[cfg(debug_assertions)]
    {
        "proctitle-demo panicked".print(STDERR);
        if let Some(loc) = info.location() {
            " at ".print(STDERR);
            loc.file().print(STDERR);
            ":".print(STDERR);
            loc.line().print(STDERR);
        }
        if let Some(msg) = info.message().as_str() {
            ": ".print(STDERR);
            msg.print(STDERR);
        }
        "\n".print(STDERR);
    }
    #[cfg(not(debug_assertions))]
    let _ = info;

    exit(101);
}
