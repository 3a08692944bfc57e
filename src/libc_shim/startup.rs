//! Process entry point for the nolibc demo.
//!
//! The kernel starts a process with `argc`, the argv table, and the environment table laid out on
//! the stack.  `_start` hands pointers into that layout to `main` unchanged, so `main` receives
//! the very tables whose strings `ps` reads, then passes `main`'s return value to `exit`.

#[cfg(not(any(
    all(target_os = "linux", target_arch = "aarch64"),
    all(target_os = "linux", target_arch = "x86_64"),
)))]
compile_error!("the proctitle demo entry point supports Linux x86_64 and Linux AArch64 only.");

#[cfg(not(test))]
#[cfg(all(target_os = "linux", target_arch = "aarch64"))]
core::arch::global_asm!(
    "
    .globl _start
_start:
    mov x9, sp
    ldr x0, [x9]             // argc
    add x1, x9, #8           // argv
    add x2, x1, x0, lsl #3   // argv + argc
    add x2, x2, #8           // envp, past argv's null terminator
    and sp, x9, #0xfffffffffffffff0
    bl main
    mov x8, #93              // exit
    svc #0
"
);

#[cfg(not(test))]
#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
core::arch::global_asm!(
    "
    .globl _start
    .type _start, @function
_start:
    xor ebp, ebp
    mov rdi, [rsp]                       # argc
    lea rsi, [rsp + 8]                   # argv
    lea rdx, [rsi + rdi*8 + 8]           # envp, past argv's null terminator
    and rsp, 0xFFFFFFFFFFFFFFF0
    call main
    mov edi, eax
    mov eax, 60                          # exit
    syscall
    .size _start, . - _start
"
);

#[allow(dead_code)]
#[cfg(not(test))]
unsafe extern "C" {
    fn main(
        argc: isize,
        argv: *mut *const core::ffi::c_char,
        envp: *mut *const core::ffi::c_char,
    ) -> core::ffi::c_int;
}
