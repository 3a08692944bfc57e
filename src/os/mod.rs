//! Safe wrappers over the raw system calls in `crate::syscall`.

mod argv;
mod envp;
mod exit;
mod fd;
mod mapping;
mod print;
mod program_break;
mod sleep;
mod thread_name;

pub use argv::*;
pub use envp::*;
pub use exit::*;
pub use fd::*;
pub use mapping::*;
pub use print::*;
pub use program_break::*;
pub use sleep::*;
pub use thread_name::*;
