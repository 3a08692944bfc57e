use crate::err::*;
use crate::syscall::nanosleep;
use crate::types::*;

/// Sleep for the provided number of seconds, resuming after interruptions.
pub fn sleep(seconds: i64) -> Result<(), Errno> {
    if seconds < 0 {
        return Err(Errno::EINVAL);
    }

    let mut request = timespec {
        tv_sec: seconds,
        tv_nsec: 0,
    };

    loop {
        let mut remain = timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };

        match unsafe { nanosleep(&request, &mut remain) } {
            Err(Errno::EINTR) => request = remain,
            other => return other,
        }
    }
}
