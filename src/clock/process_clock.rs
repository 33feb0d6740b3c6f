//! Process CPU-time clock
//!
//! Counts only the CPU time consumed by the calling process (user and system),
//! never time spent blocked or descheduled.

use std::time::Duration;

use super::{Clock, ClockError};

/// Stateless handle on the process CPU-time clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessClock;

impl ProcessClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for ProcessClock {
    fn now(&self) -> Result<Duration, ClockError> {
        read_process_cpu_time()
    }
}

#[cfg(unix)]
fn read_process_cpu_time() -> Result<Duration, ClockError> {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // SAFETY: `ts` is a valid, writable timespec for the duration of the call.
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_PROCESS_CPUTIME_ID, &mut ts) };
    if rc != 0 {
        return Err(ClockError::Unavailable(std::io::Error::last_os_error()));
    }
    Ok(Duration::new(ts.tv_sec as u64, ts.tv_nsec as u32))
}

#[cfg(windows)]
fn read_process_cpu_time() -> Result<Duration, ClockError> {
    use windows_sys::Win32::Foundation::FILETIME;
    use windows_sys::Win32::System::Threading::{GetCurrentProcess, GetProcessTimes};

    let zero = || FILETIME {
        dwLowDateTime: 0,
        dwHighDateTime: 0,
    };
    let (mut creation, mut exit, mut kernel, mut user) = (zero(), zero(), zero(), zero());

    // SAFETY: the pseudo handle from GetCurrentProcess needs no cleanup and all
    // out-pointers reference live FILETIME values.
    let ok = unsafe {
        GetProcessTimes(
            GetCurrentProcess(),
            &mut creation,
            &mut exit,
            &mut kernel,
            &mut user,
        )
    };
    if ok == 0 {
        return Err(ClockError::Unavailable(std::io::Error::last_os_error()));
    }

    // FILETIME counts 100ns ticks
    let ticks = filetime_ticks(&kernel) + filetime_ticks(&user);
    Ok(Duration::from_nanos(ticks.saturating_mul(100)))
}

#[cfg(windows)]
fn filetime_ticks(ft: &windows_sys::Win32::Foundation::FILETIME) -> u64 {
    (u64::from(ft.dwHighDateTime) << 32) | u64::from(ft.dwLowDateTime)
}

#[cfg(not(any(unix, windows)))]
fn read_process_cpu_time() -> Result<Duration, ClockError> {
    Err(ClockError::Unsupported)
}
