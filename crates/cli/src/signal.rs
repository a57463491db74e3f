//! Interrupt handling for continuous mode
//!
//! The first SIGINT or SIGTERM only sets the cancel flag: the running round
//! finishes, its result is written, and the loop stops. A second signal
//! terminates the process immediately. Signal handlers do nothing but flip
//! atomics, so no code runs in signal context.
//!
//! On non-Unix platforms this is a no-op and the default handlers stay.

use crate::continuous::CancelToken;

/// Exit status used when a second signal forces termination
pub const FORCED_EXIT_STATUS: i32 = 130;

/// Route SIGINT and SIGTERM to `token`.
#[cfg(unix)]
pub fn install_interrupt_handler(token: &CancelToken) -> std::io::Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::flag;
    use std::sync::Arc;

    let cancelled = token.flag();
    for signal in [SIGINT, SIGTERM] {
        // Order matters: the conditional shutdown sees the flag before the
        // second registration sets it, so only a repeated signal exits.
        flag::register_conditional_shutdown(signal, FORCED_EXIT_STATUS, Arc::clone(&cancelled))?;
        flag::register(signal, Arc::clone(&cancelled))?;
    }
    Ok(())
}

#[cfg(not(unix))]
pub fn install_interrupt_handler(_token: &CancelToken) -> std::io::Result<()> {
    Ok(())
}
