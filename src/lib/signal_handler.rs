//! Signal handling for cleanup on interruption
//!
//! When the launcher is interrupted by SIGINT (Ctrl+C), SIGTERM (kill),
//! or SIGHUP (terminal closed), the signal is forwarded to the running
//! container runtime so the `--rm` container is torn down rather than
//! orphaned, the run record is finalized, and the launcher exits with the
//! conventional `128 + signal` code.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Mutex;

use crate::run_record::{RunRecord, RunStore};

// Global state for signal-time cleanup
static SIGNAL_RECEIVED: AtomicBool = AtomicBool::new(false);
static SIGNAL_EXIT_CODE: AtomicI32 = AtomicI32::new(0);
static CHILD_PID: AtomicI32 = AtomicI32::new(0);
static CURRENT_RUN: Mutex<Option<(RunRecord, RunStore)>> = Mutex::new(None);

/// Check if a signal has been received
#[allow(dead_code)]
pub fn was_signal_received() -> bool {
    SIGNAL_RECEIVED.load(Ordering::SeqCst)
}

/// Get the exit code from the received signal
#[allow(dead_code)]
pub fn get_signal_exit_code() -> i32 {
    SIGNAL_EXIT_CODE.load(Ordering::SeqCst)
}

/// Publish the runtime child's pid so a signal can be forwarded to it.
pub fn set_child_pid(pid: i32) {
    CHILD_PID.store(pid, Ordering::SeqCst);
}

/// Clear the child pid after the runtime has exited.
pub fn clear_child_pid() {
    CHILD_PID.store(0, Ordering::SeqCst);
}

/// Set the current run record for signal-time finalization.
pub fn set_current_run(record: RunRecord, store: RunStore) {
    if let Ok(mut guard) = CURRENT_RUN.lock() {
        *guard = Some((record, store));
    }
}

/// Clear the current run record (call after normal completion).
pub fn clear_current_run() {
    if let Ok(mut guard) = CURRENT_RUN.lock() {
        *guard = None;
    }
}

/// Set up signal handlers for cleanup on interruption
#[cfg(unix)]
pub fn setup_signal_handlers() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        unsafe {
            // SIGINT (Ctrl+C) - exit code 130 (128 + 2)
            libc::signal(libc::SIGINT, signal_handler as usize);
            // SIGTERM (kill command) - exit code 143 (128 + 15)
            libc::signal(libc::SIGTERM, signal_handler as usize);
            // SIGHUP (terminal closed) - exit code 129 (128 + 1)
            libc::signal(libc::SIGHUP, signal_handler as usize);
        }
    });
}

#[cfg(not(unix))]
pub fn setup_signal_handlers() {
    // Signal handling not supported on non-Unix platforms
}

/// Signal handler function
#[cfg(unix)]
extern "C" fn signal_handler(sig: i32) {
    let exit_code = 128 + sig;
    SIGNAL_EXIT_CODE.store(exit_code, Ordering::SeqCst);
    SIGNAL_RECEIVED.store(true, Ordering::SeqCst);

    // Forward the signal to the runtime child, if one is running. The
    // container was started with --rm, so terminating the runtime removes
    // the container as well.
    let child = CHILD_PID.swap(0, Ordering::SeqCst);
    if child > 0 {
        unsafe {
            libc::kill(child, sig);
        }
    }

    finalize_run_on_signal(sig, exit_code);

    std::process::exit(exit_code);
}

/// Finalize the run record when a signal is received
#[cfg(unix)]
fn finalize_run_on_signal(signal: i32, exit_code: i32) {
    if let Ok(mut guard) = CURRENT_RUN.lock() {
        if let Some((ref mut record, ref store)) = *guard {
            record.complete(exit_code);
            if let Err(e) = store.save(record) {
                eprintln!(
                    "\n[Tracking] Warning: Could not save run record on signal {}: {}",
                    signal, e
                );
            }
            // Clear the record to prevent double cleanup
            *guard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run_record::RunStoreOptions;
    use std::path::Path;

    #[test]
    fn test_set_and_clear_child_pid() {
        set_child_pid(4242);
        clear_child_pid();
    }

    #[test]
    fn test_set_and_clear_current_run() {
        let temp = tempfile::tempdir().unwrap();
        let store = RunStore::with_options(RunStoreOptions {
            app_folder: Some(temp.path().to_path_buf()),
            verbose: false,
        });
        let record = RunRecord::new("img", Path::new("/p"), "docker");
        set_current_run(record, store);
        clear_current_run();
    }
}
