//! draft-paper library
//!
//! Launches the containerized Open Journals paper compiler against the
//! directory the launcher is installed in, as the invoking user.

pub mod exit_codes;
pub mod identity;
pub mod invocation;
pub mod launch_log;
pub mod locator;
pub mod run_record;
pub mod runner;
pub mod signal_handler;

// Re-export commonly used items
pub use identity::{Identity, IdentityError};
pub use invocation::{
    InvocationSpec, RuntimeConfig, CONTAINER_DATA_DIR, DEFAULT_JOURNAL, DEFAULT_RUNTIME,
    JOURNAL_ENV_VAR, TOOL_IMAGE,
};
pub use launch_log::{
    create_log_footer, create_log_header, create_log_path, get_timestamp, write_log_file,
    LogHeaderParams,
};
pub use locator::{project_root_of, resolve, ResolutionError};
pub use run_record::{RunRecord, RunStatus, RunStore, RunStoreOptions};
pub use runner::{run, RunError};
pub use signal_handler::{
    clear_child_pid, clear_current_run, set_child_pid, set_current_run, setup_signal_handlers,
};
