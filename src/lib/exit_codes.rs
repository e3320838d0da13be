//! Stable exit codes for launcher-internal failures.
//!
//! When the tool runs, the launcher exits with the tool's own code. These
//! reserved codes are only used when the launcher fails before (or
//! instead of) handing off, so automation can tell the two apart. They
//! sit outside the 125-127 range the container runtime reserves for its
//! own failures.

/// The project root could not be resolved from the launcher's location.
pub const RESOLUTION_FAILURE: i32 = 121;
/// The invoking user's uid/gid could not be determined.
pub const IDENTITY_FAILURE: i32 = 122;
/// The container runtime was missing or could not be started.
pub const RUNTIME_FAILURE: i32 = 123;
