//! Child process execution
//!
//! Runs the assembled container invocation synchronously. The child
//! inherits the launcher's stdin/stdout/stderr, so the caller sees the
//! tool's output live, and the child's exit status is handed back
//! verbatim for the launcher to exit with.

use std::io;
use std::process::{Command, ExitStatus};

use thiserror::Error;

use crate::invocation::InvocationSpec;
use crate::signal_handler::{clear_child_pid, set_child_pid};

/// Failure to hand off to the container runtime.
#[derive(Debug, Error)]
pub enum RunError {
    /// The runtime executable was not found on the host.
    #[error(
        "container runtime \"{runtime}\" is not installed. \
         Install Docker from https://docs.docker.com/get-docker/"
    )]
    RuntimeMissing { runtime: String },

    /// The runtime was found but could not be started.
    #[error("failed to start container runtime \"{runtime}\": {source}")]
    Spawn {
        runtime: String,
        #[source]
        source: io::Error,
    },

    /// The runtime started but waiting on it failed.
    #[error("failed waiting for container runtime: {0}")]
    Wait(#[source] io::Error),
}

/// Run the invocation to completion and return the child's exit code.
///
/// If the child was killed by a signal, the conventional `128 + signal`
/// encoding is returned. The child's pid is published to the signal
/// handler for the duration of the run so an interrupted launcher can
/// tear the container down instead of orphaning it.
pub fn run(spec: &InvocationSpec) -> Result<i32, RunError> {
    let mut child = Command::new(&spec.program)
        .args(&spec.args)
        .spawn()
        .map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                RunError::RuntimeMissing {
                    runtime: spec.program.clone(),
                }
            } else {
                RunError::Spawn {
                    runtime: spec.program.clone(),
                    source,
                }
            }
        })?;

    set_child_pid(child.id() as i32);
    let status = child.wait();
    clear_child_pid();

    let status = status.map_err(RunError::Wait)?;
    Ok(exit_code_of(status))
}

/// Extract the child's exit code, mapping signal deaths to `128 + signal`.
#[cfg(unix)]
fn exit_code_of(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code_of(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocation::InvocationSpec;

    #[cfg(unix)]
    fn stub_runtime(dir: &std::path::Path, script: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("stub-runtime");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().to_string()
    }

    #[cfg(unix)]
    fn spec_for(program: String) -> InvocationSpec {
        InvocationSpec {
            program,
            args: Vec::new(),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_zero_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let stub = stub_runtime(dir.path(), "#!/bin/sh\nexit 0\n");
        assert_eq!(run(&spec_for(stub)).unwrap(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_one_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let stub = stub_runtime(dir.path(), "#!/bin/sh\nexit 1\n");
        assert_eq!(run(&spec_for(stub)).unwrap(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_127_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let stub = stub_runtime(dir.path(), "#!/bin/sh\nexit 127\n");
        assert_eq!(run(&spec_for(stub)).unwrap(), 127);
    }

    #[cfg(unix)]
    #[test]
    fn test_signal_death_maps_to_128_plus_signal() {
        let dir = tempfile::tempdir().unwrap();
        // The stub kills itself with SIGTERM (15)
        let stub = stub_runtime(dir.path(), "#!/bin/sh\nkill -TERM $$\n");
        assert_eq!(run(&spec_for(stub)).unwrap(), 128 + 15);
    }

    #[test]
    fn test_missing_runtime_is_runtime_missing() {
        let spec = InvocationSpec {
            program: "runtime-that-does-not-exist-5a1e".to_string(),
            args: Vec::new(),
        };
        let err = run(&spec).unwrap_err();
        assert!(matches!(err, RunError::RuntimeMissing { .. }));
    }
}
