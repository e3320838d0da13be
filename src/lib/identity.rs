//! Host identity capture
//!
//! The container runs the tool as the invoking user's numeric uid/gid so
//! that everything it writes into the mounted project root is owned by the
//! caller, not by the image's default root user. The identity is captured
//! once at startup and threaded through the invocation builder.

use thiserror::Error;

/// Failure to resolve the invoking user's identity.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No numeric uid/gid is available on this platform. The launcher
    /// fails rather than letting the container fall back to root.
    #[error("user identity (uid/gid) is not available on this platform")]
    Unsupported,
}

/// The invoking user's numeric user and group ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub uid: u32,
    pub gid: u32,
}

impl Identity {
    /// Capture the real uid/gid of the current process.
    #[cfg(unix)]
    pub fn current() -> Result<Self, IdentityError> {
        let uid = unsafe { libc::getuid() };
        let gid = unsafe { libc::getgid() };
        Ok(Identity { uid, gid })
    }

    #[cfg(not(unix))]
    pub fn current() -> Result<Self, IdentityError> {
        Err(IdentityError::Unsupported)
    }

    /// The `uid:gid` form the container runtime's `--user` flag accepts.
    pub fn spec(&self) -> String {
        format!("{}:{}", self.uid, self.gid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_current_matches_host_ids() {
        let identity = Identity::current().unwrap();
        assert_eq!(identity.uid, unsafe { libc::getuid() });
        assert_eq!(identity.gid, unsafe { libc::getgid() });
    }

    #[cfg(unix)]
    #[test]
    fn test_current_is_stable_within_a_process() {
        assert_eq!(Identity::current().unwrap(), Identity::current().unwrap());
    }

    #[test]
    fn test_spec_format() {
        let identity = Identity { uid: 1000, gid: 1000 };
        assert_eq!(identity.spec(), "1000:1000");

        let root = Identity { uid: 0, gid: 0 };
        assert_eq!(root.spec(), "0:0");
    }
}
