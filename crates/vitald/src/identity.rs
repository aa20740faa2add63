//! Execution-identity checks.
//!
//! The image already runs the process under a dedicated unprivileged user;
//! this re-checks at startup so a misconfigured deployment (e.g. a manual
//! `docker run --user root`) fails fast instead of serving with elevated
//! privileges.

/// Whether the process runs with effective uid 0.
#[cfg(unix)]
pub fn running_as_root() -> bool {
    // SAFETY: geteuid is always safe to call and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn running_as_root() -> bool {
    false
}
