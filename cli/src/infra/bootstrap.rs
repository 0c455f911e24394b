//! Process start-up adjustments to the executable search path.
//!
//! On Windows the OpenSSH binaries that match the bundled Git toolchain live
//! in Git for Windows' `usr\bin`, which is usually not on `PATH`.

use std::ffi::{OsStr, OsString};
use std::path::Path;

/// Directory prepended to `PATH` on Windows.
pub const GIT_FOR_WINDOWS_BIN: &str = r"C:\Program Files\Git\usr\bin";

/// Separator between entries of `PATH` on this platform.
pub const PATH_LIST_SEPARATOR: &str = if cfg!(windows) { ";" } else { ":" };

/// Prepend the Git for Windows tool directory to `PATH`. No-op elsewhere.
///
/// # Safety
///
/// Mutates the process environment. Call it before any other thread exists,
/// first thing in `main`.
#[allow(unsafe_code)]
pub unsafe fn bootstrap() {
    #[cfg(windows)]
    // SAFETY: forwarded from the caller.
    unsafe {
        prepend_to_path(Path::new(GIT_FOR_WINDOWS_BIN));
    }
}

/// Set `PATH` to `dir` followed by its current value.
///
/// # Safety
///
/// Same contract as [`std::env::set_var`]: no other thread may read or write
/// the environment concurrently.
#[allow(unsafe_code)]
pub unsafe fn prepend_to_path(dir: &Path) {
    let value = prefixed_search_path(dir, std::env::var_os("PATH").as_deref());
    // SAFETY: forwarded from the caller.
    unsafe { std::env::set_var("PATH", value) };
}

/// `dir`, the platform separator, then `existing`. A missing or empty
/// `existing` yields `dir` alone.
#[must_use]
pub fn prefixed_search_path(dir: &Path, existing: Option<&OsStr>) -> OsString {
    let mut value = OsString::from(dir);
    if let Some(existing) = existing.filter(|p| !p.is_empty()) {
        value.push(PATH_LIST_SEPARATOR);
        value.push(existing);
    }
    value
}
