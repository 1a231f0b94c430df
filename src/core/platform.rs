//! Platform capabilities that not every target provides.
//!
//! The shell asks [`detect`] once at start-up and hands the result to the
//! commands that need it, so the rest of the code never branches on the
//! target OS. `None` means the capability is missing.

use std::io;
use std::path::Path;
use std::sync::Arc;

/// Changing Unix permission bits on a path.
pub trait PermissionControl: Send + Sync {
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()>;
}

/// Native `chmod(2)`.
#[cfg(unix)]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixPermissions;

#[cfg(unix)]
impl PermissionControl for UnixPermissions {
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        // SAFETY: `c_path` is a valid NUL-terminated string for the duration of the call.
        let rc = unsafe { libc::chmod(c_path.as_ptr(), mode as libc::mode_t) };
        if rc == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}

pub fn detect() -> Option<Arc<dyn PermissionControl>> {
    #[cfg(unix)]
    {
        Some(Arc::new(UnixPermissions))
    }
    #[cfg(not(unix))]
    {
        None
    }
}
