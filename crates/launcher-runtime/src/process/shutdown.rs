//! Forced termination of the server process.
//!
//! Used when the server's own `stop` subcommand did not bring it down.

use std::io;
use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::Child;
#[cfg(unix)]
use tracing::debug;

/// Terminate `child` and reap it.
///
/// On unix the child first gets SIGTERM and `grace` to exit on its own before
/// it is killed. Elsewhere it is killed straight away. The child is always
/// waited on so no zombie is left behind.
pub async fn terminate_child(child: &mut Child, grace: Duration) -> io::Result<ExitStatus> {
    #[cfg(unix)]
    {
        if !request_exit(child)? {
            return child.wait().await;
        }
        if let Ok(status) = tokio::time::timeout(grace, child.wait()).await {
            return status;
        }
        debug!(pid = ?child.id(), "Server ignored SIGTERM; killing it");
    }

    #[cfg(not(unix))]
    let _ = grace;

    // Child::kill is SIGKILL on unix and TerminateProcess on Windows
    child.kill().await?;
    child.wait().await
}

/// Send SIGTERM. Returns `false` if the process is already gone or reaped.
#[cfg(unix)]
fn request_exit(child: &Child) -> io::Result<bool> {
    use nix::errno::Errno;
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    let Some(pid) = child.id() else {
        return Ok(false);
    };
    let pid = Pid::from_raw(i32::try_from(pid).map_err(io::Error::other)?);

    match kill(pid, Signal::SIGTERM) {
        Ok(()) => Ok(true),
        Err(Errno::ESRCH) => Ok(false),
        Err(e) => Err(io::Error::other(e)),
    }
}
