//! Hand URLs and paths to the desktop environment.

use std::ffi::OsStr;

use anyhow::{Result, bail};
use tokio::process::Command;
use tracing::debug;

/// Open `target` (a URL, folder or file) with the platform's default handler.
pub async fn open(target: impl AsRef<OsStr>) -> Result<()> {
    let target = target.as_ref();
    debug!(target = %target.to_string_lossy(), "Opening with desktop handler");

    let status = opener(target).status().await?;
    if !status.success() {
        bail!(
            "Failed to open {} (exit code: {:?})",
            target.to_string_lossy(),
            status.code()
        );
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn opener(target: &OsStr) -> Command {
    let mut command = Command::new("open");
    command.arg(target);
    command
}

#[cfg(windows)]
fn opener(target: &OsStr) -> Command {
    // `start` treats its first quoted argument as a window title
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(target);
    command
}

#[cfg(not(any(target_os = "macos", windows)))]
fn opener(target: &OsStr) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(target);
    command
}
