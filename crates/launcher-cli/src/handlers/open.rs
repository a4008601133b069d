//! Open command handler.
//!
//! Resolves a target to a URL or path and hands it to the desktop.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Result;

use launcher_core::CoreError;
use launcher_core::paths::{ResolvedPaths, ensure_directory};
use launcher_runtime::LogSink;

use crate::bootstrap::CliContext;
use crate::commands::OpenTarget;
use crate::desktop;
use crate::error::CliError;

/// Execute the open command.
pub async fn execute(ctx: &CliContext, target: OpenTarget) -> Result<()> {
    let location = resolve(ctx, target).await?;
    println!("Opening {}", location.to_string_lossy());
    desktop::open(&location).await
}

/// Resolve `target` into something the desktop can open.
///
/// Folders are created if missing and the log file is seeded if absent, so
/// the desktop never gets a dangling path.
pub async fn resolve(ctx: &CliContext, target: OpenTarget) -> Result<OsString> {
    let location = match target {
        OpenTarget::Web => return Ok(ctx.supervisor().options().web_ui_url.clone().into()),
        OpenTarget::Pictures => prepared_dir(resolved_paths(ctx).await?.pictures_root)?,
        OpenTarget::Data => prepared_dir(resolved_paths(ctx).await?.data_root)?,
        OpenTarget::Logs => {
            let log_file = resolved_paths(ctx).await?.log_file;
            LogSink::new(&log_file)
                .ensure_exists()
                .map_err(CliError::from)?;
            log_file
        }
    };

    Ok(location.into_os_string())
}

async fn resolved_paths(ctx: &CliContext) -> Result<ResolvedPaths, CliError> {
    let config = ctx.config().load_or_init().await?;
    Ok(ctx.config().resolve_paths(&config))
}

fn prepared_dir(dir: PathBuf) -> Result<PathBuf, CliError> {
    ensure_directory(&dir).map_err(|e| CliError::from(CoreError::from(e)))?;
    Ok(dir)
}
