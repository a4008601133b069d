//! Supervisor for the bundled PhotoPrism server process.
//!
//! The `ServerSupervisor` owns the single server process slot. Adapters
//! (CLI session, GUI shell) issue `start`/`stop`/`status` and listen for
//! `LauncherEvent`s; they never hold process handles themselves.
//!
//! Key design decisions:
//! - **Serialized commands**: `start` and `stop` take an async command lock,
//!   so at most one transition is in flight
//! - **Short state lock**: the process slot sits behind a std mutex that is
//!   never held across an await; the exit watcher and readiness timer take it
//!   to apply their effects, and events are emitted while it is held
//! - **Epochs**: every spawn gets a fresh epoch; watcher and timer effects
//!   for an older epoch are ignored
//! - **Stop always wins**: after `stop` returns the state is Stopped, even if
//!   the OS process could not be confirmed dead

use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::process::{Child, Command};
use tokio::sync::watch;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use launcher_core::{
    AdminCredentials, BundleLayout, ConfigService, ExitSummary, LauncherEvent,
    LauncherEventEmitter, ProcessError, ServerEnvironment, ServerState, build_environment,
    provision, validate_configuration,
};

use super::readiness::ReadinessTimer;
use super::shutdown::terminate_child;
use crate::log_sink::LogSink;

/// Address the server's web interface listens on.
pub const DEFAULT_WEB_UI_URL: &str = "http://localhost:2342";

/// Server subcommand that runs in the foreground.
const START_ARG: &str = "start";
/// Server subcommand that asks a running server to shut down.
const STOP_ARG: &str = "stop";

/// Extra time allowed for the watcher to reap a terminated child.
const EXIT_SETTLE: Duration = Duration::from_secs(1);

/// Supervisor tunables.
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    /// Delay between spawn and asking the UI to open the web interface.
    pub readiness_delay: Duration,
    /// Upper bound for the server's `stop` subcommand.
    pub graceful_stop_timeout: Duration,
    /// How long to wait for the server to exit after a graceful stop.
    pub exit_grace: Duration,
    /// SIGTERM → SIGKILL grace when the server has to be terminated.
    pub terminate_grace: Duration,
    /// URL handed to the UI when the server is ready.
    pub web_ui_url: String,
    /// Initial admin account for the server.
    pub admin: AdminCredentials,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            readiness_delay: Duration::from_secs(8),
            graceful_stop_timeout: Duration::from_secs(30),
            exit_grace: Duration::from_secs(5),
            terminate_grace: Duration::from_secs(5),
            web_ui_url: DEFAULT_WEB_UI_URL.to_string(),
            admin: AdminCredentials::default(),
        }
    }
}

/// Public view of the tracked server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub pid: Option<u32>,
    pub started_at: DateTime<Local>,
    pub log_file: PathBuf,
}

/// The one live server process.
struct ServerProcessHandle {
    pid: Option<u32>,
    started_at: DateTime<Local>,
    environment: ServerEnvironment,
    log_file: PathBuf,
    epoch: u64,
    /// Set once `stop` has taken over this process.
    stopping: bool,
    /// Tells the exit watcher to terminate the child.
    terminate: CancellationToken,
    /// Flips to `true` once the exit watcher has reaped the child.
    exited: watch::Receiver<bool>,
    readiness: Option<ReadinessTimer>,
}

#[derive(Default)]
struct Slot {
    next_epoch: u64,
    handle: Option<ServerProcessHandle>,
}

/// What `stop` needs from the handle once the state lock is released.
struct StopTicket {
    epoch: u64,
    pid: Option<u32>,
    environment: ServerEnvironment,
    log_file: PathBuf,
    terminate: CancellationToken,
    exited: watch::Receiver<bool>,
}

struct Shared {
    config: Arc<ConfigService>,
    bundle: BundleLayout,
    options: SupervisorConfig,
    emitter: Arc<dyn LauncherEventEmitter>,
    commands: tokio::sync::Mutex<()>,
    slot: Mutex<Slot>,
}

impl Shared {
    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: LauncherEvent) {
        self.emitter.emit(event);
    }

    /// Mark the tracked process as stopping and hand out what `stop` needs.
    fn begin_stop(&self) -> Option<StopTicket> {
        let mut slot = self.slot();
        let handle = slot.handle.as_mut()?;

        handle.stopping = true;
        drop(handle.readiness.take());

        Some(StopTicket {
            epoch: handle.epoch,
            pid: handle.pid,
            environment: handle.environment.clone(),
            log_file: handle.log_file.clone(),
            terminate: handle.terminate.clone(),
            exited: handle.exited.clone(),
        })
    }

    /// Termination callback: runs on the watcher task once the child is reaped.
    fn child_exited(&self, epoch: u64, status: io::Result<ExitStatus>) {
        let mut slot = self.slot();
        let Some(handle) = slot.handle.take_if(|h| h.epoch == epoch) else {
            debug!(epoch, "Exit of an already released server process");
            return;
        };

        let exit = match status {
            Ok(status) => {
                let summary = ExitSummary::from_status(status, handle.stopping);
                if summary.is_unexpected() {
                    warn!(pid = ?handle.pid, exit = %summary, "PhotoPrism server exited unexpectedly");
                } else {
                    info!(pid = ?handle.pid, exit = %summary, "PhotoPrism server exited");
                }
                Some(summary)
            }
            Err(e) => {
                warn!(pid = ?handle.pid, error = %e, "Could not collect server exit status");
                None
            }
        };

        self.emit(LauncherEvent::Stopped { exit });
    }

    /// Drop the handle for `epoch` if the watcher has not done so already.
    fn release(&self, epoch: u64) {
        let mut slot = self.slot();
        if let Some(handle) = slot.handle.take_if(|h| h.epoch == epoch) {
            warn!(pid = ?handle.pid, "Server process did not confirm exit; releasing it");
            self.emit(LauncherEvent::Stopped { exit: None });
        }
    }

    /// Readiness action: only fires for the current, not-stopping process.
    fn server_ready(&self, epoch: u64) {
        let slot = self.slot();
        let current = slot
            .handle
            .as_ref()
            .is_some_and(|h| h.epoch == epoch && !h.stopping);

        if current {
            info!(url = %self.options.web_ui_url, "PhotoPrism server should be ready");
            self.emit(LauncherEvent::OpenWebUi {
                url: self.options.web_ui_url.clone(),
            });
        } else {
            debug!(epoch, "Readiness delay elapsed for a server that is gone");
        }
    }
}

/// Supervisor for the PhotoPrism server process.
///
/// # Example
///
/// ```ignore
/// let supervisor = ServerSupervisor::new(config, bundle, SupervisorConfig::default(), emitter);
/// supervisor.start().await?;
/// assert_eq!(supervisor.status(), ServerState::Running);
/// supervisor.stop().await;
/// ```
#[derive(Clone)]
pub struct ServerSupervisor {
    shared: Arc<Shared>,
}

impl ServerSupervisor {
    /// Create a supervisor in the Stopped state.
    pub fn new(
        config: Arc<ConfigService>,
        bundle: BundleLayout,
        options: SupervisorConfig,
        emitter: Arc<dyn LauncherEventEmitter>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                bundle,
                options,
                emitter,
                commands: tokio::sync::Mutex::new(()),
                slot: Mutex::new(Slot::default()),
            }),
        }
    }

    /// Current server state. No side effects.
    pub fn status(&self) -> ServerState {
        if self.shared.slot().handle.is_some() {
            ServerState::Running
        } else {
            ServerState::Stopped
        }
    }

    /// Details of the tracked process, if any.
    pub fn process_info(&self) -> Option<ProcessInfo> {
        self.shared.slot().handle.as_ref().map(|h| ProcessInfo {
            pid: h.pid,
            started_at: h.started_at,
            log_file: h.log_file.clone(),
        })
    }

    pub fn bundle(&self) -> &BundleLayout {
        &self.shared.bundle
    }

    pub fn options(&self) -> &SupervisorConfig {
        &self.shared.options
    }

    /// Start the server. A no-op if it is already running.
    ///
    /// Failures are returned and also emitted as `StartFailed`; the state
    /// stays Stopped.
    pub async fn start(&self) -> Result<(), ProcessError> {
        let _command = self.shared.commands.lock().await;

        if self.status().is_running() {
            debug!("Start requested while the server is running; ignoring");
            return Ok(());
        }

        let result = self.spawn_server().await;
        if let Err(e) = &result {
            error!(error = %e, "Failed to start PhotoPrism server");
            self.shared.emit(LauncherEvent::StartFailed {
                message: e.to_string(),
            });
        }
        result
    }

    async fn spawn_server(&self) -> Result<(), ProcessError> {
        let shared = &self.shared;

        let config = shared
            .config
            .load_or_init()
            .await
            .map_err(|e| ProcessError::InvalidConfiguration(e.to_string()))?;
        validate_configuration(&config)
            .map_err(|e| ProcessError::InvalidConfiguration(e.to_string()))?;

        let paths = shared.config.resolve_paths(&config);
        let report = provision(&paths);
        for failure in &report.failures {
            warn!(error = %failure, "Could not prepare directory");
        }

        let binary = shared.bundle.server_binary();
        if !binary.is_file() {
            return Err(ProcessError::BinaryNotFound { path: binary });
        }

        let environment = build_environment(
            std::env::vars_os(),
            &paths,
            &shared.bundle,
            &shared.options.admin,
        );

        let (stdout, stderr) = log_streams(LogSink::new(&paths.log_file).begin_run(), &paths.log_file);

        let mut command = Command::new(&binary);
        command
            .arg(START_ARG)
            .env_clear()
            .envs(environment.iter())
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .kill_on_drop(true);

        let child = command.spawn().map_err(|e| ProcessError::SpawnFailed {
            path: binary.clone(),
            reason: e.to_string(),
        })?;
        let pid = child.id();
        info!(pid = ?pid, binary = %binary.display(), "Started PhotoPrism server");

        let terminate = CancellationToken::new();
        let (exited_tx, exited_rx) = watch::channel(false);

        let epoch = {
            let mut slot = shared.slot();
            slot.next_epoch += 1;
            let epoch = slot.next_epoch;

            let ready = Arc::clone(shared);
            let readiness = ReadinessTimer::schedule(shared.options.readiness_delay, move || {
                ready.server_ready(epoch);
            });

            slot.handle = Some(ServerProcessHandle {
                pid,
                started_at: Local::now(),
                environment,
                log_file: paths.log_file.clone(),
                epoch,
                stopping: false,
                terminate: terminate.clone(),
                exited: exited_rx,
                readiness: Some(readiness),
            });
            shared.emit(LauncherEvent::Running { pid });
            epoch
        };

        tokio::spawn(watch_child(
            Arc::clone(shared),
            epoch,
            child,
            terminate,
            exited_tx,
        ));

        Ok(())
    }

    /// Stop the server. A no-op if it is not running.
    ///
    /// Runs the server's own `stop` subcommand first, then terminates the
    /// process if it is still alive. Always ends in Stopped.
    pub async fn stop(&self) {
        let _command = self.shared.commands.lock().await;

        let Some(ticket) = self.shared.begin_stop() else {
            debug!("Stop requested while the server is stopped; ignoring");
            return;
        };
        info!(pid = ?ticket.pid, "Stopping PhotoPrism server");

        self.run_stop_command(&ticket).await;

        let options = &self.shared.options;
        let mut exited = ticket.exited.clone();
        if !wait_for_exit(&mut exited, options.exit_grace).await {
            info!(pid = ?ticket.pid, "Server still running after graceful stop; terminating");
            ticket.terminate.cancel();
            if !wait_for_exit(&mut exited, options.terminate_grace + EXIT_SETTLE).await {
                warn!(pid = ?ticket.pid, "Server did not exit after termination");
            }
        }

        self.shared.release(ticket.epoch);
    }

    /// Stop the server before the launcher exits.
    pub async fn shutdown(&self) {
        if self.status().is_running() {
            info!("Launcher exiting; stopping PhotoPrism server");
        }
        self.stop().await;
    }

    /// Run `<server> stop` with the running server's environment.
    ///
    /// Failures are logged, never propagated: the forced path follows.
    async fn run_stop_command(&self, ticket: &StopTicket) {
        let binary = self.shared.bundle.server_binary();
        let (stdout, stderr) = log_streams(LogSink::new(&ticket.log_file).open(), &ticket.log_file);

        let mut command = Command::new(&binary);
        command
            .arg(STOP_ARG)
            .env_clear()
            .envs(ticket.environment.iter())
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .kill_on_drop(true);

        let limit = self.shared.options.graceful_stop_timeout;
        match timeout(limit, command.status()).await {
            Ok(Ok(status)) if status.success() => debug!("Graceful stop command finished"),
            Ok(Ok(status)) => warn!(%status, "Graceful stop command failed"),
            Ok(Err(e)) => {
                warn!(binary = %binary.display(), error = %e, "Could not run graceful stop command");
            }
            Err(_) => warn!(timeout = ?limit, "Graceful stop command timed out"),
        }
    }
}

impl fmt::Debug for ServerSupervisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerSupervisor")
            .field("bundle", &self.shared.bundle)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

/// Exit watcher: owns the child until it is reaped.
async fn watch_child(
    shared: Arc<Shared>,
    epoch: u64,
    mut child: Child,
    terminate: CancellationToken,
    exited: watch::Sender<bool>,
) {
    let waited = tokio::select! {
        status = child.wait() => Some(status),
        () = terminate.cancelled() => None,
    };

    let status = match waited {
        Some(status) => status,
        None => terminate_child(&mut child, shared.options.terminate_grace).await,
    };

    shared.child_exited(epoch, status);
    let _ = exited.send(true);
}

/// Wait until the watcher reports the child gone. Returns `false` on timeout.
async fn wait_for_exit(exited: &mut watch::Receiver<bool>, limit: Duration) -> bool {
    // A dropped sender means the watcher is gone too
    timeout(limit, exited.wait_for(|done| *done)).await.is_ok()
}

/// Child stdout/stderr pointing at the log file, or discarded if it cannot be opened.
fn log_streams(log: io::Result<File>, path: &Path) -> (Stdio, Stdio) {
    let streams = log.and_then(|file| {
        let stderr = file.try_clone()?;
        Ok((file, stderr))
    });

    match streams {
        Ok((stdout, stderr)) => (Stdio::from(stdout), Stdio::from(stderr)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot open server log file; discarding output");
            (Stdio::null(), Stdio::null())
        }
    }
}
