//! Run command handler: the interactive supervisor session.
//!
//! Stands in for the launcher window. Reads line commands from stdin, prints
//! state changes as they are reported, opens the web interface when the
//! server should be ready, and stops the server on `quit`, EOF or Ctrl-C.

use std::io::{self, BufRead};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, warn};

use launcher_core::LauncherEvent;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::open;
use crate::session::{HELP, SessionCommand};

/// Pause between launcher start and an automatic server start.
const AUTO_START_DELAY: Duration = Duration::from_millis(500);

/// Arguments for the run command.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunArgs {
    /// Start the server immediately.
    pub start: bool,
    /// Ignore the start-on-launch setting.
    pub no_auto_start: bool,
}

impl RunArgs {
    fn should_start(self, auto_start_on_launch: bool) -> bool {
        self.start || (auto_start_on_launch && !self.no_auto_start)
    }
}

/// Whether the session keeps reading input.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Execute the run command.
pub async fn execute(ctx: &CliContext, args: RunArgs) -> Result<()> {
    let mut events = ctx.events.subscribe();
    let config = ctx.config().load_or_init().await.map_err(CliError::from)?;

    println!("PhotoPrism launcher. Type 'help' for commands.");

    if args.should_start(config.auto_start_on_launch) {
        sleep(AUTO_START_DELAY).await;
        start_server(ctx).await;
    }

    let mut lines = spawn_input_reader();
    loop {
        tokio::select! {
            line = lines.recv() => match line {
                Some(Ok(line)) if line.trim().is_empty() => {}
                Some(Ok(line)) => match line.parse::<SessionCommand>() {
                    Ok(command) => {
                        if handle(ctx, command).await == Flow::Quit {
                            break;
                        }
                    }
                    Err(e) => println!("{e}"),
                },
                None => {
                    debug!("Session input closed");
                    break;
                }
                Some(Err(e)) => {
                    warn!(error = %e, "Failed to read session input");
                    break;
                }
            },
            event = events.recv() => match event {
                Ok(event) => show_event(&event).await,
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "Missed launcher events"),
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    ctx.supervisor().shutdown().await;
    // Report the final Stopped event if the shutdown produced one
    while let Ok(event) = events.try_recv() {
        show_event(&event).await;
    }
    Ok(())
}

/// Read stdin lines on a dedicated thread.
///
/// A blocking read on a runtime thread would keep the runtime alive after
/// Ctrl-C until the next newline.
fn spawn_input_reader() -> mpsc::Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::channel(8);
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let failed = line.is_err();
            if tx.blocking_send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}

async fn handle(ctx: &CliContext, command: SessionCommand) -> Flow {
    match command {
        SessionCommand::Start => start_server(ctx).await,
        SessionCommand::Stop => ctx.supervisor().stop().await,
        SessionCommand::Status => print_status(ctx),
        SessionCommand::Open(target) => {
            if let Err(e) = open::execute(ctx, target).await {
                eprintln!("Could not open {target}: {e:#}");
            }
        }
        SessionCommand::Help => println!("{HELP}"),
        SessionCommand::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Start the server; failures reach the user through the `StartFailed` event.
async fn start_server(ctx: &CliContext) {
    if let Err(e) = ctx.supervisor().start().await {
        debug!(error = %e, "Start request failed");
    }
}

fn print_status(ctx: &CliContext) {
    match ctx.supervisor().process_info() {
        Some(info) => {
            let pid = info
                .pid
                .map_or_else(|| "unknown".to_string(), |pid| pid.to_string());
            println!(
                "Running (pid {pid}, since {})",
                info.started_at.format("%Y-%m-%d %H:%M:%S")
            );
            println!("Log file: {}", info.log_file.display());
        }
        None => println!("Stopped"),
    }
}

async fn show_event(event: &LauncherEvent) {
    match event {
        LauncherEvent::Running { pid: Some(pid) } => {
            println!("PhotoPrism server running (pid {pid})");
        }
        LauncherEvent::Running { pid: None } => println!("PhotoPrism server running"),
        LauncherEvent::Stopped { exit: Some(exit) } if exit.is_unexpected() => {
            println!("PhotoPrism server stopped unexpectedly ({exit})");
        }
        LauncherEvent::Stopped { .. } => println!("PhotoPrism server stopped"),
        LauncherEvent::OpenWebUi { url } => {
            println!("Opening {url}");
            if let Err(e) = crate::desktop::open(url).await {
                warn!(error = %e, "Could not open web interface");
            }
        }
        LauncherEvent::StartFailed { message } => {
            eprintln!("Could not start PhotoPrism server: {message}");
        }
    }
}
