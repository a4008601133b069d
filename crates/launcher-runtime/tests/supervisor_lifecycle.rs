//! Server lifecycle against a fake server executable.

#![cfg(unix)]

mod common;

use std::fs;
use std::time::Duration;

use common::{FakeServer, Fixture, fast_config, wait_for_file};
use launcher_core::{LauncherEvent, ProcessError, ServerState};
use launcher_runtime::{START_MARKER, SupervisorConfig};
use tokio::time::sleep;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn missing_binary_is_reported_and_state_stays_stopped() {
    let mut fx = Fixture::new(FakeServer::Missing);

    let err = assert_err!(fx.supervisor.start().await);

    match err {
        ProcessError::BinaryNotFound { path } => assert_eq!(path, fx.bundle.server_binary()),
        other => panic!("expected BinaryNotFound, got {other:?}"),
    }
    assert_eq!(fx.supervisor.status(), ServerState::Stopped);
    assert!(matches!(
        fx.next_event().await,
        LauncherEvent::StartFailed { message } if message.contains("Expected at:")
    ));
}

#[tokio::test]
async fn spawn_failure_is_reported_and_state_stays_stopped() {
    let mut fx = Fixture::new(FakeServer::NotExecutable);

    let err = assert_err!(fx.supervisor.start().await);

    match err {
        ProcessError::SpawnFailed { path, reason } => {
            assert_eq!(path, fx.bundle.server_binary());
            assert!(!reason.is_empty());
        }
        other => panic!("expected SpawnFailed, got {other:?}"),
    }
    assert_eq!(fx.supervisor.status(), ServerState::Stopped);
    assert!(fx.supervisor.process_info().is_none());
    assert!(matches!(
        fx.next_event().await,
        LauncherEvent::StartFailed { .. }
    ));
    assert!(fx.drain_events().is_empty());
}

#[tokio::test]
async fn start_provisions_directories_even_without_binary() {
    let fx = Fixture::new(FakeServer::Missing);

    let _ = fx.supervisor.start().await;

    assert!(fx.pictures_root.join("originals").is_dir());
    assert!(fx.pictures_root.join("import").is_dir());
    assert!(fx.data_root.join("storage/config").is_dir());
}

#[tokio::test]
async fn start_reports_running_immediately() {
    let mut fx = Fixture::new(FakeServer::Cooperative);

    assert_ok!(fx.supervisor.start().await);

    assert_eq!(fx.supervisor.status(), ServerState::Running);
    let info = fx.supervisor.process_info().unwrap();
    assert!(info.pid.is_some());
    assert_eq!(fx.next_event().await, LauncherEvent::Running { pid: info.pid });

    fx.supervisor.stop().await;
}

#[tokio::test]
async fn server_exit_without_stop_transitions_to_stopped() {
    let mut fx = Fixture::new(FakeServer::ExitsImmediately);

    assert_ok!(fx.supervisor.start().await);
    assert!(matches!(fx.next_event().await, LauncherEvent::Running { .. }));

    match fx.next_event().await {
        LauncherEvent::Stopped { exit: Some(exit) } => {
            assert_eq!(exit.code, Some(3));
            assert!(!exit.requested);
            assert!(exit.is_unexpected());
        }
        other => panic!("expected Stopped with exit summary, got {other:?}"),
    }
    assert_eq!(fx.supervisor.status(), ServerState::Stopped);
    assert!(fx.supervisor.process_info().is_none());
}

#[tokio::test]
async fn stop_runs_graceful_stop_command() {
    let mut fx = Fixture::new(FakeServer::Cooperative);
    assert_ok!(fx.supervisor.start().await);
    assert!(wait_for_file(&fx.storage_file("server.pid"), |s| !s.trim().is_empty()).await);

    fx.supervisor.stop().await;

    assert!(fx.storage_file("stop-called").exists());
    assert_eq!(fx.supervisor.status(), ServerState::Stopped);
    assert!(fx.supervisor.process_info().is_none());

    let events = fx.drain_events();
    assert!(matches!(events.first(), Some(LauncherEvent::Running { .. })));
    match events.last() {
        Some(LauncherEvent::Stopped { exit: Some(exit) }) => assert!(exit.requested),
        other => panic!("expected Stopped with exit summary, got {other:?}"),
    }
}

#[tokio::test]
async fn start_while_running_is_a_noop() {
    let mut fx = Fixture::new(FakeServer::Cooperative);

    assert_ok!(fx.supervisor.start().await);
    let first_pid = fx.supervisor.process_info().unwrap().pid;
    assert_ok!(fx.supervisor.start().await);

    assert!(wait_for_file(&fx.storage_file("starts"), |s| !s.is_empty()).await);
    sleep(Duration::from_millis(200)).await;
    assert_eq!(fx.start_count(), 1);
    assert_eq!(fx.supervisor.process_info().unwrap().pid, first_pid);

    let running = fx
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, LauncherEvent::Running { .. }))
        .count();
    assert_eq!(running, 1);

    fx.supervisor.stop().await;
}

#[tokio::test]
async fn stop_while_stopped_runs_nothing() {
    let mut fx = Fixture::new(FakeServer::Cooperative);

    fx.supervisor.stop().await;

    assert!(!fx.storage_file("stop-called").exists());
    assert_eq!(fx.supervisor.status(), ServerState::Stopped);
    assert!(fx.drain_events().is_empty());
}

#[tokio::test]
async fn restart_after_stop_spawns_again() {
    let fx = Fixture::new(FakeServer::Cooperative);

    assert_ok!(fx.supervisor.start().await);
    assert!(wait_for_file(&fx.storage_file("server.pid"), |s| !s.trim().is_empty()).await);
    fx.supervisor.stop().await;
    fs::remove_file(fx.storage_file("server.pid")).unwrap();

    assert_ok!(fx.supervisor.start().await);
    assert_eq!(fx.supervisor.status(), ServerState::Running);
    assert!(wait_for_file(&fx.storage_file("starts"), |s| s.lines().count() == 2).await);

    fx.supervisor.stop().await;
    assert_eq!(fx.supervisor.status(), ServerState::Stopped);
}

#[tokio::test]
async fn readiness_asks_to_open_web_ui() {
    let options = SupervisorConfig {
        readiness_delay: Duration::from_millis(100),
        ..fast_config()
    };
    let mut fx = Fixture::with_config(FakeServer::Cooperative, options);

    assert_ok!(fx.supervisor.start().await);

    assert!(matches!(fx.next_event().await, LauncherEvent::Running { .. }));
    assert_eq!(
        fx.next_event().await,
        LauncherEvent::OpenWebUi {
            url: "http://localhost:2342".to_string()
        }
    );

    fx.supervisor.stop().await;
}

#[tokio::test]
async fn stop_cancels_pending_readiness() {
    let options = SupervisorConfig {
        readiness_delay: Duration::from_millis(300),
        ..fast_config()
    };
    let mut fx = Fixture::with_config(FakeServer::Cooperative, options);

    assert_ok!(fx.supervisor.start().await);
    fx.supervisor.stop().await;
    sleep(Duration::from_millis(600)).await;

    let events = fx.drain_events();
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, LauncherEvent::OpenWebUi { .. })),
        "unexpected events: {events:?}"
    );
}

#[tokio::test]
async fn server_exit_cancels_pending_readiness() {
    let options = SupervisorConfig {
        readiness_delay: Duration::from_millis(300),
        ..fast_config()
    };
    let mut fx = Fixture::with_config(FakeServer::ExitsImmediately, options);

    assert_ok!(fx.supervisor.start().await);
    assert!(fx.wait_for_state(ServerState::Stopped).await);
    sleep(Duration::from_millis(600)).await;

    let events = fx.drain_events();
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, LauncherEvent::OpenWebUi { .. })),
        "unexpected events: {events:?}"
    );
}

#[tokio::test]
async fn server_output_goes_to_log_after_marker() {
    let fx = Fixture::new(FakeServer::Cooperative);

    assert_ok!(fx.supervisor.start().await);
    assert!(wait_for_file(&fx.log_file(), |s| s.contains("fake server listening")).await);

    let log = fs::read_to_string(fx.log_file()).unwrap();
    let marker = log.find(START_MARKER).unwrap();
    let output = log.find("fake server listening").unwrap();
    assert!(marker < output);

    fx.supervisor.stop().await;
    let log = fs::read_to_string(fx.log_file()).unwrap();
    assert!(log.contains("fake server stopping"));
}

#[tokio::test]
async fn server_receives_launcher_environment() {
    let fx = Fixture::new(FakeServer::Cooperative);

    assert_ok!(fx.supervisor.start().await);
    assert!(wait_for_file(&fx.storage_file("env"), |s| s.contains("PHOTOPRISM_ADMIN_USER")).await);

    let env = fs::read_to_string(fx.storage_file("env")).unwrap();
    let originals = fx.pictures_root.join("originals");
    assert!(env.contains(&format!("PHOTOPRISM_ORIGINALS_PATH={}", originals.display())));
    assert!(env.contains("PHOTOPRISM_ADMIN_USER=admin"));
    assert!(env.contains("PHOTOPRISM_ADMIN_PASSWORD=photoprism"));
    assert!(env.contains(&format!("PATH={}", fx.bundle.executable_dir.display())));

    fx.supervisor.stop().await;
}

#[tokio::test]
async fn hanging_stop_command_still_ends_stopped() {
    let options = SupervisorConfig {
        graceful_stop_timeout: Duration::from_millis(300),
        exit_grace: Duration::from_millis(200),
        ..fast_config()
    };
    let fx = Fixture::with_config(FakeServer::HangingStop, options);

    assert_ok!(fx.supervisor.start().await);
    fx.supervisor.stop().await;

    assert!(fx.storage_file("stop-called").exists());
    assert_eq!(fx.supervisor.status(), ServerState::Stopped);
}

#[tokio::test]
async fn server_ignoring_sigterm_is_killed() {
    let options = SupervisorConfig {
        exit_grace: Duration::from_millis(200),
        terminate_grace: Duration::from_millis(200),
        ..fast_config()
    };
    let mut fx = Fixture::with_config(FakeServer::IgnoresTerm, options);

    assert_ok!(fx.supervisor.start().await);
    assert!(wait_for_file(&fx.storage_file("starts"), |s| !s.is_empty()).await);
    fx.supervisor.stop().await;

    assert_eq!(fx.supervisor.status(), ServerState::Stopped);
    match fx.drain_events().last() {
        Some(LauncherEvent::Stopped { exit: Some(exit) }) => {
            assert_eq!(exit.signal, Some(9));
            assert!(exit.requested);
        }
        other => panic!("expected Stopped with exit summary, got {other:?}"),
    }
}
