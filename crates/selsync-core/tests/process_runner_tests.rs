//! End-to-end runs through a real child process standing in for rclone
#![cfg(unix)]

mod common;

use std::collections::BTreeSet;
use std::sync::Arc;

use common::load_manager;
use selsync_core::{ProcessRunner, SyncAction, SyncOrchestrator, locate_rclone_config};
use selsync_test_utils::TestProject;
use selsync_test_utils::rclone::{FAIL_MARKER, install_fake_rclone, recorded_invocations};

fn project_with_fake(project: &TestProject) -> (SyncOrchestrator, std::path::PathBuf) {
    let bin = project.root().join("bin");
    let script = install_fake_rclone(&bin);
    let runner = ProcessRunner::with_program(script.to_string_lossy());
    let orchestrator = SyncOrchestrator::new(load_manager(project).handle(), Arc::new(runner));
    (orchestrator, bin)
}

#[tokio::test]
async fn dry_run_push_detects_folders_with_content() {
    let project = TestProject::new()
        .with_folder("audio", "assets/audio")
        .with_folder("art", "assets/art")
        .with_folder("video", "assets/video");
    project.write_file("assets/audio/kick.wav", "RIFF");
    project.create_dir("assets/art");
    project.create_dir("assets/video");
    let (orchestrator, bin) = project_with_fake(&project);

    let changed = orchestrator
        .detect_changed_folders(["audio", "art", "video"])
        .await;

    assert_eq!(changed, BTreeSet::from(["audio".to_string()]));
    let invocations = recorded_invocations(&bin);
    assert_eq!(invocations.len(), 3);
    assert!(invocations.iter().all(|line| line.ends_with("--dry-run")));
}

#[tokio::test]
async fn failing_process_becomes_folder_failure() {
    let project = TestProject::new()
        .with_folder("audio", "assets/audio")
        .with_folder("art", "assets/art");
    project.create_dir("assets/audio");
    project.write_file(&format!("assets/art/{FAIL_MARKER}"), "");
    let (orchestrator, _bin) = project_with_fake(&project);

    let outcomes = orchestrator
        .execute_action(["audio", "art"], SyncAction::Pull, false)
        .await;

    let art = &outcomes[0];
    let error = art.error().unwrap();
    assert!(error.contains("exit code 1"), "{error}");
    assert!(error.contains("directory not found"), "{error}");
    assert!(outcomes[1].is_success());
}

#[tokio::test]
async fn locates_config_file_from_second_line() {
    let project = TestProject::new();
    let bin = project.root().join("bin");
    let script = install_fake_rclone(&bin);

    let runner = ProcessRunner::with_program(script.to_string_lossy());
    let path = locate_rclone_config(&runner).await.unwrap();

    assert!(path.as_str().ends_with("bin/rclone.conf"));
}
