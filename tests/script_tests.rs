#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::time::Duration;

use tempfile::TempDir;
use vmpanel::config::{SCRIPT_CREATE_VMS, SCRIPT_DELETE_VMS, SCRIPT_LIST_VMS, SCRIPT_PROCESS_COUNT};
use vmpanel::models::JobPhase;
use vmpanel::services::{
    CreationRequest, HostScripts, JobProbe, ProcessCountProbe, ScriptVmCommands, VmCommands,
};

fn write_script(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn scripts_dir() -> (TempDir, HostScripts) {
    let dir = tempfile::tempdir().unwrap();
    let scripts = HostScripts::new(dir.path());
    (dir, scripts)
}

#[tokio::test]
async fn listing_script_output_becomes_vm_names() {
    let (dir, scripts) = scripts_dir();
    write_script(dir.path(), SCRIPT_LIST_VMS, "printf 'host-1\\nhost-2\\n'");
    let vms = ScriptVmCommands::new(scripts);
    assert_eq!(vms.list_running().await.unwrap(), vec!["host-1", "host-2"]);
}

#[tokio::test]
async fn failing_listing_script_is_an_error() {
    let (dir, scripts) = scripts_dir();
    write_script(dir.path(), SCRIPT_LIST_VMS, "echo broken >&2; exit 3");
    let vms = ScriptVmCommands::new(scripts);
    let err = vms.list_running().await.unwrap_err();
    assert!(err.to_string().contains(SCRIPT_LIST_VMS));
}

#[tokio::test]
async fn missing_script_is_an_error() {
    let (_dir, scripts) = scripts_dir();
    let vms = ScriptVmCommands::new(scripts);
    assert!(vms.list_running().await.is_err());
}

#[tokio::test]
async fn process_counts_drive_the_phase() {
    let (dir, scripts) = scripts_dir();
    write_script(
        dir.path(),
        SCRIPT_PROCESS_COUNT,
        r#"case "$1" in wget) echo 2 ;; virt-install) echo 3 ;; esac"#,
    );
    let probe = ProcessCountProbe::new(scripts);
    assert_eq!(probe.count_processes("wget").await.unwrap(), 2);
    assert_eq!(probe.job_phase().await.unwrap(), JobPhase::Creating);
}

#[tokio::test]
async fn non_numeric_count_is_an_error() {
    let (dir, scripts) = scripts_dir();
    write_script(dir.path(), SCRIPT_PROCESS_COUNT, "echo lots");
    let probe = ProcessCountProbe::new(scripts);
    assert!(probe.job_phase().await.is_err());
}

#[tokio::test]
async fn delete_passes_every_name_as_an_argument() {
    let (dir, scripts) = scripts_dir();
    let log = dir.path().join("deleted.log");
    write_script(
        dir.path(),
        SCRIPT_DELETE_VMS,
        &format!(r#"for n in "$@"; do echo "$n" >> '{}'; done"#, log.display()),
    );
    let vms = ScriptVmCommands::new(scripts);
    vms.delete(&["host-2".to_string(), "host-1".to_string()])
        .await
        .unwrap();
    assert_eq!(fs::read_to_string(&log).unwrap(), "host-2\nhost-1\n");
}

#[tokio::test]
async fn delete_failure_is_only_logged() {
    let (dir, scripts) = scripts_dir();
    write_script(dir.path(), SCRIPT_DELETE_VMS, "exit 1");
    let vms = ScriptVmCommands::new(scripts);
    assert!(vms.delete(&["host-1".to_string()]).await.is_ok());
}

#[tokio::test]
async fn creation_runs_in_background_with_three_arguments() {
    let (dir, scripts) = scripts_dir();
    let log = dir.path().join("created.log");
    write_script(
        dir.path(),
        SCRIPT_CREATE_VMS,
        &format!(r#"sleep 1; echo "$1|$2|$3" > '{}'"#, log.display()),
    );
    let vms = ScriptVmCommands::new(scripts);
    vms.start_creation(&CreationRequest {
        url: "https://example.com/a.iso".into(),
        num_of_nodes: "2".into(),
        prefix: "unset".into(),
    })
    .await
    .unwrap();

    // Returned before the script finished.
    assert!(!log.exists());

    let mut contents = None;
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        if let Ok(c) = fs::read_to_string(&log) {
            if !c.is_empty() {
                contents = Some(c);
                break;
            }
        }
    }
    assert_eq!(contents.as_deref(), Some("https://example.com/a.iso|2|unset\n"));
}

#[test]
fn missing_scripts_are_reported() {
    let (dir, scripts) = scripts_dir();
    write_script(dir.path(), SCRIPT_LIST_VMS, "true");
    let missing = scripts.missing(vmpanel::config::ALL_SCRIPTS);
    assert_eq!(missing.len(), 3);
    assert!(!missing.contains(&SCRIPT_LIST_VMS.to_string()));
}
