//! Integration tests comparing CLI output and direct Display implementations
//!
//! This test suite verifies that the CLI renders through the same Display
//! types the core exposes, and that scripted resolutions performed through
//! the binary are visible to a registry opened on the same database.

use std::process::Command;

use cradle_core::{
    params::{Id, ListRecalls},
    RecallStatus, Registry, RegistryBuilder, SampleSource,
};
use tempfile::TempDir;

/// Helper function to create a test registry with temporary database
async fn create_test_registry() -> (Registry, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    let registry = RegistryBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create registry");

    (registry, temp_dir)
}

/// Run a CLI command and capture its output
fn run_cli_command(db_path: &str, args: &[&str]) -> String {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cradle"));
    cmd.arg("--no-color").arg("--database-file").arg(db_path);

    for arg in args {
        cmd.arg(arg);
    }

    let output = cmd.output().expect("Failed to run CLI command");
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

/// Test that the recall list rendered by the CLI matches the display wrapper
/// output for the same data
#[tokio::test]
async fn test_list_display_consistency() {
    let (registry, temp_dir) = create_test_registry().await;
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    registry
        .seed_from_source(&SampleSource::new(), None)
        .await
        .expect("Failed to seed samples");

    let cli_output = run_cli_command(db_str, &["recall", "list"]);

    let direct = registry
        .list_summaries(&ListRecalls::default())
        .await
        .expect("Failed to list recalls")
        .to_string();

    // The CLI adds a title header and then renders the same wrapper
    assert!(cli_output.contains("# Open Recalls"));
    for line in direct.lines().filter(|l| l.starts_with("## ")) {
        assert!(
            cli_output.contains(line),
            "CLI output missing summary line: {line}"
        );
    }
}

/// Test that a recall shown by the CLI matches the record's own Display
#[tokio::test]
async fn test_show_display_consistency() {
    let (registry, temp_dir) = create_test_registry().await;
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    let added = registry
        .seed_from_source(&SampleSource::new(), Some(1))
        .await
        .expect("Failed to seed samples");
    let id = added[0].id.clone();

    let cli_output = run_cli_command(db_str, &["recall", "show", &id]);

    let record = registry
        .get_recall(&Id { id: id.clone() })
        .await
        .unwrap()
        .expect("Recall should exist");

    for line in record.to_string().lines().filter(|l| !l.is_empty()) {
        assert!(
            cli_output.contains(line),
            "CLI output missing record line: {line}"
        );
    }
}

/// Test that a scripted resolution through the binary is visible to a
/// registry opened on the same database
#[tokio::test]
async fn test_scripted_resolution_updates_database() {
    let (registry, temp_dir) = create_test_registry().await;
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    let added = registry
        .seed_from_source(&SampleSource::new(), Some(2))
        .await
        .expect("Failed to seed samples");

    let resolved_id = added[0].id.clone();
    let dismissed_id = added[1].id.clone();

    run_cli_command(db_str, &["resolve", &resolved_id, "--acknowledge-all"]);
    run_cli_command(db_str, &["resolve", &dismissed_id, "--not-owned"]);

    let resolved = registry
        .get_recall(&Id {
            id: resolved_id.clone(),
        })
        .await
        .unwrap()
        .expect("Recall should exist");
    assert_eq!(resolved.status, RecallStatus::Resolved);
    assert!(resolved.resolved_at.is_some());

    let dismissed = registry
        .get_recall(&Id {
            id: dismissed_id.clone(),
        })
        .await
        .unwrap()
        .expect("Recall should exist");
    assert_eq!(dismissed.status, RecallStatus::NotApplicable);
}

/// Test that the scripted happy path leaves a full progress snapshot behind
#[tokio::test]
async fn test_scripted_resolution_saves_progress() {
    let (registry, temp_dir) = create_test_registry().await;
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    let added = registry
        .seed_from_source(&SampleSource::new(), Some(1))
        .await
        .expect("Failed to seed samples");
    let id = added[0].id.clone();
    let action_count = added[0].actions.len();

    run_cli_command(db_str, &["resolve", &id, "--acknowledge-all"]);

    let progress = registry
        .get_progress(&Id { id: id.clone() })
        .await
        .unwrap()
        .expect("Progress snapshot should exist");
    assert_eq!(progress.len(), action_count);
}
