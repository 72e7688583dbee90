//! Unit tests for the registry API.

use jiff::Timestamp;
use tempfile::TempDir;

use super::*;
use crate::{
    flow::{FlowController, ProgressSink},
    models::{RecallStatus, Severity},
    params::{AddRecall, DeleteRecall, Id, ListRecalls},
    samples::SampleSource,
};

async fn test_registry() -> (Registry, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test_recalls.db");
    let registry = RegistryBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create registry");
    (registry, temp_dir)
}

fn add_params(id: &str) -> AddRecall {
    AddRecall {
        id: id.to_string(),
        product: "Bouncy door swing".to_string(),
        brand: Some("Bouncy".to_string()),
        severity: "high".to_string(),
        hazard: "Clamp can slip off the door frame.".to_string(),
        actions: vec![
            "Stop using the swing".to_string(),
            "Request a replacement clamp".to_string(),
        ],
        ..Default::default()
    }
}

#[tokio::test]
async fn add_and_get_recall() {
    let (registry, _tmp) = test_registry().await;

    let record = registry.add_recall(&add_params("CR-1")).await.unwrap();
    assert_eq!(record.severity, Severity::High);
    assert_eq!(record.status, RecallStatus::Open);

    let fetched = registry
        .get_recall(&Id {
            id: "CR-1".to_string(),
        })
        .await
        .unwrap()
        .expect("recall should exist");
    assert_eq!(fetched, record);
}

#[tokio::test]
async fn duplicate_id_is_rejected() {
    let (registry, _tmp) = test_registry().await;
    registry.add_recall(&add_params("CR-1")).await.unwrap();

    let err = registry.add_recall(&add_params("CR-1")).await.unwrap_err();
    match err {
        crate::RecallError::InvalidInput { field, .. } => assert_eq!(field, "id"),
        other => panic!("Expected InvalidInput, got {other}"),
    }
}

#[tokio::test]
async fn invalid_severity_is_rejected() {
    let (registry, _tmp) = test_registry().await;
    let mut params = add_params("CR-1");
    params.severity = "extreme".to_string();

    assert!(registry.add_recall(&params).await.is_err());
}

#[tokio::test]
async fn mark_resolved_records_timestamp() {
    let (registry, _tmp) = test_registry().await;
    registry.add_recall(&add_params("CR-1")).await.unwrap();

    let resolved_at: Timestamp = "2024-07-01T12:00:00Z".parse().unwrap();
    let updated = registry
        .mark_resolved(
            &Id {
                id: "CR-1".to_string(),
            },
            resolved_at,
        )
        .await
        .unwrap()
        .expect("recall should exist");

    assert_eq!(updated.status, RecallStatus::Resolved);
    assert_eq!(updated.resolved_at, Some(resolved_at));
}

#[tokio::test]
async fn mark_resolved_missing_recall_returns_none() {
    let (registry, _tmp) = test_registry().await;
    let updated = registry
        .mark_resolved(
            &Id {
                id: "CR-404".to_string(),
            },
            Timestamp::now(),
        )
        .await
        .unwrap();
    assert!(updated.is_none());
}

#[tokio::test]
async fn reopen_clears_resolution_and_progress() {
    let (registry, _tmp) = test_registry().await;
    registry.add_recall(&add_params("CR-1")).await.unwrap();
    registry
        .save_progress(&crate::params::SaveProgress {
            id: "CR-1".to_string(),
            acknowledged: vec![0, 1],
        })
        .await
        .unwrap();
    registry
        .mark_resolved(
            &Id {
                id: "CR-1".to_string(),
            },
            Timestamp::now(),
        )
        .await
        .unwrap();

    let reopened = registry
        .reopen(&Id {
            id: "CR-1".to_string(),
        })
        .await
        .unwrap()
        .expect("recall should exist");

    assert_eq!(reopened.status, RecallStatus::Open);
    assert_eq!(reopened.resolved_at, None);
    assert_eq!(
        registry
            .get_progress(&Id {
                id: "CR-1".to_string()
            })
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn list_defaults_to_open_recalls() {
    let (registry, _tmp) = test_registry().await;
    registry.add_recall(&add_params("CR-1")).await.unwrap();
    registry.add_recall(&add_params("CR-2")).await.unwrap();
    registry
        .mark_not_applicable(&Id {
            id: "CR-2".to_string(),
        })
        .await
        .unwrap();

    let open = registry
        .list_summaries(&ListRecalls::default())
        .await
        .unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, "CR-1");

    let all = registry
        .list_summaries(&ListRecalls {
            all: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn list_filters_by_min_severity() {
    let (registry, _tmp) = test_registry().await;
    registry.add_recall(&add_params("CR-1")).await.unwrap();

    let mut low = add_params("CR-2");
    low.severity = "low".to_string();
    registry.add_recall(&low).await.unwrap();

    let severe = registry
        .list_summaries(&ListRecalls {
            min_severity: Some("high".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(severe.len(), 1);
    assert_eq!(severe[0].id, "CR-1");
}

#[tokio::test]
async fn list_full_records_applies_filter() {
    let (registry, _tmp) = test_registry().await;
    registry.add_recall(&add_params("CR-1")).await.unwrap();

    let mut low = add_params("CR-2");
    low.severity = "low".to_string();
    registry.add_recall(&low).await.unwrap();

    let filter = crate::models::RecallFilter {
        severity_at_least: Some(Severity::High),
        ..Default::default()
    };
    let records = registry.list_recalls(Some(filter)).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "CR-1");
    assert_eq!(records[0].actions.len(), 2);
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let (registry, _tmp) = test_registry().await;
    registry.add_recall(&add_params("CR-1")).await.unwrap();

    let err = registry
        .delete_recall(&DeleteRecall {
            id: "CR-1".to_string(),
            confirmed: false,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, crate::RecallError::InvalidInput { .. }));

    let deleted = registry
        .delete_recall(&DeleteRecall {
            id: "CR-1".to_string(),
            confirmed: true,
        })
        .await
        .unwrap();
    assert!(deleted.is_some());

    assert!(registry
        .get_recall(&Id {
            id: "CR-1".to_string()
        })
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn seed_from_source_is_idempotent() {
    let (registry, _tmp) = test_registry().await;

    let added = registry
        .seed_from_source(&SampleSource::new(), None)
        .await
        .unwrap();
    assert!(!added.is_empty());

    let added_again = registry
        .seed_from_source(&SampleSource::new(), None)
        .await
        .unwrap();
    assert!(added_again.is_empty());
}

#[tokio::test]
async fn seed_from_source_respects_count() {
    let (registry, _tmp) = test_registry().await;
    let added = registry
        .seed_from_source(&SampleSource::new(), Some(2))
        .await
        .unwrap();
    assert_eq!(added.len(), 2);
}

#[tokio::test]
async fn progress_sink_feeds_summary_counts() {
    let (registry, _tmp) = test_registry().await;
    registry.add_recall(&add_params("CR-1")).await.unwrap();

    let record = registry
        .get_recall(&Id {
            id: "CR-1".to_string(),
        })
        .await
        .unwrap()
        .unwrap();

    // Drive a flow with the registry-backed sink attached; every applied
    // toggle snapshots progress.
    let sink = registry.progress_sink();
    let mut flow = FlowController::open(record).with_progress_sink(Box::new(sink));
    flow.confirm(true);
    flow.toggle(1);

    let summaries = registry
        .list_summaries(&ListRecalls::default())
        .await
        .unwrap();
    assert_eq!(summaries[0].acknowledged_actions, 2);
    assert_eq!(summaries[0].total_actions, 2);
}

#[tokio::test]
async fn sink_reports_missing_recall_as_error_string() {
    let (registry, _tmp) = test_registry().await;
    let sink = registry.progress_sink();
    let result = sink.save_progress("CR-404", &[0]);
    assert!(result.is_err());
}
