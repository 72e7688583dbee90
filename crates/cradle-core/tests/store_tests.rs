mod common;

use common::create_test_environment;
use cradle_core::{
    models::{RecallFilter, RecallRecord, RecallStatus, Severity},
    Database,
};
use jiff::Timestamp;

fn record(id: &str, severity: Severity) -> RecallRecord {
    RecallRecord {
        id: id.to_string(),
        product: format!("Product {id}"),
        brand: Some("BrandCo".to_string()),
        model_number: Some("M-1".to_string()),
        manufacturer: Some("BrandCo Manufacturing".to_string()),
        severity,
        hazard: "Hazard description.".to_string(),
        actions: vec![
            "Stop using the product".to_string(),
            "Contact BrandCo, option \"recalls\"".to_string(),
        ],
        contact: None,
        media: vec!["https://brandco.example/guide.png".to_string()],
        status: RecallStatus::Open,
        published_at: Timestamp::from_second(1700000000).unwrap(),
        resolved_at: None,
    }
}

#[test]
fn insert_and_get_round_trip() {
    let (_tmp, db_path) = create_test_environment();
    let mut db = Database::new(&db_path).expect("Failed to open database");

    let original = record("CR-1", Severity::High);
    db.insert_recall(&original).expect("Failed to insert");

    let fetched = db
        .get_recall("CR-1")
        .expect("Failed to query")
        .expect("Recall should exist");

    // JSON-encoded lists and the contact block survive storage untouched
    assert_eq!(fetched, original);
}

#[test]
fn get_missing_recall_returns_none() {
    let (_tmp, db_path) = create_test_environment();
    let db = Database::new(&db_path).expect("Failed to open database");
    assert!(db.get_recall("CR-404").unwrap().is_none());
}

#[test]
fn schema_is_reinitialized_idempotently() {
    let (_tmp, db_path) = create_test_environment();
    {
        let mut db = Database::new(&db_path).unwrap();
        db.insert_recall(&record("CR-1", Severity::Low)).unwrap();
    }
    // Opening the same file again re-runs the schema batch and migrations
    let db = Database::new(&db_path).unwrap();
    assert!(db.get_recall("CR-1").unwrap().is_some());
}

#[test]
fn list_recalls_filters_by_status() {
    let (_tmp, db_path) = create_test_environment();
    let mut db = Database::new(&db_path).unwrap();

    db.insert_recall(&record("CR-1", Severity::High)).unwrap();
    db.insert_recall(&record("CR-2", Severity::Low)).unwrap();
    db.set_status("CR-2", RecallStatus::Resolved, Some(Timestamp::now()))
        .unwrap();

    let open = db
        .list_recalls(Some(&RecallFilter::for_status(RecallStatus::Open)))
        .unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, "CR-1");

    let resolved = db
        .list_recalls(Some(&RecallFilter::for_status(RecallStatus::Resolved)))
        .unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].id, "CR-2");
}

#[test]
fn list_recalls_applies_severity_floor() {
    let (_tmp, db_path) = create_test_environment();
    let mut db = Database::new(&db_path).unwrap();

    db.insert_recall(&record("CR-1", Severity::Critical)).unwrap();
    db.insert_recall(&record("CR-2", Severity::Medium)).unwrap();
    db.insert_recall(&record("CR-3", Severity::Low)).unwrap();

    let filter = RecallFilter {
        severity_at_least: Some(Severity::Medium),
        ..Default::default()
    };
    let severe = db.list_recalls(Some(&filter)).unwrap();
    let ids: Vec<_> = severe.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&"CR-1"));
    assert!(ids.contains(&"CR-2"));
}

#[test]
fn list_recalls_filters_by_product_text() {
    let (_tmp, db_path) = create_test_environment();
    let mut db = Database::new(&db_path).unwrap();

    let mut swing = record("CR-1", Severity::High);
    swing.product = "Garden swing".to_string();
    db.insert_recall(&swing).unwrap();
    db.insert_recall(&record("CR-2", Severity::High)).unwrap();

    let filter = RecallFilter {
        product_contains: Some("swing".to_string()),
        ..Default::default()
    };
    let found = db.list_recalls(Some(&filter)).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "CR-1");
}

#[test]
fn set_status_round_trips_resolution() {
    let (_tmp, db_path) = create_test_environment();
    let mut db = Database::new(&db_path).unwrap();
    db.insert_recall(&record("CR-1", Severity::High)).unwrap();

    let resolved_at: Timestamp = "2024-08-01T10:00:00Z".parse().unwrap();
    let updated = db
        .set_status("CR-1", RecallStatus::Resolved, Some(resolved_at))
        .unwrap()
        .expect("Recall should exist");
    assert_eq!(updated.status, RecallStatus::Resolved);
    assert_eq!(updated.resolved_at, Some(resolved_at));

    let reopened = db
        .set_status("CR-1", RecallStatus::Open, None)
        .unwrap()
        .unwrap();
    assert_eq!(reopened.status, RecallStatus::Open);
    assert_eq!(reopened.resolved_at, None);
}

#[test]
fn set_status_missing_recall_returns_none() {
    let (_tmp, db_path) = create_test_environment();
    let mut db = Database::new(&db_path).unwrap();
    assert!(db
        .set_status("CR-404", RecallStatus::Resolved, None)
        .unwrap()
        .is_none());
}

#[test]
fn delete_recall_removes_record_and_progress() {
    let (_tmp, db_path) = create_test_environment();
    let mut db = Database::new(&db_path).unwrap();
    db.insert_recall(&record("CR-1", Severity::High)).unwrap();
    db.save_progress("CR-1", &[0, 1]).unwrap();

    db.delete_recall("CR-1").unwrap();
    assert!(db.get_recall("CR-1").unwrap().is_none());
    assert!(db.get_progress("CR-1").unwrap().is_none());
}

#[test]
fn delete_missing_recall_is_an_error() {
    let (_tmp, db_path) = create_test_environment();
    let mut db = Database::new(&db_path).unwrap();
    assert!(db.delete_recall("CR-404").is_err());
}

#[test]
fn progress_upsert_overwrites_previous_snapshot() {
    let (_tmp, db_path) = create_test_environment();
    let mut db = Database::new(&db_path).unwrap();
    db.insert_recall(&record("CR-1", Severity::High)).unwrap();

    db.save_progress("CR-1", &[0]).unwrap();
    assert_eq!(db.get_progress("CR-1").unwrap(), Some(vec![0]));

    db.save_progress("CR-1", &[0, 1]).unwrap();
    assert_eq!(db.get_progress("CR-1").unwrap(), Some(vec![0, 1]));
}

#[test]
fn progress_for_unknown_recall_is_rejected() {
    let (_tmp, db_path) = create_test_environment();
    let mut db = Database::new(&db_path).unwrap();
    assert!(db.save_progress("CR-404", &[0]).is_err());
}

#[test]
fn summaries_report_progress_counts() {
    let (_tmp, db_path) = create_test_environment();
    let mut db = Database::new(&db_path).unwrap();
    db.insert_recall(&record("CR-1", Severity::High)).unwrap();
    db.insert_recall(&record("CR-2", Severity::Low)).unwrap();
    db.save_progress("CR-1", &[0]).unwrap();

    let summaries = db.list_summaries(None).unwrap();
    assert_eq!(summaries.len(), 2);

    let first = summaries.iter().find(|s| s.id == "CR-1").unwrap();
    assert_eq!(first.total_actions, 2);
    assert_eq!(first.acknowledged_actions, 1);

    let second = summaries.iter().find(|s| s.id == "CR-2").unwrap();
    assert_eq!(second.acknowledged_actions, 0);
}

#[test]
fn summary_views_respect_status_scope() {
    let (_tmp, db_path) = create_test_environment();
    let mut db = Database::new(&db_path).unwrap();
    db.insert_recall(&record("CR-1", Severity::High)).unwrap();
    db.insert_recall(&record("CR-2", Severity::High)).unwrap();
    db.set_status("CR-2", RecallStatus::NotApplicable, Some(Timestamp::now()))
        .unwrap();

    let open_only = db.list_summaries(None).unwrap();
    assert_eq!(open_only.len(), 1);

    let filter = RecallFilter {
        include_closed: true,
        ..Default::default()
    };
    let everything = db.list_summaries(Some(&filter)).unwrap();
    assert_eq!(everything.len(), 2);
}
