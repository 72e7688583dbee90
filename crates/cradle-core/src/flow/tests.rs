//! Unit tests for the flow controller state machine.

use jiff::Timestamp;

use super::*;
use crate::models::{RecallRecord, Severity};

fn test_recall(id: &str) -> RecallRecord {
    RecallRecord {
        id: id.to_string(),
        product: "Slumber infant swing".to_string(),
        brand: Some("Slumber".to_string()),
        model_number: Some("SW-310".to_string()),
        manufacturer: Some("Slumber Goods LLC".to_string()),
        severity: Severity::High,
        hazard: "Restraint straps can loosen during use.".to_string(),
        actions: vec![
            "Stop using the swing".to_string(),
            "Check the model number on the base".to_string(),
            "Request the free repair kit".to_string(),
        ],
        contact: None,
        media: Vec::new(),
        status: Default::default(),
        published_at: Timestamp::UNIX_EPOCH,
        resolved_at: None,
    }
}

fn flow_at_checklist(id: &str) -> FlowController {
    let mut flow = FlowController::open(test_recall(id));
    assert!(flow.confirm(true).is_applied());
    flow
}

#[test]
fn open_starts_at_ownership() {
    let flow = FlowController::open(test_recall("r-1"));
    assert_eq!(flow.current_step(), FlowStep::Ownership);
    assert_eq!(flow.direction(), Direction::Forward);
    assert!(!flow.is_closed());
}

#[test]
fn confirm_owned_advances_to_checklist() {
    let mut flow = FlowController::open(test_recall("r-1"));
    let outcome = flow.confirm(true);

    assert!(outcome.is_applied());
    assert_eq!(flow.current_step(), FlowStep::Checklist);
    assert_eq!(
        outcome.events()[0],
        FlowEvent::Transitioned(TransitionEvent {
            from: FlowStep::Ownership,
            to: FlowStep::Checklist,
            direction: Direction::Forward,
        })
    );
}

#[test]
fn confirm_not_owned_closes_with_not_applicable() {
    let mut flow = FlowController::open(test_recall("r-2"));
    let outcome = flow.confirm(false);

    assert!(outcome.is_applied());
    assert!(flow.is_closed());

    let outcome_events: Vec<_> = outcome
        .events()
        .iter()
        .filter(|e| e.event_type() == "not_applicable")
        .collect();
    assert_eq!(outcome_events.len(), 1);
    assert!(!outcome.events().iter().any(|e| e.event_type() == "resolved"));
}

#[test]
fn checklist_entry_has_locked_first_item() {
    let flow = flow_at_checklist("r-3");
    let items = flow.checklist().items();
    assert_eq!(items.len(), 3);
    assert!(items[0].locked);
    assert!(items[0].acknowledged);
    assert!(!items[1].acknowledged);
    assert!(!items[2].acknowledged);
}

#[test]
fn toggle_locked_item_rejected_without_state_change() {
    let mut flow = flow_at_checklist("r-4");
    let before: Vec<_> = flow.checklist().items().to_vec();

    let outcome = flow.toggle(0);
    assert_eq!(outcome.rejection(), Some(RejectReason::ItemLocked));
    assert_eq!(flow.checklist().items(), before.as_slice());
}

#[test]
fn toggle_out_of_range_rejected() {
    let mut flow = flow_at_checklist("r-5");
    let outcome = flow.toggle(99);
    assert_eq!(outcome.rejection(), Some(RejectReason::ItemOutOfRange));
}

#[test]
fn proceed_rejected_until_checklist_complete() {
    let mut flow = flow_at_checklist("r-6");

    // One of three acknowledged (the locked item)
    assert_eq!(
        flow.proceed().rejection(),
        Some(RejectReason::ChecklistIncomplete)
    );
    assert_eq!(flow.current_step(), FlowStep::Checklist);

    // N-1 of N acknowledged still gates
    flow.toggle(1);
    assert_eq!(
        flow.proceed().rejection(),
        Some(RejectReason::ChecklistIncomplete)
    );
    assert_eq!(flow.current_step(), FlowStep::Checklist);

    flow.toggle(2);
    assert!(flow.proceed().is_applied());
    assert_eq!(flow.current_step(), FlowStep::Summary);
}

#[test]
fn no_direct_path_from_ownership_to_summary() {
    let mut flow = FlowController::open(test_recall("r-7"));

    // Neither of the step-2/3 commands moves a session sitting on step 1.
    assert_eq!(flow.proceed().rejection(), Some(RejectReason::WrongStep));
    assert_eq!(flow.finish().rejection(), Some(RejectReason::WrongStep));
    assert_eq!(flow.toggle(1).rejection(), Some(RejectReason::WrongStep));
    assert_eq!(flow.current_step(), FlowStep::Ownership);
}

#[test]
fn back_from_checklist_returns_to_ownership() {
    let mut flow = flow_at_checklist("r-8");
    let outcome = flow.back();

    assert!(outcome.is_applied());
    assert_eq!(flow.current_step(), FlowStep::Ownership);
    assert_eq!(flow.direction(), Direction::Backward);
}

#[test]
fn checklist_resets_on_reentry() {
    let mut flow = flow_at_checklist("r-9");
    flow.toggle(1);
    assert_eq!(flow.checklist().acknowledged_count(), 2);

    flow.back();
    flow.confirm(true);

    // Fresh state: only the locked item is acknowledged again.
    assert_eq!(flow.checklist().acknowledged_count(), 1);
    assert!(flow.checklist().items()[0].acknowledged);
    assert!(!flow.checklist().items()[1].acknowledged);
}

#[test]
fn checklist_resets_when_backing_out_of_summary() {
    let mut flow = flow_at_checklist("r-10");
    flow.toggle(1);
    flow.toggle(2);
    flow.proceed();
    assert_eq!(flow.current_step(), FlowStep::Summary);

    flow.back();
    assert_eq!(flow.current_step(), FlowStep::Checklist);
    assert_eq!(flow.direction(), Direction::Backward);
    assert_eq!(flow.checklist().acknowledged_count(), 1);
}

#[test]
fn finish_emits_resolved_and_closes() {
    let mut flow = flow_at_checklist("r-11");
    flow.toggle(1);
    flow.toggle(2);
    flow.proceed();

    let outcome = flow.finish();
    assert!(outcome.is_applied());
    assert!(flow.is_closed());

    let resolved: Vec<_> = outcome
        .events()
        .iter()
        .filter_map(|e| match e {
            FlowEvent::Resolved { recall_id, .. } => Some(recall_id.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(resolved, vec!["r-11".to_string()]);
}

#[test]
fn commands_after_close_are_rejected() {
    let mut flow = FlowController::open(test_recall("r-12"));
    flow.confirm(false);

    assert_eq!(
        flow.confirm(true).rejection(),
        Some(RejectReason::SessionClosed)
    );
    assert_eq!(flow.close().rejection(), Some(RejectReason::SessionClosed));
    assert!(flow.is_closed());
}

#[test]
fn external_close_emits_no_outcome_event() {
    let mut flow = flow_at_checklist("r-13");
    let outcome = flow.close();

    assert!(outcome.is_applied());
    assert!(flow.is_closed());
    assert!(outcome
        .events()
        .iter()
        .all(|e| e.event_type() == "transitioned"));
}

#[test]
fn visual_guide_is_advisory_and_keeps_step() {
    let mut flow = FlowController::open(test_recall("r-14"));
    let outcome = flow.request_visual_guide();

    assert!(outcome.is_applied());
    assert_eq!(flow.current_step(), FlowStep::Ownership);
    assert_eq!(
        outcome.events(),
        &[FlowEvent::VisualGuideRequested {
            recall_id: "r-14".to_string()
        }]
    );
}

#[test]
fn share_outside_summary_is_rejected() {
    let mut flow = flow_at_checklist("r-15");
    assert_eq!(flow.share().rejection(), Some(RejectReason::WrongStep));
}

#[test]
fn share_without_target_notices_and_keeps_state() {
    let mut flow = flow_at_checklist("r-16");
    flow.toggle(1);
    flow.toggle(2);
    flow.proceed();

    let outcome = flow.share();
    assert!(outcome.is_applied());
    assert_eq!(flow.current_step(), FlowStep::Summary);
    assert_eq!(outcome.events().len(), 1);
    assert_eq!(outcome.events()[0].event_type(), "notice");
}

struct FailingShare;

impl ShareTarget for FailingShare {
    fn share(&self, _text: &str) -> Result<(), String> {
        Err("share sheet dismissed".to_string())
    }
}

#[test]
fn share_failure_is_a_notice_not_an_error() {
    let mut flow = FlowController::open(test_recall("r-17"))
        .with_share_target(Box::new(FailingShare));
    flow.confirm(true);
    flow.toggle(1);
    flow.toggle(2);
    flow.proceed();

    let outcome = flow.share();
    assert!(outcome.is_applied());
    assert_eq!(flow.current_step(), FlowStep::Summary);
    match &outcome.events()[0] {
        FlowEvent::Notice { message } => assert!(message.contains("share sheet dismissed")),
        other => panic!("Expected notice, got {other:?}"),
    }
}

struct FailingSink;

impl ProgressSink for FailingSink {
    fn save_progress(&self, _recall_id: &str, _acknowledged: &[usize]) -> Result<(), String> {
        Err("disk full".to_string())
    }
}

#[test]
fn progress_save_failure_is_a_notice_and_toggle_still_applies() {
    let mut flow =
        FlowController::open(test_recall("r-18")).with_progress_sink(Box::new(FailingSink));
    flow.confirm(true);

    let outcome = flow.toggle(1);
    assert!(outcome.is_applied());
    assert!(flow.checklist().items()[1].acknowledged);
    assert_eq!(outcome.events()[0].event_type(), "notice");
}

#[test]
fn malformed_record_degrades_to_placeholder() {
    let mut broken = test_recall("r-19");
    broken.actions.clear();

    let flow = FlowController::open(broken);
    assert_eq!(flow.recall().id, "r-19");
    assert!(flow.recall().is_usable());
    assert!(flow
        .recall()
        .product
        .contains("details unavailable"));
}

#[test]
fn zero_locked_prefix_makes_every_item_togglable() {
    let mut flow = FlowController::open(test_recall("r-22")).with_locked_prefix(0);
    flow.confirm(true);

    assert!(!flow.checklist().items()[0].acknowledged);
    assert!(flow.toggle(0).is_applied());
    assert!(flow.checklist().items()[0].acknowledged);
}

#[test]
fn summary_mirrors_canonical_action_set() {
    let mut flow = flow_at_checklist("r-20");
    flow.toggle(1);
    flow.toggle(2);
    flow.proceed();

    assert_eq!(flow.summary_items(), test_recall("r-20").actions.as_slice());
    let text = flow.share_text();
    assert!(text.contains("Slumber infant swing"));
    assert!(text.contains("Request the free repair kit"));
}

#[test]
fn observer_receives_outcome_callbacks_exactly_once() {
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Counts {
        resolved: usize,
        not_applicable: usize,
    }

    struct CountingObserver(Arc<Mutex<Counts>>);

    impl FlowObserver for CountingObserver {
        fn on_resolved(&mut self, _recall_id: &str, _resolved_at: Timestamp) {
            self.0.lock().unwrap().resolved += 1;
        }
        fn on_not_applicable(&mut self, _recall_id: &str) {
            self.0.lock().unwrap().not_applicable += 1;
        }
    }

    let counts = Arc::new(Mutex::new(Counts::default()));
    let mut flow = FlowController::open(test_recall("r-21"))
        .with_observer(Box::new(CountingObserver(counts.clone())));

    flow.confirm(true);
    flow.toggle(1);
    flow.toggle(2);
    flow.proceed();
    flow.finish();

    assert_eq!(counts.lock().unwrap().resolved, 1);
    assert_eq!(counts.lock().unwrap().not_applicable, 0);
}
