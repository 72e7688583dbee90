//! Sample recall data source.
//!
//! The assistant runs entirely on locally generated data. Rather than
//! module-level mock arrays, recall data comes through the [`RecallSource`]
//! trait so the parent screen receives an explicit, injectable provider; the
//! built-in [`SampleSource`] is the catalog behind the `simulate` command.

use jiff::Timestamp;

use crate::error::Result;
use crate::models::{ContactInfo, RecallRecord, RecallStatus, Severity};

/// A provider of recall records.
///
/// Implementations may generate, load, or fetch records; the registry only
/// sees the resulting list.
pub trait RecallSource: Send + Sync {
    /// Produce the recall records this source offers.
    fn fetch(&self) -> Result<Vec<RecallRecord>>;
}

/// The built-in sample catalog of child-product recalls.
#[derive(Debug, Default)]
pub struct SampleSource;

impl SampleSource {
    /// Create the sample source.
    pub fn new() -> Self {
        Self
    }
}

impl RecallSource for SampleSource {
    fn fetch(&self) -> Result<Vec<RecallRecord>> {
        Ok(sample_recalls())
    }
}

/// The canned sample records.
///
/// IDs are stable so repeated seeding is idempotent.
pub fn sample_recalls() -> Vec<RecallRecord> {
    vec![
        RecallRecord {
            id: "CR-2024-0117".to_string(),
            product: "Dreamcloud convertible crib".to_string(),
            brand: Some("Dreamcloud".to_string()),
            model_number: Some("DC-340".to_string()),
            manufacturer: Some("Dreamcloud Nursery Co.".to_string()),
            severity: Severity::Critical,
            hazard: "The drop-side rail can detach, creating a gap where an infant can become \
                     entrapped."
                .to_string(),
            actions: vec![
                "Stop using the crib immediately".to_string(),
                "Check the model number on the headboard label".to_string(),
                "Request the free immobilizer kit from the manufacturer".to_string(),
                "Install the kit before returning the crib to use".to_string(),
            ],
            contact: Some(ContactInfo {
                phone: Some("1-800-555-0142".to_string()),
                email: Some("recall@dreamcloud.example".to_string()),
                website: Some("https://dreamcloud.example/recall".to_string()),
            }),
            media: vec!["https://dreamcloud.example/recall/label-guide.png".to_string()],
            status: RecallStatus::Open,
            published_at: ts("2024-01-17T09:00:00Z"),
            resolved_at: None,
        },
        RecallRecord {
            id: "CR-2024-0312".to_string(),
            product: "TinyTrek jogging stroller".to_string(),
            brand: Some("TinyTrek".to_string()),
            model_number: Some("TT-90X".to_string()),
            manufacturer: Some("TinyTrek Outdoors".to_string()),
            severity: Severity::High,
            hazard: "The front wheel bearing can seize while jogging, causing the stroller to \
                     tip forward."
                .to_string(),
            actions: vec![
                "Stop using the stroller".to_string(),
                "Verify the model number under the seat".to_string(),
                "Contact TinyTrek for a free replacement wheel assembly".to_string(),
            ],
            contact: Some(ContactInfo {
                phone: Some("1-888-555-0171".to_string()),
                email: None,
                website: Some("https://tinytrek.example/safety".to_string()),
            }),
            media: Vec::new(),
            status: RecallStatus::Open,
            published_at: ts("2024-03-12T15:30:00Z"),
            resolved_at: None,
        },
        RecallRecord {
            id: "CR-2024-0428".to_string(),
            product: "Glow & Go night light projector".to_string(),
            brand: Some("Luma Kids".to_string()),
            model_number: Some("LK-NL12".to_string()),
            manufacturer: Some("Luma Kids Ltd.".to_string()),
            severity: Severity::Medium,
            hazard: "The power adapter can overheat during extended use, posing a burn hazard."
                .to_string(),
            actions: vec![
                "Unplug the night light and stop using it".to_string(),
                "Request a replacement adapter".to_string(),
            ],
            contact: Some(ContactInfo {
                phone: None,
                email: Some("support@lumakids.example".to_string()),
                website: None,
            }),
            media: Vec::new(),
            status: RecallStatus::Open,
            published_at: ts("2024-04-28T11:00:00Z"),
            resolved_at: None,
        },
        RecallRecord {
            id: "CR-2024-0533".to_string(),
            product: "Splashy bath seat".to_string(),
            brand: Some("Splashy".to_string()),
            model_number: None,
            manufacturer: Some("Splashy Baby Products".to_string()),
            severity: Severity::Critical,
            hazard: "The suction cups can release unexpectedly, tipping the seat and posing a \
                     drowning hazard."
                .to_string(),
            actions: vec![
                "Stop using the bath seat".to_string(),
                "Dispose of the seat according to local guidance".to_string(),
                "Contact Splashy for a full refund".to_string(),
            ],
            contact: None,
            media: Vec::new(),
            status: RecallStatus::Open,
            published_at: ts("2024-06-02T00:00:00Z"),
            resolved_at: None,
        },
        RecallRecord {
            id: "CR-2024-0619".to_string(),
            product: "Cozy Bear weighted sleep sack".to_string(),
            brand: Some("Cozy Bear".to_string()),
            model_number: Some("CB-WS-02".to_string()),
            manufacturer: Some("Cozy Bear Textiles".to_string()),
            severity: Severity::Low,
            hazard: "The zipper pull can detach, posing a small-part choking hazard for older \
                     infants."
                .to_string(),
            actions: vec![
                "Stop using the sleep sack".to_string(),
                "Check the zipper pull for looseness".to_string(),
                "Request a free repaired replacement".to_string(),
            ],
            contact: Some(ContactInfo {
                phone: Some("1-877-555-0190".to_string()),
                email: None,
                website: None,
            }),
            media: Vec::new(),
            status: RecallStatus::Open,
            published_at: ts("2024-06-19T08:45:00Z"),
            resolved_at: None,
        },
    ]
}

fn ts(s: &str) -> Timestamp {
    s.parse().unwrap_or(Timestamp::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_usable_and_unique() {
        let samples = sample_recalls();
        assert!(!samples.is_empty());

        let mut ids: Vec<_> = samples.iter().map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), samples.len());

        for record in &samples {
            assert!(record.is_usable(), "sample {} must be usable", record.id);
            assert!(record.status.is_open());
        }
    }

    #[test]
    fn source_fetch_matches_catalog() {
        let source = SampleSource::new();
        assert_eq!(source.fetch().unwrap().len(), sample_recalls().len());
    }
}
