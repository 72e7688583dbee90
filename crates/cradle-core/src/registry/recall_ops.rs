//! Recall operations for the Registry.

use jiff::Timestamp;
use tokio::task;

use super::Registry;
use crate::{
    error::{RecallError, Result},
    models::{ContactInfo, RecallFilter, RecallRecord, RecallStatus, RecallSummary},
    params::{AddRecall, Id},
    store::Database,
};

impl Registry {
    /// Records a new recall after validating the parameters.
    ///
    /// The severity string is parsed, blank action entries are dropped, and
    /// the contact block is normalized away when empty.
    pub async fn add_recall(&self, params: &AddRecall) -> Result<RecallRecord> {
        let severity = params.validate()?;

        let record = RecallRecord {
            id: params.id.clone(),
            product: params.product.clone(),
            brand: params.brand.clone(),
            model_number: params.model_number.clone(),
            manufacturer: params.manufacturer.clone(),
            severity,
            hazard: params.hazard.clone(),
            actions: params
                .actions
                .iter()
                .filter(|a| !a.trim().is_empty())
                .cloned()
                .collect(),
            contact: ContactInfo::normalize(Some(ContactInfo {
                phone: params.contact_phone.clone(),
                email: params.contact_email.clone(),
                website: params.contact_website.clone(),
            })),
            media: params.media.clone(),
            status: RecallStatus::Open,
            published_at: Timestamp::now(),
            resolved_at: None,
        };

        self.insert_record(record).await
    }

    /// Inserts an already-constructed record (used by the simulation source).
    pub async fn insert_record(&self, record: RecallRecord) -> Result<RecallRecord> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.insert_recall(&record)?;
            Ok(record)
        })
        .await
        .map_err(|e| RecallError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a recall by its ID.
    pub async fn get_recall(&self, params: &Id) -> Result<Option<RecallRecord>> {
        let db_path = self.db_path.clone();
        let id = params.id.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_recall(&id)
        })
        .await
        .map_err(|e| RecallError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists full recall records with optional filtering.
    pub async fn list_recalls(&self, filter: Option<RecallFilter>) -> Result<Vec<RecallRecord>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_recalls(filter.as_ref())
        })
        .await
        .map_err(|e| RecallError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists recall summaries with optional filtering.
    pub async fn list_recall_summaries(
        &self,
        filter: Option<RecallFilter>,
    ) -> Result<Vec<RecallSummary>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_summaries(filter.as_ref())
        })
        .await
        .map_err(|e| RecallError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Marks a recall resolved with the completion timestamp reported by the
    /// flow's `Resolved` event.
    pub async fn mark_resolved(
        &self,
        params: &Id,
        resolved_at: Timestamp,
    ) -> Result<Option<RecallRecord>> {
        self.set_status(params, RecallStatus::Resolved, Some(resolved_at))
            .await
    }

    /// Marks a recall not applicable (the user does not own the product).
    pub async fn mark_not_applicable(&self, params: &Id) -> Result<Option<RecallRecord>> {
        self.set_status(params, RecallStatus::NotApplicable, Some(Timestamp::now()))
            .await
    }

    /// Returns a resolved or dismissed recall to the open list.
    pub async fn reopen(&self, params: &Id) -> Result<Option<RecallRecord>> {
        self.set_status(params, RecallStatus::Open, None).await
    }

    /// Permanently deletes a recall and its progress snapshot.
    pub async fn delete_recall_by_id(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let id = params.id.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_recall(&id)
        })
        .await
        .map_err(|e| RecallError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Saves a checklist-progress snapshot for a recall.
    pub async fn save_progress(&self, params: &crate::params::SaveProgress) -> Result<()> {
        let db_path = self.db_path.clone();
        let id = params.id.clone();
        let acknowledged = params.acknowledged.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.save_progress(&id, &acknowledged)
        })
        .await
        .map_err(|e| RecallError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves the saved checklist-progress snapshot for a recall.
    pub async fn get_progress(&self, params: &Id) -> Result<Option<Vec<usize>>> {
        let db_path = self.db_path.clone();
        let id = params.id.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_progress(&id)
        })
        .await
        .map_err(|e| RecallError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    async fn set_status(
        &self,
        params: &Id,
        status: RecallStatus,
        resolved_at: Option<Timestamp>,
    ) -> Result<Option<RecallRecord>> {
        let db_path = self.db_path.clone();
        let id = params.id.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.set_status(&id, status, resolved_at)
        })
        .await
        .map_err(|e| RecallError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
