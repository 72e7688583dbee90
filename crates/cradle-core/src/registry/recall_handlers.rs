//! Recall handler operations that return formatted wrapper types for the
//! Registry.

use super::Registry;
use crate::{
    display::RecallSummaries,
    error::Result,
    flow::FlowEvent,
    models::{RecallFilter, RecallRecord},
    params::{DeleteRecall, Id, ListRecalls},
    samples::RecallSource,
};

impl Registry {
    /// Handle listing recalls with summary formatting.
    ///
    /// Converts recalls to summaries with acknowledgement counts for
    /// consistent list display across interfaces.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use cradle_core::{params::ListRecalls, RegistryBuilder};
    /// # async {
    /// let registry = RegistryBuilder::new().build().await?;
    /// let summaries = registry.list_summaries(&ListRecalls::default()).await?;
    /// # Result::<(), cradle_core::RecallError>::Ok(())
    /// # };
    /// ```
    pub async fn list_summaries(&self, params: &ListRecalls) -> Result<RecallSummaries> {
        let mut filter = RecallFilter::from(params);
        filter.product_contains = params.product.clone();
        filter.severity_at_least = params
            .min_severity
            .as_deref()
            .and_then(|s| s.parse().ok());

        let summaries = self.list_recall_summaries(Some(filter)).await?;
        Ok(RecallSummaries(summaries))
    }

    /// Handle showing a complete recall record.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use cradle_core::{params::Id, RegistryBuilder};
    /// # async {
    /// let registry = RegistryBuilder::new().build().await?;
    /// let recall = registry.show_recall(&Id { id: "r-1".to_string() }).await?;
    /// # Result::<(), cradle_core::RecallError>::Ok(())
    /// # };
    /// ```
    pub async fn show_recall(&self, params: &Id) -> Result<Option<RecallRecord>> {
        self.get_recall(params).await
    }

    /// Handle permanently deleting a recall with confirmation.
    ///
    /// Uses a get-before-delete pattern to return the deleted recall for
    /// confirmation output. Requires the explicit `confirmed` flag.
    ///
    /// # Errors
    ///
    /// Returns `RecallError::InvalidInput` if `confirmed` is false
    pub async fn delete_recall(&self, params: &DeleteRecall) -> Result<Option<RecallRecord>> {
        if !params.confirmed {
            return Err(crate::RecallError::invalid_input("confirmed").with_reason(
                "Recall deletion requires explicit confirmation. Set 'confirmed' to true to \
                 proceed with permanent deletion.",
            ));
        }

        let id_params = Id {
            id: params.id.clone(),
        };
        let recall = self.get_recall(&id_params).await?;

        if recall.is_some() {
            self.delete_recall_by_id(&id_params).await?;
        }

        Ok(recall)
    }

    /// Apply a flow outcome event to the recall list.
    ///
    /// `Resolved` marks the recall resolved with the event's timestamp;
    /// `NotApplicable` dismisses it. Every other event is a presentation or
    /// advisory concern and leaves the list untouched.
    ///
    /// Returns the updated record when the event changed one.
    pub async fn apply_flow_event(&self, event: &FlowEvent) -> Result<Option<RecallRecord>> {
        match event {
            FlowEvent::Resolved {
                recall_id,
                resolved_at,
            } => {
                self.mark_resolved(
                    &Id {
                        id: recall_id.clone(),
                    },
                    *resolved_at,
                )
                .await
            }
            FlowEvent::NotApplicable { recall_id } => {
                self.mark_not_applicable(&Id {
                    id: recall_id.clone(),
                })
                .await
            }
            _ => Ok(None),
        }
    }

    /// Seed the registry from a recall source, skipping records that already
    /// exist.
    ///
    /// Returns the records that were actually added.
    pub async fn seed_from_source(
        &self,
        source: &dyn RecallSource,
        count: Option<usize>,
    ) -> Result<Vec<RecallRecord>> {
        let mut records = source.fetch()?;
        if let Some(count) = count {
            records.truncate(count);
        }

        let mut added = Vec::new();
        for record in records {
            let existing = self
                .get_recall(&Id {
                    id: record.id.clone(),
                })
                .await?;
            if existing.is_some() {
                continue;
            }
            added.push(self.insert_record(record).await?);
        }

        Ok(added)
    }
}
