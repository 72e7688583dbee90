//! Recall CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, RecallError, Result},
    models::{ContactInfo, RecallFilter, RecallRecord, RecallStatus, RecallSummary, Severity},
};

// SQL queries as const strings
const INSERT_RECALL_SQL: &str = "INSERT INTO recalls (id, product, brand, model_number, manufacturer, severity, hazard, actions, contact_phone, contact_email, contact_website, media, status, published_at, resolved_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)";
const RECALL_COLUMNS: &str = "id, product, brand, model_number, manufacturer, severity, hazard, actions, contact_phone, contact_email, contact_website, media, status, published_at, resolved_at";
const CHECK_RECALL_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM recalls WHERE id = ?1)";
const UPDATE_RECALL_STATUS_SQL: &str =
    "UPDATE recalls SET status = ?1, resolved_at = ?2 WHERE id = ?3";
const DELETE_RECALL_PROGRESS_SQL: &str = "DELETE FROM checklist_progress WHERE recall_id = ?1";
const DELETE_RECALL_SQL: &str = "DELETE FROM recalls WHERE id = ?1";
const UPSERT_PROGRESS_SQL: &str = "INSERT INTO checklist_progress (recall_id, acknowledged, updated_at) VALUES (?1, ?2, ?3) ON CONFLICT(recall_id) DO UPDATE SET acknowledged = ?2, updated_at = ?3";
const SELECT_PROGRESS_SQL: &str =
    "SELECT acknowledged FROM checklist_progress WHERE recall_id = ?1";

// Base queries for recall listing
const SUMMARY_COLUMNS: &str =
    "id, product, brand, severity, status, published_at, total_actions, acknowledged_actions";
const RECALL_SUMMARIES_VIEW: &str = "recall_summaries";
const ALL_RECALL_SUMMARIES_VIEW: &str = "all_recall_summaries";

impl super::Database {
    /// Helper function to construct a RecallRecord from a database row.
    fn build_recall_from_row(row: &rusqlite::Row) -> rusqlite::Result<RecallRecord> {
        let severity_str: String = row.get(5)?;
        let severity = severity_str.parse::<Severity>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                Type::Text,
                format!("Invalid severity: {severity_str}").into(),
            )
        })?;

        let status_str: String = row.get(12)?;
        let status = status_str.parse::<RecallStatus>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                12,
                Type::Text,
                format!("Invalid recall status: {status_str}").into(),
            )
        })?;

        let actions = Self::decode_string_list(row.get(7)?).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(7, Type::Text, e.to_string().into())
        })?;
        let media = Self::decode_string_list(row.get(11)?).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(11, Type::Text, e.to_string().into())
        })?;

        let contact = ContactInfo::normalize(Some(ContactInfo {
            phone: row.get(8)?,
            email: row.get(9)?,
            website: row.get(10)?,
        }));

        let resolved_at = row
            .get::<_, Option<String>>(14)?
            .map(|s| {
                s.parse::<Timestamp>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(14, Type::Text, Box::new(e))
                })
            })
            .transpose()?;

        Ok(RecallRecord {
            id: row.get(0)?,
            product: row.get(1)?,
            brand: row.get(2)?,
            model_number: row.get(3)?,
            manufacturer: row.get(4)?,
            severity,
            hazard: row.get(6)?,
            actions,
            contact,
            media,
            status,
            published_at: row.get::<_, String>(13)?.parse::<Timestamp>().map_err(
                |e| rusqlite::Error::FromSqlConversionFailure(13, Type::Text, Box::new(e)),
            )?,
            resolved_at,
        })
    }

    /// Inserts a new recall record.
    ///
    /// The record ID must be unique; inserting a duplicate is reported as an
    /// invalid-input error rather than a bare constraint violation.
    pub fn insert_recall(&mut self, record: &RecallRecord) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_RECALL_EXISTS_SQL, params![record.id], |row| {
                row.get(0)
            })
            .map_err(|e| RecallError::database_error("Failed to check recall existence", e))?;
        if exists {
            return Err(RecallError::invalid_input("id")
                .with_reason(format!("Recall '{}' already exists", record.id)));
        }

        let actions = Self::encode_string_list(&record.actions)?;
        let media = if record.media.is_empty() {
            None
        } else {
            Some(Self::encode_string_list(&record.media)?)
        };
        let contact = record.contact.clone().unwrap_or_default();

        tx.execute(
            INSERT_RECALL_SQL,
            params![
                record.id,
                record.product,
                record.brand,
                record.model_number,
                record.manufacturer,
                record.severity.as_str(),
                record.hazard,
                actions,
                contact.phone,
                contact.email,
                contact.website,
                media,
                record.status.as_str(),
                record.published_at.to_string(),
                record.resolved_at.map(|t| t.to_string()),
            ],
        )
        .map_err(|e| RecallError::database_error("Failed to insert recall", e))?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Retrieves a recall by its ID.
    pub fn get_recall(&self, id: &str) -> Result<Option<RecallRecord>> {
        let query = format!("SELECT {RECALL_COLUMNS} FROM recalls WHERE id = ?1");
        let mut stmt = self
            .connection
            .prepare(&query)
            .map_err(|e| RecallError::database_error("Failed to prepare query", e))?;

        stmt.query_row(params![id], Self::build_recall_from_row)
            .optional()
            .map_err(|e| RecallError::database_error("Failed to query recall", e))
    }

    /// Lists recalls with optional filtering.
    pub fn list_recalls(&self, filter: Option<&RecallFilter>) -> Result<Vec<RecallRecord>> {
        let mut query = format!("SELECT {RECALL_COLUMNS} FROM recalls");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(ref product) = f.product_contains {
                conditions.push("product LIKE ?");
                params_vec.push(Box::new(format!("%{product}%")));
            }

            if let Some(ref status) = f.status {
                conditions.push("status = ?");
                params_vec.push(Box::new(status.as_str().to_string()));
            } else if !f.include_closed {
                conditions.push("status = ?");
                params_vec.push(Box::new(RecallStatus::Open.as_str().to_string()));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY published_at DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .map_err(|e| RecallError::database_error("Failed to prepare query", e))?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let mut recalls: Vec<RecallRecord> = stmt
            .query_map(&params_refs[..], Self::build_recall_from_row)
            .map_err(|e| RecallError::database_error("Failed to query recalls", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| RecallError::database_error("Failed to fetch recalls", e))?;

        // The severity floor is applied in memory: the enum owns the ordering
        // and the table stores severities as text.
        if let Some(f) = filter {
            if let Some(minimum) = f.severity_at_least {
                recalls.retain(|r| r.severity >= minimum);
            }
        }

        Ok(recalls)
    }

    /// Lists recall summaries (with acknowledgement counts) via the summary
    /// views.
    pub fn list_summaries(&self, filter: Option<&RecallFilter>) -> Result<Vec<RecallSummary>> {
        let view_name = if filter.as_ref().is_some_and(|f| f.include_closed) {
            ALL_RECALL_SUMMARIES_VIEW
        } else {
            RECALL_SUMMARIES_VIEW
        };

        let mut query = format!("SELECT {SUMMARY_COLUMNS} FROM {view_name}");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(ref product) = f.product_contains {
                conditions.push("product LIKE ?");
                params_vec.push(Box::new(format!("%{product}%")));
            }

            if let Some(ref status) = f.status {
                conditions.push("status = ?");
                params_vec.push(Box::new(status.as_str().to_string()));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY published_at DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .map_err(|e| RecallError::database_error("Failed to prepare query", e))?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let mut summaries: Vec<RecallSummary> = stmt
            .query_map(&params_refs[..], |row| {
                let severity_str: String = row.get(3)?;
                let severity = severity_str.parse::<Severity>().map_err(|_| {
                    rusqlite::Error::FromSqlConversionFailure(
                        3,
                        Type::Text,
                        format!("Invalid severity: {severity_str}").into(),
                    )
                })?;

                let status_str: String = row.get(4)?;
                let status = status_str.parse::<RecallStatus>().map_err(|_| {
                    rusqlite::Error::FromSqlConversionFailure(
                        4,
                        Type::Text,
                        format!("Invalid recall status: {status_str}").into(),
                    )
                })?;

                Ok(RecallSummary {
                    id: row.get(0)?,
                    product: row.get(1)?,
                    brand: row.get(2)?,
                    severity,
                    status,
                    published_at: row.get::<_, String>(5)?.parse::<Timestamp>().map_err(
                        |e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)),
                    )?,
                    total_actions: row.get::<_, i64>(6)? as u32,
                    acknowledged_actions: row.get::<_, i64>(7)? as u32,
                })
            })
            .map_err(|e| RecallError::database_error("Failed to query summaries", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| RecallError::database_error("Failed to fetch summaries", e))?;

        if let Some(f) = filter {
            if let Some(minimum) = f.severity_at_least {
                summaries.retain(|s| s.severity >= minimum);
            }
        }

        Ok(summaries)
    }

    /// Sets a recall's status, recording or clearing the resolution
    /// timestamp. Returns the updated record, or None if the recall doesn't
    /// exist.
    pub fn set_status(
        &mut self,
        id: &str,
        status: RecallStatus,
        resolved_at: Option<Timestamp>,
    ) -> Result<Option<RecallRecord>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_RECALL_EXISTS_SQL, params![id], |row| row.get(0))
            .map_err(|e| RecallError::database_error("Failed to check recall existence", e))?;
        if !exists {
            return Ok(None);
        }

        tx.execute(
            UPDATE_RECALL_STATUS_SQL,
            params![
                status.as_str(),
                resolved_at.map(|t| t.to_string()),
                id
            ],
        )
        .map_err(|e| RecallError::database_error("Failed to update recall status", e))?;

        // Reopening also clears the stale checklist snapshot; a new session
        // starts from scratch.
        if status.is_open() {
            tx.execute(DELETE_RECALL_PROGRESS_SQL, params![id])
                .map_err(|e| RecallError::database_error("Failed to clear progress", e))?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_recall(id)
    }

    /// Permanently deletes a recall and its progress snapshot.
    pub fn delete_recall(&mut self, id: &str) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_RECALL_EXISTS_SQL, params![id], |row| row.get(0))
            .map_err(|e| RecallError::database_error("Failed to check recall existence", e))?;
        if !exists {
            return Err(RecallError::not_found(id));
        }

        tx.execute(DELETE_RECALL_PROGRESS_SQL, params![id])
            .map_err(|e| RecallError::database_error("Failed to delete recall progress", e))?;
        tx.execute(DELETE_RECALL_SQL, params![id])
            .map_err(|e| RecallError::database_error("Failed to delete recall", e))?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Upserts the checklist-progress snapshot for a recall.
    pub fn save_progress(&mut self, recall_id: &str, acknowledged: &[usize]) -> Result<()> {
        let exists: bool = self
            .connection
            .query_row(CHECK_RECALL_EXISTS_SQL, params![recall_id], |row| {
                row.get(0)
            })
            .map_err(|e| RecallError::database_error("Failed to check recall existence", e))?;
        if !exists {
            return Err(RecallError::not_found(recall_id));
        }

        let encoded = Self::encode_index_list(acknowledged)?;
        self.connection
            .execute(
                UPSERT_PROGRESS_SQL,
                params![recall_id, encoded, Timestamp::now().to_string()],
            )
            .map_err(|e| RecallError::database_error("Failed to save progress", e))?;
        Ok(())
    }

    /// Retrieves the saved checklist-progress snapshot for a recall.
    pub fn get_progress(&self, recall_id: &str) -> Result<Option<Vec<usize>>> {
        let raw: Option<String> = self
            .connection
            .query_row(SELECT_PROGRESS_SQL, params![recall_id], |row| row.get(0))
            .optional()
            .map_err(|e| RecallError::database_error("Failed to query progress", e))?;

        raw.map(|r| Self::decode_index_list(&r)).transpose()
    }
}
