use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use super::errors::RepositoryError;
use crate::database::DatabasePool;
use crate::models::{HealthRecord, NewHealthRecord};

/// Trait for health record persistence.
///
/// Each request performs at most one call: a single insert on submission
/// or a single per-patient query on listing. `list_for_patient` makes no
/// ordering promise; callers get whatever order the store returns.
#[async_trait]
pub trait HealthRecordRepositoryTrait {
    /// Persist a new record, assigning its id and creation timestamp
    async fn insert(&self, record: NewHealthRecord) -> Result<HealthRecord, RepositoryError>;

    /// All records owned by the given patient, in unspecified order
    async fn list_for_patient(&self, patient_id: i64)
        -> Result<Vec<HealthRecord>, RepositoryError>;
}

/// SQLite-backed health record repository
#[derive(Clone)]
pub struct SqliteHealthRecordRepository {
    pool: DatabasePool,
}

impl SqliteHealthRecordRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<HealthRecord> {
    let timestamp: String = row.get(5)?;
    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?
        .with_timezone(&Utc);

    Ok(HealthRecord {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        weight: row.get(2)?,
        bp: row.get(3)?,
        glucose: row.get(4)?,
        timestamp,
    })
}

#[async_trait]
impl HealthRecordRepositoryTrait for SqliteHealthRecordRepository {
    async fn insert(&self, record: NewHealthRecord) -> Result<HealthRecord, RepositoryError> {
        debug!("Storing health record for patient {}", record.patient_id);

        let conn = self.pool.get()?;
        let timestamp = Utc::now();

        conn.execute(
            "INSERT INTO health_records (patient_id, weight, bp, glucose, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                record.patient_id,
                record.weight,
                &record.bp,
                record.glucose,
                timestamp.to_rfc3339(),
            ),
        )?;

        let id = conn.last_insert_rowid();

        Ok(HealthRecord {
            id,
            patient_id: record.patient_id,
            weight: record.weight,
            bp: record.bp,
            glucose: record.glucose,
            timestamp,
        })
    }

    async fn list_for_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<HealthRecord>, RepositoryError> {
        debug!("Listing health records for patient {}", patient_id);

        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, patient_id, weight, bp, glucose, timestamp
             FROM health_records WHERE patient_id = ?1",
        )?;

        let rows = stmt.query_map([patient_id], row_to_record)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }

        Ok(records)
    }
}

/// In-memory health record repository, used by tests and as a fallback
/// when no database is configured. Clones share the underlying storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHealthRecordRepository {
    records: Arc<Mutex<Vec<HealthRecord>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryHealthRecordRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

#[async_trait]
impl HealthRecordRepositoryTrait for InMemoryHealthRecordRepository {
    async fn insert(&self, record: NewHealthRecord) -> Result<HealthRecord, RepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = HealthRecord {
            id,
            patient_id: record.patient_id,
            weight: record.weight,
            bp: record.bp,
            glucose: record.glucose,
            timestamp: Utc::now(),
        };

        let mut records = self.records.lock()?;
        records.push(stored.clone());

        Ok(stored)
    }

    async fn list_for_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<HealthRecord>, RepositoryError> {
        let records = self.records.lock()?;
        Ok(records
            .iter()
            .filter(|r| r.patient_id == patient_id)
            .cloned()
            .collect())
    }
}
