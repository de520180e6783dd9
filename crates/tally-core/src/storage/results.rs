use super::store::Store;
use crate::branch::archive_table_name;
use crate::errors::StoreError;
use crate::model::{ArchivedResultRow, Outcome, RecordedOutcome};
use chrono::NaiveDateTime;
use rusqlite::params;
use std::collections::HashMap;

impl Store {
    /// Returns the id for `name`, inserting the test first if it is new.
    ///
    /// Insert-if-absent then fetch, so two callers racing on the same name
    /// both land on the single row the UNIQUE constraint allows.
    pub fn resolve_or_create_test(&self, name: &str) -> Result<i64, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidArgument("test name is empty".into()));
        }
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO tests(name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
            params![name],
        )?;
        let id = conn.query_row(
            "SELECT id FROM tests WHERE name = ?1",
            params![name],
            |r| r.get(0),
        )?;
        Ok(id)
    }

    pub fn start_run(
        &self,
        branch_id: i64,
        version: &str,
        recorded_at: NaiveDateTime,
    ) -> Result<i64, StoreError> {
        if branch_id <= 0 {
            return Err(StoreError::InvalidArgument(format!(
                "branch id must be positive, got {branch_id}"
            )));
        }
        if version.trim().is_empty() {
            return Err(StoreError::InvalidArgument("version is empty".into()));
        }
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO test_runs(branch_id, version, recorded_at) VALUES (?1, ?2, ?3)",
            params![branch_id, version, recorded_at],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Inserts one result row. This is the single point where raw outcome
    /// strings from a report are validated against the fixed enum.
    pub fn record_outcome(
        &self,
        run_id: i64,
        test_id: i64,
        outcome: &str,
        error_message: Option<&str>,
    ) -> Result<(), StoreError> {
        if run_id <= 0 {
            return Err(StoreError::InvalidArgument(format!(
                "run id must be positive, got {run_id}"
            )));
        }
        if test_id <= 0 {
            return Err(StoreError::InvalidArgument(format!(
                "test id must be positive, got {test_id}"
            )));
        }
        let outcome: Outcome = outcome.parse()?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO results(test_run_id, test_id, result, error_message)
             VALUES (?1, ?2, ?3, ?4)",
            params![run_id, test_id, outcome.as_str(), error_message],
        )?;
        Ok(())
    }

    /// Full name-to-id snapshot of the tests table, so ingestion does not pay
    /// one lookup round trip per result.
    pub fn all_tests(&self) -> Result<HashMap<String, i64>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT name, id FROM tests")?;
        let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, i64>(1)?)))?;

        let mut map = HashMap::new();
        for row in rows {
            let (name, id) = row?;
            map.insert(name, id);
        }
        Ok(map)
    }

    /// Results of one run, joined with test names, in insertion order.
    pub fn run_outcomes(&self, run_id: i64) -> Result<Vec<RecordedOutcome>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT t.name, r.result, r.error_message
             FROM results r
             JOIN tests t ON r.test_id = t.id
             WHERE r.test_run_id = ?1
             ORDER BY r.id",
        )?;
        let rows = stmt.query_map(params![run_id], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, Option<String>>(2)?,
            ))
        })?;

        let mut outcomes = Vec::new();
        for row in rows {
            let (test_name, outcome, error_message) = row?;
            outcomes.push(RecordedOutcome {
                test_name,
                outcome: outcome.parse()?,
                error_message,
            });
        }
        Ok(outcomes)
    }

    /// Contents of the snapshot table for an archived branch.
    pub fn archived_results(&self, branch: &str) -> Result<Vec<ArchivedResultRow>, StoreError> {
        let table = archive_table_name(branch)?;
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT id, version, recorded_at, test_name, result, error_message
             FROM {table}
             ORDER BY id"
        ))?;
        let rows = stmt.query_map([], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, NaiveDateTime>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, String>(4)?,
                r.get::<_, Option<String>>(5)?,
            ))
        })?;

        let mut archived = Vec::new();
        for row in rows {
            let (id, version, recorded_at, test_name, outcome, error_message) = row?;
            archived.push(ArchivedResultRow {
                id,
                version,
                recorded_at,
                test_name,
                outcome: outcome.parse()?,
                error_message,
            });
        }
        Ok(archived)
    }
}
